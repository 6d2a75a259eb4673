use serde::{Deserialize, Serialize};

use crate::core::{Category, PartyId, QuestionId};

/// Which of the two compared parties the respondent's own answer sided
/// with on a diverging question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespondentSide {
    /// The answer sits within one point of both parties' stances.
    Both,
    /// No clear lean toward either party.
    Neither,
    /// Closer to this party's stance by a margin of at least one point.
    Party(PartyId),
}

/// A question on which the two compared parties diverge strongly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDifference {
    pub question_id: QuestionId,
    pub text: String,
    pub category: Category,
    pub stance_a: i8,
    pub stance_b: i8,
    /// Absolute stance gap; always at least the configured threshold.
    pub gap: u8,
    pub respondent_side: RespondentSide,
}

/// Display label for a shared stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceLabel {
    StronglySupport,
    Support,
    Oppose,
    StronglyOppose,
}

impl StanceLabel {
    /// Classify a shared stance from its sign and mean magnitude.
    /// `strong_threshold` is the mean magnitude at which a stance counts
    /// as strongly held.
    pub fn classify(stance_a: i8, stance_b: i8, strong_threshold: f64) -> Self {
        let mean_magnitude =
            (f64::from(stance_a.abs()) + f64::from(stance_b.abs())) / 2.0;
        let strong = mean_magnitude >= strong_threshold;
        match (stance_a > 0, strong) {
            (true, true) => StanceLabel::StronglySupport,
            (true, false) => StanceLabel::Support,
            (false, true) => StanceLabel::StronglyOppose,
            (false, false) => StanceLabel::Oppose,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StanceLabel::StronglySupport => "Strongly support",
            StanceLabel::Support => "Support",
            StanceLabel::Oppose => "Oppose",
            StanceLabel::StronglyOppose => "Strongly oppose",
        }
    }
}

/// A question on which the two compared parties hold the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonGroundItem {
    pub question_id: QuestionId,
    pub text: String,
    pub category: Category,
    pub label: StanceLabel,
    /// min(|stance A|, |stance B|): how firmly the weaker of the two
    /// holds the shared position.
    pub strength: u8,
}

/// How one answered question pulled the respondent's raw alignment
/// toward party A or party B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotalQuestion {
    pub question_id: QuestionId,
    pub text: String,
    pub category: Category,
    pub answer: i8,
    pub weight: u8,
    pub impact_a: i32,
    pub impact_b: i32,
    /// `impact_a - impact_b`; positive means the answer favored party A.
    pub net: i32,
}

impl PivotalQuestion {
    /// True when this answer pulled toward party A.
    pub fn favors_a(&self) -> bool {
        self.net > 0
    }

    /// True when this answer pulled toward party B.
    pub fn favors_b(&self) -> bool {
        self.net < 0
    }
}
