use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::BankError;

/// Stable identity for a question, used as the key for answers.
pub type QuestionId = u32;

/// The two ideological dimensions every question contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Economic,
    Social,
}

/// Topical tag for a question. Closed enumeration; adding a category is a
/// schema change, not a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Taxation,
    Housing,
    Healthcare,
    Employment,
    Welfare,
    Governance,
    CivilLiberties,
    Immigration,
}

impl Category {
    /// Display label for report output.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Taxation => "Taxation",
            Category::Housing => "Housing",
            Category::Healthcare => "Healthcare",
            Category::Employment => "Employment",
            Category::Welfare => "Welfare",
            Category::Governance => "Governance",
            Category::CivilLiberties => "Civil Liberties",
            Category::Immigration => "Immigration",
        }
    }
}

/// Identifier for a reference party. All stance maps are keyed by these ids,
/// validated against the bank's registry at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Registry entry for a reference party. Display metadata is carried along
/// for consumers; the engine itself only cares about the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
}

/// A single questionnaire statement with its reference stances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub category: Category,
    pub axis: Axis,
    /// Importance multiplier in 1..=3, applied uniformly wherever this
    /// question contributes to any score.
    pub weight: u8,
    /// Per-party stance in -2..=2. A missing key means "no signal" for that
    /// party, which is distinct from an explicit 0 (neutral).
    #[serde(default)]
    pub stances: BTreeMap<PartyId, i8>,
}

impl Question {
    /// The recorded stance for `party`, if the bank defines one.
    pub fn stance(&self, party: &PartyId) -> Option<i8> {
        self.stances.get(party).copied()
    }
}

/// Immutable reference data: the party registry, the designated baseline
/// party, and the full question list. Loaded once at process start and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub parties: Vec<Party>,
    pub baseline: PartyId,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Look up a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Registry ids in declaration order. Declaration order is the stable
    /// tie-break order everywhere rankings are produced.
    pub fn party_ids(&self) -> impl Iterator<Item = &PartyId> {
        self.parties.iter().map(|p| &p.id)
    }

    /// Registry ids excluding the baseline party.
    pub fn other_party_ids(&self) -> impl Iterator<Item = &PartyId> {
        self.parties
            .iter()
            .map(|p| &p.id)
            .filter(move |id| **id != self.baseline)
    }

    pub fn contains_party(&self, id: &PartyId) -> bool {
        self.parties.iter().any(|p| p.id == *id)
    }

    /// Validate the bank so scoring can rely on its shape: unique positive
    /// question ids, weights in 1..=3, stances in -2..=2 keyed only by
    /// registered parties, and a baseline present in a registry of at
    /// least two parties.
    pub fn validate(&self) -> Result<(), BankError> {
        if self.parties.is_empty() {
            return Err(BankError::NoParties);
        }
        if self.parties.len() < 2 {
            return Err(BankError::TooFewParties(self.parties.len()));
        }
        let mut seen_parties = std::collections::BTreeSet::new();
        for party in &self.parties {
            if !seen_parties.insert(&party.id) {
                return Err(BankError::DuplicateParty(party.id.clone()));
            }
        }
        if !self.contains_party(&self.baseline) {
            return Err(BankError::UnknownBaseline(self.baseline.clone()));
        }
        if self.questions.is_empty() {
            return Err(BankError::NoQuestions);
        }

        let mut seen_ids = std::collections::BTreeSet::new();
        for question in &self.questions {
            if question.id == 0 {
                return Err(BankError::ZeroQuestionId);
            }
            if !seen_ids.insert(question.id) {
                return Err(BankError::DuplicateQuestionId(question.id));
            }
            if !(1..=3).contains(&question.weight) {
                return Err(BankError::InvalidWeight {
                    id: question.id,
                    weight: question.weight,
                });
            }
            for (party, &score) in &question.stances {
                if !self.contains_party(party) {
                    return Err(BankError::UnknownParty {
                        id: question.id,
                        party: party.clone(),
                    });
                }
                if !(-2..=2).contains(&score) {
                    return Err(BankError::StanceOutOfRange {
                        id: question.id,
                        party: party.clone(),
                        score,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A respondent's answers, built incrementally by the quiz flow and handed
/// to the engine as a finalized snapshot.
///
/// Values are in -2..=2 (strongly disagree to strongly agree). A recorded 0
/// and an absent entry carry the same signal for every aggregate
/// computation; the distinction is kept only so consumers can tell
/// "answered neutral" from "skipped". Backed by a persistent map, so
/// snapshotting a finalized set is a cheap structural clone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: OrdMap<QuestionId, i8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, clamping out-of-range values into -2..=2. The UI
    /// boundary is expected to reject malformed values before they get
    /// here; clamping keeps the engine total if one slips through.
    pub fn record(&mut self, id: QuestionId, value: i8) {
        self.answers.insert(id, value.clamp(-2, 2));
    }

    /// Remove an answer, returning the question to "skipped".
    pub fn clear(&mut self, id: QuestionId) {
        self.answers.remove(&id);
    }

    pub fn get(&self, id: QuestionId) -> Option<i8> {
        self.answers.get(&id).copied()
    }

    /// The answer treated as a signal: 0 for both "answered neutral" and
    /// "skipped".
    pub fn signal(&self, id: QuestionId) -> i8 {
        self.get(id).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, i8)> + '_ {
        self.answers.iter().map(|(id, value)| (*id, *value))
    }
}

impl FromIterator<(QuestionId, i8)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, i8)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (id, value) in iter {
            set.record(id, value);
        }
        set
    }
}

/// A point in the two-dimensional ideological space. Both components are
/// bounded to the configured axis range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub economic: f64,
    pub social: f64,
}

impl Position {
    pub fn new(economic: f64, social: f64) -> Self {
        Self { economic, social }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Position) -> f64 {
        (self.economic - other.economic).hypot(self.social - other.social)
    }

    /// Distance from the origin.
    pub fn magnitude(&self) -> f64 {
        self.economic.hypot(self.social)
    }

    /// This point recentered by subtracting `origin`.
    pub fn offset_from(&self, origin: &Position) -> Position {
        Position {
            economic: self.economic - origin.economic,
            social: self.social - origin.social,
        }
    }
}

/// Per-category averages of direction-corrected answers, split by axis.
/// Totals are unweighted and averaged over the category's counted tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub economic: f64,
    pub social: f64,
    /// Number of answered, direction-resolvable questions in the category.
    pub answered: u32,
}

/// Complete scoring output for one finalized answer set.
///
/// Pure function of the bank and the answers: scoring the same answer set
/// twice yields identical results. The original answers ride along so
/// differential analysis can run later without re-supplying them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResults {
    /// Economic axis score in [-axis_range, axis_range].
    pub economic_score: f64,
    /// Social axis score in [-axis_range, axis_range].
    pub social_score: f64,
    /// Unbounded dot-product alignment score per party. Every registered
    /// party has an entry, zero when nothing contributed.
    pub party_raw_scores: BTreeMap<PartyId, f64>,
    /// Per-category averages, present only for categories with at least
    /// one counted question.
    pub category_breakdown: BTreeMap<Category, CategoryScore>,
    /// The answer set these results were computed from.
    pub answers: AnswerSet,
}

impl QuizResults {
    /// The respondent's position in the ideological space.
    pub fn position(&self) -> Position {
        Position::new(self.economic_score, self.social_score)
    }
}
