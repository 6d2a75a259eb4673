//! Differential analysis between two closely-aligned parties.
//!
//! Consumed after ranking, typically for the top two matches: where do
//! they split hardest, where do they agree, and which of the
//! respondent's own answers decided between them.

use crate::config::DifferentialTuning;
use crate::core::{AnswerSet, PartyId, Question, QuestionBank};
use crate::comparison::types::{
    CommonGroundItem, KeyDifference, PivotalQuestion, RespondentSide, StanceLabel,
};

/// Compares two parties question-by-question against the bank and a
/// respondent's answers.
pub struct DifferentialAnalyzer<'a> {
    bank: &'a QuestionBank,
    tuning: &'a DifferentialTuning,
}

impl<'a> DifferentialAnalyzer<'a> {
    pub fn new(bank: &'a QuestionBank, tuning: &'a DifferentialTuning) -> Self {
        Self { bank, tuning }
    }

    /// Questions where the two parties diverge by at least the configured
    /// stance gap, most divergent first, truncated to `limit`. Questions
    /// where either party has no recorded stance are excluded; absence is
    /// not a neutral stance.
    pub fn key_differences(
        &self,
        party_a: &PartyId,
        party_b: &PartyId,
        answers: &AnswerSet,
        limit: usize,
    ) -> Vec<KeyDifference> {
        let mut differences: Vec<KeyDifference> = self
            .both_defined(party_a, party_b)
            .filter_map(|(question, stance_a, stance_b)| {
                let gap = stance_a.abs_diff(stance_b);
                if gap < self.tuning.key_difference_threshold {
                    return None;
                }
                Some(KeyDifference {
                    question_id: question.id,
                    text: question.text.clone(),
                    category: question.category,
                    stance_a,
                    stance_b,
                    gap,
                    respondent_side: classify_side(
                        answers.signal(question.id),
                        stance_a,
                        stance_b,
                        party_a,
                        party_b,
                    ),
                })
            })
            .collect();
        differences.sort_by(|a, b| b.gap.cmp(&a.gap));
        differences.truncate(limit);
        differences
    }

    /// Questions where both parties hold a non-zero stance of the same
    /// sign, ordered by how firmly the weaker party holds it, truncated
    /// to `limit`.
    pub fn common_ground(
        &self,
        party_a: &PartyId,
        party_b: &PartyId,
        limit: usize,
    ) -> Vec<CommonGroundItem> {
        let mut shared: Vec<CommonGroundItem> = self
            .both_defined(party_a, party_b)
            .filter_map(|(question, stance_a, stance_b)| {
                if stance_a == 0 || stance_b == 0 || stance_a.signum() != stance_b.signum() {
                    return None;
                }
                Some(CommonGroundItem {
                    question_id: question.id,
                    text: question.text.clone(),
                    category: question.category,
                    label: StanceLabel::classify(
                        stance_a,
                        stance_b,
                        self.tuning.strong_stance_threshold,
                    ),
                    strength: stance_a.abs().min(stance_b.abs()) as u8,
                })
            })
            .collect();
        shared.sort_by(|a, b| b.strength.cmp(&a.strength));
        shared.truncate(limit);
        shared
    }

    /// Per-question weighted impact differential for every answered
    /// question both parties have stances on, most decisive first.
    /// Positive net means the answer favored party A over party B.
    pub fn pivotal_impact(
        &self,
        answers: &AnswerSet,
        party_a: &PartyId,
        party_b: &PartyId,
    ) -> Vec<PivotalQuestion> {
        let mut impacts: Vec<PivotalQuestion> = self
            .both_defined(party_a, party_b)
            .filter_map(|(question, stance_a, stance_b)| {
                let answer = answers.signal(question.id);
                if answer == 0 {
                    return None;
                }
                let answer_i32 = i32::from(answer);
                let weight = i32::from(question.weight);
                let impact_a = answer_i32 * i32::from(stance_a) * weight;
                let impact_b = answer_i32 * i32::from(stance_b) * weight;
                Some(PivotalQuestion {
                    question_id: question.id,
                    text: question.text.clone(),
                    category: question.category,
                    answer,
                    weight: question.weight,
                    impact_a,
                    impact_b,
                    net: impact_a - impact_b,
                })
            })
            .collect();
        impacts.sort_by(|a, b| b.net.abs().cmp(&a.net.abs()));
        impacts
    }

    /// Questions where both parties have recorded stances.
    fn both_defined<'b>(
        &'b self,
        party_a: &'b PartyId,
        party_b: &'b PartyId,
    ) -> impl Iterator<Item = (&'b Question, i8, i8)> + 'b {
        self.bank.questions.iter().filter_map(move |question| {
            let stance_a = question.stance(party_a)?;
            let stance_b = question.stance(party_b)?;
            Some((question, stance_a, stance_b))
        })
    }
}

/// Which party a single answer sided with. An unanswered or neutral
/// answer carries no signal and never sides with anyone.
fn classify_side(
    answer: i8,
    stance_a: i8,
    stance_b: i8,
    party_a: &PartyId,
    party_b: &PartyId,
) -> RespondentSide {
    if answer == 0 {
        return RespondentSide::Neither;
    }
    let to_a = (answer - stance_a).abs();
    let to_b = (answer - stance_b).abs();
    if to_a <= 1 && to_b <= 1 {
        RespondentSide::Both
    } else if to_b - to_a >= 1 {
        RespondentSide::Party(party_a.clone())
    } else if to_a - to_b >= 1 {
        RespondentSide::Party(party_b.clone())
    } else {
        RespondentSide::Neither
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Axis, Category, Party, QuestionBank};
    use pretty_assertions::assert_eq;

    fn pid(id: &str) -> PartyId {
        PartyId::from(id)
    }

    fn question(id: u32, weight: u8, a: Option<i8>, b: Option<i8>) -> Question {
        let mut stances = std::collections::BTreeMap::new();
        if let Some(s) = a {
            stances.insert(pid("a"), s);
        }
        if let Some(s) = b {
            stances.insert(pid("b"), s);
        }
        Question {
            id,
            text: format!("Question {}", id),
            category: Category::Governance,
            axis: Axis::Social,
            weight,
            stances,
        }
    }

    fn bank(questions: Vec<Question>) -> QuestionBank {
        QuestionBank {
            parties: vec![
                Party {
                    id: pid("a"),
                    name: "A".into(),
                },
                Party {
                    id: pid("b"),
                    name: "B".into(),
                },
            ],
            baseline: pid("a"),
            questions,
        }
    }

    #[test]
    fn small_gaps_never_count_as_key_differences() {
        let bank = bank(vec![
            question(1, 1, Some(2), Some(1)),  // gap 1, below threshold
            question(2, 1, Some(2), Some(-2)), // gap 4
            question(3, 1, Some(1), Some(-1)), // gap 2
        ]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);

        let diffs = analyzer.key_differences(&pid("a"), &pid("b"), &AnswerSet::new(), 10);
        let ids: Vec<u32> = diffs.iter().map(|d| d.question_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(diffs.iter().all(|d| d.gap >= 2));
    }

    #[test]
    fn questions_missing_a_stance_are_excluded() {
        let bank = bank(vec![
            question(1, 1, Some(2), None),
            question(2, 1, None, Some(-2)),
            question(3, 1, Some(2), Some(-2)),
        ]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);

        let diffs = analyzer.key_differences(&pid("a"), &pid("b"), &AnswerSet::new(), 10);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].question_id, 3);
    }

    #[test]
    fn respondent_sides_are_classified() {
        let bank = bank(vec![question(1, 1, Some(2), Some(-2))]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);

        let agrees_with_a: AnswerSet = [(1, 2)].into_iter().collect();
        let diffs = analyzer.key_differences(&pid("a"), &pid("b"), &agrees_with_a, 10);
        assert_eq!(diffs[0].respondent_side, RespondentSide::Party(pid("a")));

        let agrees_with_b: AnswerSet = [(1, -1)].into_iter().collect();
        let diffs = analyzer.key_differences(&pid("a"), &pid("b"), &agrees_with_b, 10);
        assert_eq!(diffs[0].respondent_side, RespondentSide::Party(pid("b")));

        let unanswered = AnswerSet::new();
        let diffs = analyzer.key_differences(&pid("a"), &pid("b"), &unanswered, 10);
        assert_eq!(diffs[0].respondent_side, RespondentSide::Neither);
    }

    #[test]
    fn respondent_between_close_stances_sides_with_both() {
        let bank = bank(vec![question(1, 1, Some(2), Some(0))]);
        let mut tuning = DifferentialTuning::default();
        tuning.key_difference_threshold = 2;
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);

        let between: AnswerSet = [(1, 1)].into_iter().collect();
        let diffs = analyzer.key_differences(&pid("a"), &pid("b"), &between, 10);
        assert_eq!(diffs[0].respondent_side, RespondentSide::Both);
    }

    #[test]
    fn common_ground_requires_same_sign_non_zero_stances() {
        let bank = bank(vec![
            question(1, 1, Some(2), Some(1)),  // shared support
            question(2, 1, Some(-2), Some(-2)), // shared strong opposition
            question(3, 1, Some(2), Some(-1)), // opposed signs
            question(4, 1, Some(0), Some(2)),  // neutral on one side
        ]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);

        let shared = analyzer.common_ground(&pid("a"), &pid("b"), 10);
        let ids: Vec<u32> = shared.iter().map(|c| c.question_id).collect();
        assert_eq!(ids, vec![2, 1]); // strength 2 before strength 1

        assert_eq!(shared[0].label, StanceLabel::StronglyOppose);
        assert_eq!(shared[1].label, StanceLabel::Support);
    }

    #[test]
    fn stance_labels_use_the_mean_magnitude_threshold() {
        assert_eq!(StanceLabel::classify(2, 2, 1.5), StanceLabel::StronglySupport);
        assert_eq!(StanceLabel::classify(2, 1, 1.5), StanceLabel::StronglySupport);
        assert_eq!(StanceLabel::classify(1, 1, 1.5), StanceLabel::Support);
        assert_eq!(StanceLabel::classify(-2, -2, 1.5), StanceLabel::StronglyOppose);
        assert_eq!(StanceLabel::classify(-1, -1, 1.5), StanceLabel::Oppose);
    }

    #[test]
    fn common_ground_truncates_to_the_limit() {
        let bank = bank(vec![
            question(1, 1, Some(2), Some(2)),
            question(2, 1, Some(2), Some(2)),
            question(3, 1, Some(1), Some(1)),
        ]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);
        assert_eq!(analyzer.common_ground(&pid("a"), &pid("b"), 2).len(), 2);
    }

    #[test]
    fn pivotal_impact_orders_by_decisiveness() {
        let bank = bank(vec![
            question(1, 1, Some(1), Some(-1)), // net swing 2 per answer point
            question(2, 3, Some(2), Some(-2)), // net swing 12 at answer 1
            question(3, 1, Some(1), Some(1)),  // no swing at all
        ]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);
        let answers: AnswerSet = [(1, 2), (2, 1), (3, 2)].into_iter().collect();

        let impacts = analyzer.pivotal_impact(&answers, &pid("a"), &pid("b"));
        let ids: Vec<u32> = impacts.iter().map(|p| p.question_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        // Q2: answer 1, stances 2/-2, weight 3.
        assert_eq!(impacts[0].impact_a, 6);
        assert_eq!(impacts[0].impact_b, -6);
        assert_eq!(impacts[0].net, 12);
        assert!(impacts[0].favors_a());

        assert_eq!(impacts[2].net, 0);
        assert!(!impacts[2].favors_a() && !impacts[2].favors_b());
    }

    #[test]
    fn pivotal_impact_skips_unanswered_questions() {
        let bank = bank(vec![
            question(1, 1, Some(2), Some(-2)),
            question(2, 1, Some(2), Some(-2)),
        ]);
        let tuning = DifferentialTuning::default();
        let analyzer = DifferentialAnalyzer::new(&bank, &tuning);
        let answers: AnswerSet = [(1, -2)].into_iter().collect();

        let impacts = analyzer.pivotal_impact(&answers, &pid("a"), &pid("b"));
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].question_id, 1);
        assert!(impacts[0].favors_b());
    }
}
