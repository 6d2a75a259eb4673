//! Reduction of a finalized answer set into axis scores, per-party raw
//! alignment scores, and a per-category breakdown.

use log::debug;
use std::collections::BTreeMap;

use crate::config::ScoringTuning;
use crate::core::{AnswerSet, Axis, Category, CategoryScore, PartyId, QuestionBank, QuizResults};
use crate::scoring::{AxisDirectionResolver, AxisTotals};

/// Reduces (question id -> answer) pairs into a complete [`QuizResults`].
///
/// Total over any well-typed input: unknown question ids are ignored as
/// stale noise, neutral/absent answers contribute nothing, and an empty
/// answer set produces all-zero scores.
pub struct ScoreAggregator<'a> {
    bank: &'a QuestionBank,
    resolver: AxisDirectionResolver<'a>,
    tuning: &'a ScoringTuning,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(bank: &'a QuestionBank, tuning: &'a ScoringTuning) -> Self {
        Self {
            bank,
            resolver: AxisDirectionResolver::new(bank, tuning.direction_epsilon),
            tuning,
        }
    }

    /// Compute axis scores, raw party scores, and the category breakdown
    /// for a finalized answer set.
    pub fn compute_scores(&self, answers: &AnswerSet) -> QuizResults {
        let mut economic = AxisTotals::default();
        let mut social = AxisTotals::default();
        let mut breakdown: BTreeMap<Category, CategoryScore> = BTreeMap::new();

        // Every registered party gets a raw score, zero included.
        let mut raw_scores: BTreeMap<PartyId, f64> = self
            .bank
            .party_ids()
            .map(|id| (id.clone(), 0.0))
            .collect();

        for (id, answer) in answers.iter() {
            if answer == 0 {
                continue;
            }
            let Some(question) = self.bank.question(id) else {
                debug!("ignoring answer for unknown question id {}", id);
                continue;
            };

            let answer = f64::from(answer);
            let weight = f64::from(question.weight);
            let direction = f64::from(self.resolver.direction(question));

            if direction != 0.0 {
                let totals = match question.axis {
                    Axis::Economic => &mut economic,
                    Axis::Social => &mut social,
                };
                totals.add(answer, direction, weight);

                // Category totals are unweighted; each counted question
                // contributes once to its category's tally.
                let entry = breakdown.entry(question.category).or_default();
                match question.axis {
                    Axis::Economic => entry.economic += answer * direction,
                    Axis::Social => entry.social += answer * direction,
                }
                entry.answered += 1;
            }

            // Raw party scores accumulate regardless of axis direction.
            // Absent stances contribute no signal; they are not zero.
            for (party, raw) in raw_scores.iter_mut() {
                if let Some(stance) = question.stance(party) {
                    *raw += answer * f64::from(stance) * weight;
                }
            }
        }

        for score in breakdown.values_mut() {
            if score.answered > 0 {
                score.economic /= f64::from(score.answered);
                score.social /= f64::from(score.answered);
            }
        }

        let results = QuizResults {
            economic_score: economic.score(self.tuning.axis_range, self.tuning.score_multiplier),
            social_score: social.score(self.tuning.axis_range, self.tuning.score_multiplier),
            party_raw_scores: raw_scores,
            category_breakdown: breakdown,
            answers: answers.clone(),
        };
        debug!(
            "scored {} answers: economic {:.2}, social {:.2}",
            answers.len(),
            results.economic_score,
            results.social_score
        );
        results
    }
}
