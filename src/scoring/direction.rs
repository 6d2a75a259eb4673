//! Axis-direction inference.
//!
//! The question bank records what each party thinks, not which way
//! "agree" points on the question's axis. That sign is inferred from the
//! landscape itself: if the baseline party diverges from the average of
//! the other parties, agreement pushes the respondent toward whichever
//! pole the baseline sits on. Questions where the field does not diverge
//! enough are indeterminate and stay out of axis scoring.

use crate::core::{Question, QuestionBank};

/// Resolves, per question, the sign that agreement contributes to the
/// question's axis.
pub struct AxisDirectionResolver<'a> {
    bank: &'a QuestionBank,
    epsilon: f64,
}

impl<'a> AxisDirectionResolver<'a> {
    pub fn new(bank: &'a QuestionBank, epsilon: f64) -> Self {
        Self { bank, epsilon }
    }

    /// Direction in {-1, 0, 1} for `question`. Total: a question with no
    /// usable baseline or comparison stances resolves to 0 rather than
    /// failing.
    ///
    /// The comparison mean omits parties whose stance is absent or zero;
    /// both mean "no signal" for the divergence estimate and must not
    /// drag the average toward neutral.
    pub fn direction(&self, question: &Question) -> i8 {
        let Some(baseline) = question.stance(&self.bank.baseline) else {
            return 0;
        };

        let others: Vec<f64> = self
            .bank
            .other_party_ids()
            .filter_map(|id| question.stance(id))
            .filter(|&stance| stance != 0)
            .map(f64::from)
            .collect();
        if others.is_empty() {
            return 0;
        }

        let others_mean = others.iter().sum::<f64>() / others.len() as f64;
        let diff = f64::from(baseline) - others_mean;
        if diff.abs() < self.epsilon {
            0
        } else if diff > 0.0 {
            1
        } else {
            -1
        }
    }
}
