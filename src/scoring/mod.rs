pub mod aggregator;
pub mod direction;

pub use aggregator::ScoreAggregator;
pub use direction::AxisDirectionResolver;

/// Running numerator/denominator for one axis.
///
/// This accumulator is the single definition of the axis-score formula.
/// Respondent scoring and party placement both feed it, which is what
/// guarantees that a respondent answering exactly like a party lands on
/// exactly that party's position.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AxisTotals {
    numerator: f64,
    denominator: f64,
}

impl AxisTotals {
    /// Accumulate one direction-resolved contribution: `value` is the
    /// answer (or stance standing in for one), `direction` the axis sign,
    /// `weight` the question's importance multiplier.
    pub(crate) fn add(&mut self, value: f64, direction: f64, weight: f64) {
        self.numerator += value * direction * weight;
        // 2.0 is the maximum answer magnitude, so numerator/denominator
        // stays within [-1, 1].
        self.denominator += 2.0 * weight;
    }

    /// The bounded axis score. A zero denominator (nothing contributed to
    /// this axis) yields 0, not a division error.
    pub(crate) fn score(&self, axis_range: f64, multiplier: f64) -> f64 {
        if self.denominator == 0.0 {
            return 0.0;
        }
        ((self.numerator / self.denominator) * axis_range * multiplier)
            .clamp(-axis_range, axis_range)
    }
}
