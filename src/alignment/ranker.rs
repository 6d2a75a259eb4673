//! Distance-based alignment ranking and near-tie detection.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::AlignmentTuning;
use crate::core::{PartyId, Position};
use crate::position::{Normalizer, PartyPositions};

/// One party's alignment with the respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyAlignment {
    pub party: PartyId,
    /// The party's position in absolute axis coordinates (what a chart
    /// plots); the distance below is measured in centered space.
    pub position: Position,
    /// Euclidean distance to the respondent after recentering around the
    /// party centroid.
    pub distance: f64,
    /// 0..=100, where 100 requires zero distance.
    pub alignment_pct: f64,
    /// Signed respondent-minus-party gap per axis.
    pub axis_diffs: AxisDiffs,
}

/// Per-axis signed differences between respondent and party.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDiffs {
    pub economic: f64,
    pub social: f64,
}

/// The best match plus any parties within the near-tie window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAlignment {
    pub best: PartyAlignment,
    pub close_ones: Vec<PartyAlignment>,
    pub is_tie: bool,
}

/// Ranks parties by distance from a respondent position.
pub struct AlignmentRanker<'a> {
    positions: &'a PartyPositions,
    tuning: &'a AlignmentTuning,
}

impl<'a> AlignmentRanker<'a> {
    pub fn new(positions: &'a PartyPositions, tuning: &'a AlignmentTuning) -> Self {
        Self { positions, tuning }
    }

    /// All parties ordered by ascending distance (descending alignment).
    ///
    /// The sort is stable, so parties at identical distance keep the
    /// registry's declaration order; no further tie-break is defined.
    pub fn rank(&self, respondent: Position) -> Vec<PartyAlignment> {
        let normalizer = Normalizer::new(self.positions);
        let centered_respondent = normalizer.normalize(respondent);

        let centered: Vec<(&PartyId, Position, Position)> = self
            .positions
            .by_party
            .iter()
            .map(|(id, pos)| (id, *pos, normalizer.normalize(*pos)))
            .collect();

        // The scale's end point: the farthest anything sits from the
        // centroid, inflated so 100% is reachable only at distance zero.
        let max_extent = centered
            .iter()
            .map(|(_, _, c)| c.magnitude())
            .chain(std::iter::once(centered_respondent.magnitude()))
            .fold(0.0_f64, f64::max);
        let max_distance = max_extent * self.tuning.max_distance_factor;
        debug!(
            "ranking against {} parties, max scoring distance {:.3}",
            centered.len(),
            max_distance
        );

        let mut ranked: Vec<PartyAlignment> = centered
            .into_iter()
            .map(|(id, absolute, centered_party)| {
                let distance = centered_party.distance(&centered_respondent);
                PartyAlignment {
                    party: id.clone(),
                    position: absolute,
                    distance,
                    alignment_pct: alignment_pct(distance, max_distance),
                    axis_diffs: AxisDiffs {
                        economic: respondent.economic - absolute.economic,
                        social: respondent.social - absolute.social,
                    },
                }
            })
            .collect();
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked
    }

    /// The top-ranked party with near-tie detection. `threshold_pct` is
    /// the window in percentage points inside which a runner-up counts
    /// as effectively tied. Returns `None` only for an empty registry.
    pub fn top_aligned(&self, respondent: Position, threshold_pct: f64) -> Option<TopAlignment> {
        let mut ranked = self.rank(respondent).into_iter();
        let best = ranked.next()?;
        let close_ones: Vec<PartyAlignment> = ranked
            .filter(|candidate| (best.alignment_pct - candidate.alignment_pct).abs() <= threshold_pct)
            .collect();
        let is_tie = !close_ones.is_empty();
        Some(TopAlignment {
            best,
            close_ones,
            is_tie,
        })
    }

    /// Near-tie detection with the configured default window.
    pub fn top_aligned_default(&self, respondent: Position) -> Option<TopAlignment> {
        self.top_aligned(respondent, self.tuning.tie_threshold)
    }
}

/// Distance mapped onto 0..=100. A degenerate landscape where everything
/// sits on the centroid has zero scoring distance; every party is then a
/// perfect match by definition.
fn alignment_pct(distance: f64, max_distance: f64) -> f64 {
    if max_distance <= f64::EPSILON {
        return 100.0;
    }
    (((max_distance - distance) / max_distance) * 100.0).clamp(0.0, 100.0)
}
