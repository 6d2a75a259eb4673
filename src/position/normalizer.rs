use crate::core::Position;
use crate::position::PartyPositions;

/// Recenters points around the party centroid so that distances are
/// measured landscape-relative rather than against the absolute origin.
///
/// Only meaningful once all party positions are known; construct it from
/// a completed [`PartyPositions`] and normalize respondent and parties
/// alike before any distance comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    centroid: Position,
}

impl Normalizer {
    pub fn new(positions: &PartyPositions) -> Self {
        Self {
            centroid: positions.centroid,
        }
    }

    pub fn centroid(&self) -> Position {
        self.centroid
    }

    /// `point` expressed relative to the party centroid.
    pub fn normalize(&self, point: Position) -> Position {
        point.offset_from(&self.centroid)
    }
}
