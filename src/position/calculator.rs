//! Placement of reference parties in the ideological space.
//!
//! Each party is placed by treating its own stance scores as answers and
//! running them through the same accumulator the respondent's answers go
//! through. Respondents and parties sharing one transform is the core
//! correctness invariant of the whole engine; if the formulas ever
//! diverge, distance comparisons between them are meaningless.

use serde::{Deserialize, Serialize};

use crate::config::ScoringTuning;
use crate::core::{Axis, PartyId, Position, QuestionBank};
use crate::scoring::{AxisDirectionResolver, AxisTotals};

/// Computes party coordinates from the question bank.
pub struct PositionCalculator<'a> {
    bank: &'a QuestionBank,
    resolver: AxisDirectionResolver<'a>,
    tuning: &'a ScoringTuning,
}

/// All party positions plus their centroid, in registry order. Computed
/// once per bank and cached by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyPositions {
    pub by_party: Vec<(PartyId, Position)>,
    pub centroid: Position,
}

impl PartyPositions {
    pub fn position(&self, party: &PartyId) -> Option<Position> {
        self.by_party
            .iter()
            .find(|(id, _)| id == party)
            .map(|(_, pos)| *pos)
    }
}

impl<'a> PositionCalculator<'a> {
    pub fn new(bank: &'a QuestionBank, tuning: &'a ScoringTuning) -> Self {
        Self {
            bank,
            resolver: AxisDirectionResolver::new(bank, tuning.direction_epsilon),
            tuning,
        }
    }

    /// The coordinates of one party. Questions where the party has no
    /// stance, a neutral stance, or an indeterminate axis direction
    /// contribute nothing.
    pub fn position(&self, party: &PartyId) -> Position {
        let mut economic = AxisTotals::default();
        let mut social = AxisTotals::default();

        for question in &self.bank.questions {
            let Some(stance) = question.stance(party) else {
                continue;
            };
            if stance == 0 {
                continue;
            }
            let direction = f64::from(self.resolver.direction(question));
            if direction == 0.0 {
                continue;
            }
            let totals = match question.axis {
                Axis::Economic => &mut economic,
                Axis::Social => &mut social,
            };
            totals.add(f64::from(stance), direction, f64::from(question.weight));
        }

        Position::new(
            economic.score(self.tuning.axis_range, self.tuning.score_multiplier),
            social.score(self.tuning.axis_range, self.tuning.score_multiplier),
        )
    }

    /// Positions for every registered party, in registry order, with the
    /// centroid the normalizer will recenter around.
    pub fn all_positions(&self) -> PartyPositions {
        let by_party: Vec<(PartyId, Position)> = self
            .bank
            .party_ids()
            .map(|id| (id.clone(), self.position(id)))
            .collect();
        let centroid = centroid(by_party.iter().map(|(_, pos)| *pos));
        PartyPositions { by_party, centroid }
    }
}

/// Arithmetic mean of a set of positions; the origin for an empty set.
fn centroid(positions: impl Iterator<Item = Position>) -> Position {
    let mut sum = Position::default();
    let mut count = 0usize;
    for pos in positions {
        sum.economic += pos.economic;
        sum.social += pos.social;
        count += 1;
    }
    if count == 0 {
        return Position::default();
    }
    Position::new(sum.economic / count as f64, sum.social / count as f64)
}
