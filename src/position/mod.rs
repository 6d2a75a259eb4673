pub mod calculator;
pub mod normalizer;

pub use calculator::{PartyPositions, PositionCalculator};
pub use normalizer::Normalizer;
