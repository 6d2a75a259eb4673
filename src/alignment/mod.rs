pub mod ranker;

pub use ranker::{AlignmentRanker, AxisDiffs, PartyAlignment, TopAlignment};
