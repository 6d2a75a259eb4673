pub mod differential;
pub mod types;

pub use differential::DifferentialAnalyzer;
pub use types::{
    CommonGroundItem, KeyDifference, PivotalQuestion, RespondentSide, StanceLabel,
};
