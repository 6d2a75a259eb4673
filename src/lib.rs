// Export modules for library usage
pub mod alignment;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod io;
pub mod position;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    AnswerSet, Axis, Category, CategoryScore, Party, PartyId, Position, Question, QuestionBank,
    QuestionId, QuizResults,
};

pub use crate::alignment::{AlignmentRanker, AxisDiffs, PartyAlignment, TopAlignment};
pub use crate::comparison::{
    CommonGroundItem, DifferentialAnalyzer, KeyDifference, PivotalQuestion, RespondentSide,
    StanceLabel,
};
pub use crate::config::{AlignmentTuning, DifferentialTuning, ScoringTuning, TuningConfig};
pub use crate::engine::AlignmentEngine;
pub use crate::errors::BankError;
pub use crate::io::{default_question_bank, load_answers, load_question_bank};
pub use crate::position::{Normalizer, PartyPositions, PositionCalculator};
pub use crate::scoring::{AxisDirectionResolver, ScoreAggregator};
