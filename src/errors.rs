//! Error types raised while loading and validating reference data.
//!
//! Scoring itself is total: once a `QuestionBank` has passed validation,
//! every engine operation produces a complete result for any well-typed
//! input, including the empty answer set. The only fallible surface is
//! therefore the bank loading/validation boundary, plus the I/O seams in
//! [`crate::io`] which wrap these errors in `anyhow` context.

use thiserror::Error;

use crate::core::{PartyId, QuestionId};

/// Validation and parse errors for question-bank reference data.
///
/// A bank that loads without any of these errors is safe to score
/// against: every stance key resolves to a registered party, weights
/// and stance values are in range, and question ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// The bank source was not valid JSON or did not match the schema.
    #[error("failed to parse question bank: {0}")]
    Parse(String),

    /// The party registry is empty.
    #[error("question bank defines no parties")]
    NoParties,

    /// Alignment needs a baseline plus at least one other party.
    #[error("question bank needs at least two parties, found {0}")]
    TooFewParties(usize),

    /// Two registry entries share the same party id.
    #[error("duplicate party id '{0}'")]
    DuplicateParty(PartyId),

    /// The designated baseline party is not in the registry.
    #[error("baseline party '{0}' is not in the party registry")]
    UnknownBaseline(PartyId),

    /// Question ids are the stable keys for answers and must be unique.
    #[error("duplicate question id {0}")]
    DuplicateQuestionId(QuestionId),

    /// Question ids are positive integers.
    #[error("question ids must be positive")]
    ZeroQuestionId,

    /// Importance weights are restricted to 1..=3.
    #[error("question {id}: weight {weight} is outside 1..=3")]
    InvalidWeight { id: QuestionId, weight: u8 },

    /// Stance scores are restricted to -2..=2.
    #[error("question {id}: stance {score} for party '{party}' is outside -2..=2")]
    StanceOutOfRange {
        id: QuestionId,
        party: PartyId,
        score: i8,
    },

    /// A stance map references a party missing from the registry.
    #[error("question {id}: stance references unregistered party '{party}'")]
    UnknownParty { id: QuestionId, party: PartyId },

    /// The bank contains no questions at all.
    #[error("question bank contains no questions")]
    NoQuestions,
}
