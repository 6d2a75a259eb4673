//! Loading of question-bank reference data and answer files.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

use crate::core::{AnswerSet, QuestionBank};
use crate::errors::BankError;

/// The embedded default bank: four Singapore parties with the PAP as the
/// baseline, covering all eight categories across both axes.
static DEFAULT_BANK: Lazy<QuestionBank> = Lazy::new(|| {
    question_bank_from_json(include_str!("../../data/questions.json"))
        .expect("embedded question bank is valid")
});

/// The bank compiled into the binary. Validated on first access.
pub fn default_question_bank() -> &'static QuestionBank {
    &DEFAULT_BANK
}

/// Parse and validate a question bank from JSON.
pub fn question_bank_from_json(json: &str) -> std::result::Result<QuestionBank, BankError> {
    let bank: QuestionBank =
        serde_json::from_str(json).map_err(|e| BankError::Parse(e.to_string()))?;
    bank.validate()?;
    Ok(bank)
}

/// Load and validate a question bank from a JSON file.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank {}", path.display()))?;
    let bank = question_bank_from_json(&content)
        .with_context(|| format!("invalid question bank {}", path.display()))?;
    Ok(bank)
}

/// Load an answer set from a JSON object of question id to answer value.
pub fn load_answers(path: &Path) -> Result<AnswerSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers {}", path.display()))?;
    // Collect through AnswerSet::record so out-of-range values are
    // clamped the same way interactive recording clamps them.
    let raw: std::collections::BTreeMap<crate::core::QuestionId, i8> =
        serde_json::from_str(&content)
            .with_context(|| format!("invalid answers file {}", path.display()))?;
    Ok(raw.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn embedded_bank_loads_and_validates() {
        let bank = default_question_bank();
        assert_eq!(bank.parties.len(), 4);
        assert!(bank.contains_party(&bank.baseline));
        assert!(!bank.questions.is_empty());
    }

    #[test]
    fn parse_error_is_reported_as_bank_error() {
        let result = question_bank_from_json("{ not json");
        assert!(matches!(result, Err(BankError::Parse(_))));
    }

    #[test]
    fn out_of_range_stance_is_rejected() {
        let json = indoc! {r#"
            {
              "parties": [
                {"id": "a", "name": "Party A"},
                {"id": "b", "name": "Party B"}
              ],
              "baseline": "a",
              "questions": [
                {
                  "id": 1,
                  "text": "Test statement",
                  "category": "taxation",
                  "axis": "economic",
                  "weight": 1,
                  "stances": {"a": 5, "b": -1}
                }
              ]
            }
        "#};
        assert!(matches!(
            question_bank_from_json(json),
            Err(BankError::StanceOutOfRange { id: 1, .. })
        ));
    }

    #[test]
    fn minimal_bank_round_trips() {
        let json = indoc! {r#"
            {
              "parties": [
                {"id": "a", "name": "Party A"},
                {"id": "b", "name": "Party B"}
              ],
              "baseline": "a",
              "questions": [
                {
                  "id": 1,
                  "text": "Test statement",
                  "category": "housing",
                  "axis": "economic",
                  "weight": 2,
                  "stances": {"a": 2, "b": -2}
                }
              ]
            }
        "#};
        let bank = question_bank_from_json(json).unwrap();
        assert_eq!(bank.questions[0].weight, 2);
        let round_tripped =
            question_bank_from_json(&serde_json::to_string(&bank).unwrap()).unwrap();
        assert_eq!(bank, round_tripped);
    }
}
