//! The scoring service facade.
//!
//! Owns the validated question bank and the tuning parameters, and
//! lazily caches the derived party positions. Everything it computes is
//! a pure function of the bank and the inputs, so independent answer
//! sets may be scored concurrently against one shared engine without
//! coordination.

use log::debug;
use once_cell::sync::OnceCell;

use crate::alignment::{AlignmentRanker, PartyAlignment, TopAlignment};
use crate::comparison::{
    CommonGroundItem, DifferentialAnalyzer, KeyDifference, PivotalQuestion,
};
use crate::config::TuningConfig;
use crate::core::{AnswerSet, PartyId, Position, QuestionBank, QuizResults};
use crate::errors::BankError;
use crate::position::{PartyPositions, PositionCalculator};
use crate::scoring::ScoreAggregator;

/// The alignment engine: scoring, placement, ranking, and differential
/// analysis over one immutable question bank.
pub struct AlignmentEngine {
    bank: QuestionBank,
    tuning: TuningConfig,
    // Single-assignment cache: party positions never change once the
    // bank is loaded, and concurrent first calls must not duplicate the
    // computation.
    positions: OnceCell<PartyPositions>,
}

impl AlignmentEngine {
    /// Build an engine with default tuning. Fails only if the bank does
    /// not pass validation.
    pub fn new(bank: QuestionBank) -> Result<Self, BankError> {
        Self::with_tuning(bank, TuningConfig::default())
    }

    /// Build an engine with explicit tuning.
    pub fn with_tuning(bank: QuestionBank, tuning: TuningConfig) -> Result<Self, BankError> {
        bank.validate()?;
        Ok(Self {
            bank,
            tuning,
            positions: OnceCell::new(),
        })
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    /// Score a finalized answer set.
    pub fn calculate_scores(&self, answers: &AnswerSet) -> QuizResults {
        ScoreAggregator::new(&self.bank, &self.tuning.scoring).compute_scores(answers)
    }

    /// Party positions and centroid, computed on first use.
    pub fn party_positions(&self) -> &PartyPositions {
        self.positions.get_or_init(|| {
            debug!("computing party positions for {} parties", self.bank.parties.len());
            PositionCalculator::new(&self.bank, &self.tuning.scoring).all_positions()
        })
    }

    /// Every party's coordinates, in registry order.
    pub fn all_positions(&self) -> &[(PartyId, Position)] {
        &self.party_positions().by_party
    }

    /// All parties ranked by closeness to the given axis scores.
    pub fn rank_alignment(&self, economic_score: f64, social_score: f64) -> Vec<PartyAlignment> {
        let ranker = AlignmentRanker::new(self.party_positions(), &self.tuning.alignment);
        ranker.rank(Position::new(economic_score, social_score))
    }

    /// The best match with near-tie detection. `threshold_pct` is the
    /// percentage-point window inside which runners-up count as tied.
    pub fn top_aligned(
        &self,
        economic_score: f64,
        social_score: f64,
        threshold_pct: f64,
    ) -> Option<TopAlignment> {
        let ranker = AlignmentRanker::new(self.party_positions(), &self.tuning.alignment);
        ranker.top_aligned(Position::new(economic_score, social_score), threshold_pct)
    }

    /// Questions where two parties diverge most, with the respondent's
    /// lean on each.
    pub fn key_differences(
        &self,
        party_a: &PartyId,
        party_b: &PartyId,
        answers: &AnswerSet,
        limit: usize,
    ) -> Vec<KeyDifference> {
        DifferentialAnalyzer::new(&self.bank, &self.tuning.differential)
            .key_differences(party_a, party_b, answers, limit)
    }

    /// Questions where two parties hold the same position.
    pub fn common_ground(
        &self,
        party_a: &PartyId,
        party_b: &PartyId,
        limit: usize,
    ) -> Vec<CommonGroundItem> {
        DifferentialAnalyzer::new(&self.bank, &self.tuning.differential)
            .common_ground(party_a, party_b, limit)
    }

    /// Which answered questions decided between two parties, most
    /// decisive first.
    pub fn pivotal_impact(
        &self,
        answers: &AnswerSet,
        party_a: &PartyId,
        party_b: &PartyId,
    ) -> Vec<PivotalQuestion> {
        DifferentialAnalyzer::new(&self.bank, &self.tuning.differential)
            .pivotal_impact(answers, party_a, party_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::default_question_bank;

    #[test]
    fn engine_rejects_an_invalid_bank() {
        let mut bank = default_question_bank().clone();
        bank.baseline = PartyId::from("nobody");
        assert!(AlignmentEngine::new(bank).is_err());
    }

    #[test]
    fn positions_are_computed_once_and_cached() {
        let engine = AlignmentEngine::new(default_question_bank().clone()).unwrap();
        let first = engine.party_positions() as *const PartyPositions;
        let second = engine.party_positions() as *const PartyPositions;
        assert_eq!(first, second);
    }

    #[test]
    fn ranking_covers_every_registered_party() {
        let engine = AlignmentEngine::new(default_question_bank().clone()).unwrap();
        let ranked = engine.rank_alignment(3.0, -2.0);
        assert_eq!(ranked.len(), engine.bank().parties.len());
    }
}
