// End-to-end scoring through the engine facade: the worked example from
// the mirrored two-party bank, plus the degenerate inputs the engine
// must absorb without failing.

mod common;

use common::{mirrored_bank, pid};
use pretty_assertions::assert_eq;

use alignmeter::{AlignmentEngine, AnswerSet, AxisDirectionResolver, Category};

#[test]
fn worked_example_end_to_end() {
    let bank = mirrored_bank();

    // Directions first: X sits above Y on Q1/Q2 and below on Q3.
    let resolver = AxisDirectionResolver::new(&bank, 0.1);
    assert_eq!(resolver.direction(&bank.questions[0]), 1);
    assert_eq!(resolver.direction(&bank.questions[1]), 1);
    assert_eq!(resolver.direction(&bank.questions[2]), -1);

    let engine = AlignmentEngine::new(bank).unwrap();
    let answers: AnswerSet = [(1, 2), (2, 2), (3, -2)].into_iter().collect();
    let results = engine.calculate_scores(&answers);

    // Economic: (2*1*1 + 2*1*1) / (2 + 2) = 1.0, scaled to the axis range.
    // Social: (-2 * -1 * 2) / (2 * 2) = 1.0, scaled likewise.
    assert_eq!(results.economic_score, 10.0);
    assert_eq!(results.social_score, 10.0);

    // X raw: 2*2*1 + 2*1*1 + -2*-2*2 = 14; Y mirrors it exactly.
    assert_eq!(results.party_raw_scores[&pid("x")], 14.0);
    assert_eq!(results.party_raw_scores[&pid("y")], -14.0);

    // The respondent sided with X everywhere, so X ranks far ahead of Y.
    let ranked = engine.rank_alignment(results.economic_score, results.social_score);
    assert_eq!(ranked[0].party, pid("x"));
    assert!(ranked[0].alignment_pct > ranked[1].alignment_pct);
    assert!(ranked[0].distance < ranked[1].distance);
}

#[test]
fn empty_answer_set_scores_zero_everywhere() {
    let engine = AlignmentEngine::new(mirrored_bank()).unwrap();
    let results = engine.calculate_scores(&AnswerSet::new());

    assert_eq!(results.economic_score, 0.0);
    assert_eq!(results.social_score, 0.0);
    assert!(results.party_raw_scores.values().all(|&score| score == 0.0));
    assert!(results.category_breakdown.is_empty());

    // A zero-score respondent still gets a full, well-formed ranking.
    let ranked = engine.rank_alignment(0.0, 0.0);
    assert_eq!(ranked.len(), 2);
}

#[test]
fn category_breakdown_covers_only_answered_categories() {
    let engine = AlignmentEngine::new(mirrored_bank()).unwrap();
    let answers: AnswerSet = [(1, 2)].into_iter().collect();
    let results = engine.calculate_scores(&answers);

    assert_eq!(results.category_breakdown.len(), 1);
    let taxation = &results.category_breakdown[&Category::Taxation];
    assert_eq!(taxation.economic, 2.0);
    assert_eq!(taxation.answered, 1);
}

#[test]
fn stale_and_neutral_answers_do_not_perturb_results() {
    let engine = AlignmentEngine::new(mirrored_bank()).unwrap();

    let clean: AnswerSet = [(1, 2)].into_iter().collect();
    let noisy: AnswerSet = [(1, 2), (2, 0), (999, -2)].into_iter().collect();

    let clean_results = engine.calculate_scores(&clean);
    let noisy_results = engine.calculate_scores(&noisy);

    assert_eq!(clean_results.economic_score, noisy_results.economic_score);
    assert_eq!(clean_results.social_score, noisy_results.social_score);
    assert_eq!(
        clean_results.party_raw_scores,
        noisy_results.party_raw_scores
    );
}

#[test]
fn default_bank_scores_land_in_bounds() {
    let engine =
        AlignmentEngine::new(alignmeter::default_question_bank().clone()).unwrap();
    let axis_range = engine.tuning().scoring.axis_range;

    // Strongly agree with everything: scores must stay clamped.
    let everything: AnswerSet = engine
        .bank()
        .questions
        .iter()
        .map(|q| (q.id, 2))
        .collect();
    let results = engine.calculate_scores(&everything);

    assert!(results.economic_score.abs() <= axis_range);
    assert!(results.social_score.abs() <= axis_range);
}
