use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use alignmeter::cli::{Cli, Commands, OutputFormat};
use alignmeter::{
    default_question_bank, load_answers, load_question_bank, AlignmentEngine, AnswerSet,
    CommonGroundItem, KeyDifference, PartyAlignment, PartyId, PivotalQuestion, QuizResults,
    RespondentSide, TopAlignment, TuningConfig,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let bank = match &cli.bank {
        Some(path) => load_question_bank(path)?,
        None => default_question_bank().clone(),
    };
    let tuning = match &cli.config {
        Some(path) => TuningConfig::from_file(path)?,
        None => TuningConfig::load()?,
    };
    let engine = AlignmentEngine::with_tuning(bank, tuning)?;

    match cli.command {
        Commands::Score {
            answers,
            format,
            tie_threshold,
        } => {
            let answers = load_answers(&answers)?;
            let threshold =
                tie_threshold.unwrap_or(engine.tuning().alignment.tie_threshold);
            handle_score(&engine, &answers, threshold, format)
        }
        Commands::Positions { format } => handle_positions(&engine, format),
        Commands::Compare {
            party_a,
            party_b,
            answers,
            format,
            limit,
        } => {
            let answers = load_answers(&answers)?;
            let limit = limit.unwrap_or(engine.tuning().differential.result_limit);
            handle_compare(&engine, &party_a, &party_b, &answers, limit, format)
        }
    }
}

#[derive(Serialize)]
struct ScoreReport {
    generated_at: DateTime<Utc>,
    results: QuizResults,
    rankings: Vec<PartyAlignment>,
    top: Option<TopAlignment>,
}

#[derive(Serialize)]
struct CompareReport {
    generated_at: DateTime<Utc>,
    party_a: PartyId,
    party_b: PartyId,
    key_differences: Vec<KeyDifference>,
    common_ground: Vec<CommonGroundItem>,
    pivotal: Vec<PivotalQuestion>,
}

fn handle_score(
    engine: &AlignmentEngine,
    answers: &AnswerSet,
    threshold: f64,
    format: OutputFormat,
) -> Result<()> {
    let results = engine.calculate_scores(answers);
    let rankings = engine.rank_alignment(results.economic_score, results.social_score);
    let top = engine.top_aligned(results.economic_score, results.social_score, threshold);

    match format {
        OutputFormat::Json => {
            let report = ScoreReport {
                generated_at: Utc::now(),
                results,
                rankings,
                top,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Terminal => {
            println!(
                "{}  economic {:+.2}  social {:+.2}  ({} answered)",
                "Your position".bold(),
                results.economic_score,
                results.social_score,
                results.answers.len()
            );
            println!();
            for alignment in &rankings {
                println!(
                    "  {:>5.1}%  {}  (distance {:.2})",
                    alignment.alignment_pct,
                    alignment.party.as_str().bold(),
                    alignment.distance
                );
            }
            if let Some(top) = &top {
                println!();
                if top.is_tie {
                    let close: Vec<&str> = top
                        .close_ones
                        .iter()
                        .map(|a| a.party.as_str())
                        .collect();
                    println!(
                        "{} {} is your closest match, but {} within {:.0} points",
                        "Near tie:".yellow().bold(),
                        top.best.party,
                        close.join(", "),
                        threshold
                    );
                } else {
                    println!(
                        "{} {}",
                        "Closest match:".green().bold(),
                        top.best.party
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_positions(engine: &AlignmentEngine, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(engine.party_positions())?);
        }
        OutputFormat::Terminal => {
            for (party, position) in engine.all_positions() {
                println!(
                    "  {:<6} economic {:+6.2}  social {:+6.2}",
                    party.as_str().bold(),
                    position.economic,
                    position.social
                );
            }
            let centroid = engine.party_positions().centroid;
            println!(
                "  {:<6} economic {:+6.2}  social {:+6.2}",
                "mean".dimmed(),
                centroid.economic,
                centroid.social
            );
        }
    }
    Ok(())
}

fn handle_compare(
    engine: &AlignmentEngine,
    party_a: &str,
    party_b: &str,
    answers: &AnswerSet,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let party_a = PartyId::from(party_a);
    let party_b = PartyId::from(party_b);
    for party in [&party_a, &party_b] {
        if !engine.bank().contains_party(party) {
            bail!("unknown party id '{}'", party);
        }
    }

    let key_differences = engine.key_differences(&party_a, &party_b, answers, limit);
    let common_ground = engine.common_ground(&party_a, &party_b, limit);
    let pivotal = engine.pivotal_impact(answers, &party_a, &party_b);

    match format {
        OutputFormat::Json => {
            let report = CompareReport {
                generated_at: Utc::now(),
                party_a,
                party_b,
                key_differences,
                common_ground,
                pivotal,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Terminal => {
            println!("{}", "Key differences".bold());
            for diff in &key_differences {
                let side = match &diff.respondent_side {
                    RespondentSide::Both => "you: both".to_string(),
                    RespondentSide::Neither => "you: neither".to_string(),
                    RespondentSide::Party(id) => format!("you: {}", id),
                };
                println!(
                    "  [{}] {}  ({} {:+}, {} {:+}; {})",
                    diff.gap,
                    diff.text,
                    party_a,
                    diff.stance_a,
                    party_b,
                    diff.stance_b,
                    side.cyan()
                );
            }

            println!();
            println!("{}", "Common ground".bold());
            for item in &common_ground {
                println!("  {}  {}", item.label.label().green(), item.text);
            }

            println!();
            println!("{}", "Pivotal questions".bold());
            for question in pivotal.iter().take(limit) {
                let toward = if question.favors_a() {
                    party_a.as_str()
                } else if question.favors_b() {
                    party_b.as_str()
                } else {
                    "neither"
                };
                println!(
                    "  {:+4}  {}  (toward {})",
                    question.net,
                    question.text,
                    toward.bold()
                );
            }
        }
    }
    Ok(())
}
