use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal summary
    Terminal,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "alignmeter")]
#[command(about = "Political alignment scoring and landscape mapping", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Question bank JSON file (defaults to the embedded bank)
    #[arg(long, global = true)]
    pub bank: Option<PathBuf>,

    /// Tuning config TOML file (defaults to alignmeter.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an answer file and rank party alignment
    Score {
        /// Answers JSON file: an object of question id to answer in -2..=2
        answers: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Near-tie window in percentage points
        #[arg(long)]
        tie_threshold: Option<f64>,
    },

    /// Print every party's position in the two-dimensional space
    Positions {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Compare two parties: key differences, common ground, and which
    /// answers were pivotal
    Compare {
        /// First party id
        party_a: String,

        /// Second party id
        party_b: String,

        /// Answers JSON file
        answers: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Maximum entries per list
        #[arg(long)]
        limit: Option<usize>,
    },
}
