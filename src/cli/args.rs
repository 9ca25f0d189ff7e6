//! Command line argument parsing for the Rankwell CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::expansion::{Language, PhoneticOption};

/// Rankwell - relevance scoring and query term expansion
#[derive(Parser, Debug, Clone)]
#[command(name = "rankwell")]
#[command(about = "Score result trees and expand query terms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RankwellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RankwellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Score candidate documents read from a JSON file
    Score(ScoreArgs),

    /// Expand query tokens
    Expand(ExpandArgs),

    /// List registered scorers and expanders
    List,
}

/// Arguments for scoring
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Input file with index stats, payload and documents (JSON)
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Scorer name
    #[arg(short, long)]
    pub scorer: Option<String>,

    /// Pruning threshold; documents proven below it score 0
    #[arg(long, default_value = "0")]
    pub min_score: f64,

    /// Build explanation trees
    #[arg(short, long)]
    pub explain: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for expansion
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Tokens to expand
    #[arg(value_name = "TOKEN", required = true)]
    pub tokens: Vec<String>,

    /// Expander name
    #[arg(short, long)]
    pub expander: Option<String>,

    /// Query language
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Synonym groups file (JSON)
    #[arg(long, value_name = "SYNONYM_FILE")]
    pub synonyms: Option<PathBuf>,

    /// Phonetic matching request
    #[arg(long, value_enum, default_value = "default")]
    pub phonetic: PhoneticArg,

    /// Restrict tokens to these fields
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Phonetic matching request on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneticArg {
    /// Apply when a targeted field supports it
    Default,
    /// Require phonetic matching
    Enabled,
    /// Refuse phonetic matching
    Disabled,
}

impl From<PhoneticArg> for PhoneticOption {
    fn from(arg: PhoneticArg) -> Self {
        match arg {
            PhoneticArg::Default => PhoneticOption::Default,
            PhoneticArg::Enabled => PhoneticOption::Enabled,
            PhoneticArg::Disabled => PhoneticOption::Disabled,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
