//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, RankwellArgs};
use crate::error::Result;
use crate::expansion::Expansion;
use crate::scoring::{ScoreExplain, ScoreOutcome};

/// Result structure for scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scorer: String,
    pub documents: Vec<DocumentScore>,
}

/// Score of one input document.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentScore {
    pub id: String,
    #[serde(flatten)]
    pub outcome: ScoreOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreExplain>,
}

/// Result structure for expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub expander: String,
    pub tokens: Vec<TokenExpansion>,
}

/// Expansions of one input token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenExpansion {
    pub token: String,
    pub expansions: Vec<Expansion>,
}

/// Registered extension names.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtensionList {
    pub scorers: Vec<String>,
    pub expanders: Vec<String>,
}

/// Results that know how to print themselves for humans.
pub trait HumanOutput {
    /// Print the result in human-readable form.
    fn print_human(&self);
}

impl HumanOutput for ScoreReport {
    fn print_human(&self) {
        println!("Scores ({}):", self.scorer);
        println!("═══════════════");

        for doc in &self.documents {
            match doc.outcome {
                ScoreOutcome::Included(score) => println!("{}: {score:.6}", doc.id),
                ScoreOutcome::Excluded => println!("{}: excluded", doc.id),
            }
            if let Some(explain) = &doc.explain {
                for line in explain.render().lines() {
                    println!("    {line}");
                }
            }
        }
    }
}

impl HumanOutput for ExpansionReport {
    fn print_human(&self) {
        println!("Expansions ({}):", self.expander);
        println!("═══════════════");

        for token in &self.tokens {
            println!();
            println!("{}:", token.token);
            if token.expansions.is_empty() {
                println!("  (none)");
            }
            for expansion in &token.expansions {
                match expansion {
                    Expansion::Token { text, .. } => println!("  {text}"),
                    Expansion::Phrase { tokens, .. } => println!("  \"{}\"", tokens.join(" ")),
                }
            }
        }
    }
}

impl HumanOutput for ExtensionList {
    fn print_human(&self) {
        println!("Scorers:");
        println!("────────");
        for name in &self.scorers {
            println!("  {name}");
        }
        println!();
        println!("Expanders:");
        println!("──────────");
        for name in &self.expanders {
            println!("  {name}");
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &RankwellArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &RankwellArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
