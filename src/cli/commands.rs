//! Command implementations for the Rankwell CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::RankwellConfig;
use crate::error::{RankwellError, Result};
use crate::expansion::{ExpansionContext, ExpansionSession, FIELD_MASK_ALL, QueryToken};
use crate::extension::ExtensionRegistry;
use crate::scoring::{
    Candidate, DocumentMetadata, IndexStats, ResultNode, ScoringContext, score_candidates,
};

/// Input of the `score` command.
#[derive(Debug, Deserialize)]
pub struct ScoreInput {
    /// Corpus-wide statistics.
    #[serde(default)]
    pub stats: IndexStats,
    /// Query-side payload.
    #[serde(default)]
    pub payload: Vec<u8>,
    /// Candidate documents.
    pub documents: Vec<InputDocument>,
}

/// One candidate document of a [`ScoreInput`].
#[derive(Debug, Deserialize)]
pub struct InputDocument {
    /// Identifier echoed in the output; defaults to the position in the input.
    #[serde(default)]
    pub id: Option<String>,
    /// Document metadata.
    pub metadata: DocumentMetadata,
    /// Result tree of the document.
    pub result: ResultNode,
}

/// Execute a CLI command.
pub fn execute_command(args: RankwellArgs) -> Result<()> {
    let registry = ExtensionRegistry::with_defaults();
    match &args.command {
        Command::Score(score_args) => score_documents(score_args, &registry, &args),
        Command::Expand(expand_args) => expand_tokens(expand_args, &registry, &args),
        Command::List => list_extensions(&registry, &args),
    }
}

fn load_config(path: Option<&Path>) -> Result<RankwellConfig> {
    match path {
        Some(path) => {
            debug!("loading config from {}", path.display());
            RankwellConfig::load(path)
        }
        None => Ok(RankwellConfig::default()),
    }
}

/// Score the documents of an input file.
fn score_documents(
    args: &ScoreArgs,
    registry: &ExtensionRegistry,
    cli_args: &RankwellArgs,
) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let scorer_name = args.scorer.as_deref().unwrap_or(&config.scorer);
    let scorer = registry.require_scorer(scorer_name)?;

    let content = fs::read_to_string(&args.input).map_err(|e| {
        RankwellError::other(format!(
            "Failed to read input file '{}': {}",
            args.input.display(),
            e
        ))
    })?;
    let input: ScoreInput = serde_json::from_str(&content)?;
    info!(
        "scoring {} documents with {scorer_name}",
        input.documents.len()
    );

    let ctx = ScoringContext::new(input.stats)
        .with_explain(args.explain || config.explain)
        .with_payload(input.payload);

    let (ids, candidates): (Vec<String>, Vec<Candidate>) = input
        .documents
        .into_iter()
        .enumerate()
        .map(|(i, doc)| {
            let id = doc.id.unwrap_or_else(|| i.to_string());
            let candidate = Candidate {
                result: doc.result,
                metadata: doc.metadata,
            };
            (id, candidate)
        })
        .unzip();

    let results = score_candidates(scorer.as_ref(), &ctx, &candidates, args.min_score);

    let documents = ids
        .into_iter()
        .zip(results)
        .map(|(id, result)| DocumentScore {
            id,
            outcome: result.outcome,
            explain: result.explain,
        })
        .collect();

    output_result(
        "Scoring finished",
        &ScoreReport {
            scorer: scorer_name.to_string(),
            documents,
        },
        cli_args,
    )
}

/// Expand query tokens.
fn expand_tokens(
    args: &ExpandArgs,
    registry: &ExtensionRegistry,
    cli_args: &RankwellArgs,
) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(synonyms) = &args.synonyms {
        config.synonyms_path = Some(synonyms.clone());
    }

    let expander_name = args.expander.as_deref().unwrap_or(&config.expander);
    let expander = registry.require_expander(expander_name)?;
    let synonyms = config.load_synonyms()?;

    let field_mask = if args.fields.is_empty() {
        FIELD_MASK_ALL
    } else {
        config.schema.field_mask(&args.fields)?
    };

    let mut ctx = ExpansionContext::new(config.language, &config.schema);
    if let Some(synonyms) = &synonyms {
        ctx = ctx.with_synonyms(synonyms);
    }

    // All tokens belong to one query and share the expander state
    let mut session = ExpansionSession::new(expander, ctx);
    let tokens = args
        .tokens
        .iter()
        .map(|text| {
            let token = QueryToken::new(text.as_str())
                .with_field_mask(field_mask)
                .with_phonetic(args.phonetic.into());
            Ok(TokenExpansion {
                token: text.clone(),
                expansions: session.expand(&token)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    output_result(
        "Expansion finished",
        &ExpansionReport {
            expander: expander_name.to_string(),
            tokens,
        },
        cli_args,
    )
}

/// List registered scorers and expanders.
fn list_extensions(registry: &ExtensionRegistry, cli_args: &RankwellArgs) -> Result<()> {
    output_result(
        "Registered extensions",
        &ExtensionList {
            scorers: registry
                .scorer_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            expanders: registry
                .expander_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        },
        cli_args,
    )
}
