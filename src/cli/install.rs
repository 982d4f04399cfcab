use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{SnippetsConfig, DEFAULT_LANGUAGE};
use crate::merge::{merge_all, MergeStats};
use crate::store::{load_collection, load_or_empty, require_file, write_collection};

/// Merge snippet files into the editor's user snippets.
///
/// Same snippet name: the incoming snippet replaces the existing one.
/// Same prefix under a different name: the incoming snippet is skipped.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "install_snippets",
    version,
    about = "Install snippets into the editor's user snippet file (default: cpp.json)"
)]
pub struct InstallArgs {
    /// Snippet JSON files to install, merged in order
    #[arg(required = true, num_args = 1..)]
    pub snippets: Vec<PathBuf>,

    /// Snippet language; selects <language>.json in the user snippets directory
    #[arg(long, short = 'l', default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Explicit target file (skips directory resolution)
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Print the summary as one JSON object
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstallSummary {
    pub target: PathBuf,
    #[serde(flatten)]
    pub stats: MergeStats,
}

/// Resolves the target, merges every input into it and persists the result.
///
/// Nothing is written unless every input exists and parses.
pub fn install(args: &InstallArgs, cfg: &SnippetsConfig) -> Result<InstallSummary> {
    let target = match &args.target {
        Some(p) => p.clone(),
        None => cfg.clone().with_language(args.language.as_str()).target_path()?,
    };

    for p in &args.snippets {
        require_file(p)?;
    }

    let mut merged = load_or_empty(&target)?;
    let incoming = args
        .snippets
        .iter()
        .map(|p| load_collection(p))
        .collect::<Result<Vec<_>>>()?;

    let stats = merge_all(&mut merged, &incoming);
    write_collection(&target, &merged)
        .with_context(|| format!("update {}", target.display()))?;
    info!(
        "merged {} file(s) into {}: {:?}",
        incoming.len(),
        target.display(),
        stats
    );

    Ok(InstallSummary { target, stats })
}

pub fn print_summary(summary: &InstallSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }
    println!("Updated: {}", summary.target.display());
    println!(
        "Added: {}; Replaced (name conflicts): {}; Skipped (prefix conflicts/invalid): {}",
        summary.stats.added, summary.stats.replaced, summary.stats.skipped
    );
    Ok(())
}

pub fn cmd_install(args: InstallArgs) -> Result<()> {
    let cfg = SnippetsConfig::from_env();
    let summary = install(&args, &cfg)?;
    print_summary(&summary, args.json)
}
