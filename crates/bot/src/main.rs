//! CLI for the Node.js subsystem labelling bot
//!
//! Run `github-bot --help` for usage information.

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bot::{
    BotConfig, GitHubClient, LabelOutcome, PullRequestEvent, PullRequestLabeler, PullRequestRef,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "github-bot")]
#[command(about = "Resolve and apply subsystem labels for Node.js core pull requests")]
#[command(version)]
struct Cli {
    /// Output format: json, text
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve labels for changed file paths (read from stdin when none are given)
    Resolve {
        /// Changed file paths, relative to the repository root
        paths: Vec<String>,

        /// Branch the pull request targets, e.g. v6.x
        #[arg(short, long)]
        base_branch: Option<String>,

        /// Never collapse subsystem labels into "lib / src"
        #[arg(long)]
        no_limit: bool,
    },

    /// Resolve and apply labels to an existing pull request
    LabelPr {
        /// Repository in owner/repo format
        #[arg(short, long)]
        repo: String,

        /// Pull request number
        #[arg(short, long)]
        pr: u64,

        /// Base branch of the pull request, used for the release-line label
        #[arg(short, long)]
        base_branch: Option<String>,

        /// Dry run - print labels instead of adding them
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Process a saved `pull_request` webhook payload
    HandleEvent {
        /// Path to the JSON payload
        #[arg(short, long)]
        payload: PathBuf,

        /// Dry run - print labels instead of adding them
        #[arg(short, long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Resolve {
            paths,
            base_branch,
            no_limit,
        } => {
            run_resolve(paths, base_branch.as_deref(), !no_limit, cli.format)?;
        }
        Commands::LabelPr {
            repo,
            pr,
            base_branch,
            dry_run,
        } => {
            run_label_pr(&repo, pr, base_branch.as_deref(), dry_run, cli.format).await?;
        }
        Commands::HandleEvent { payload, dry_run } => {
            run_handle_event(&payload, dry_run, cli.format).await?;
        }
    }

    Ok(())
}

fn run_resolve(
    paths: Vec<String>,
    base_branch: Option<&str>,
    limit: bool,
    format: OutputFormat,
) -> Result<()> {
    let paths = if paths.is_empty() {
        read_paths(std::io::stdin().lock())?
    } else {
        paths
    };

    let labels = labels::resolve_labels_with_limit(&paths, base_branch, limit);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&labels)?),
        OutputFormat::Text => {
            for label in &labels {
                println!("{label}");
            }
        }
    }

    Ok(())
}

fn read_paths(reader: impl BufRead) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read paths from stdin")?;
        let path = line.trim();
        if !path.is_empty() {
            paths.push(path.to_string());
        }
    }
    Ok(paths)
}

fn build_labeler(config: &BotConfig, dry_run: bool) -> Result<PullRequestLabeler> {
    let client =
        Arc::new(GitHubClient::from_config(config).context("Failed to create GitHub client")?);

    Ok(PullRequestLabeler::new(client.clone(), client.clone(), client)
        .with_cache_ttl(config.label_cache_ttl)
        .with_wait(config.wait_before_resolving)
        .with_dry_run(dry_run))
}

async fn run_label_pr(
    repo: &str,
    number: u64,
    base_branch: Option<&str>,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = BotConfig::from_env()?;
    let pr = PullRequestRef::parse(repo, number)?;
    let labeler = build_labeler(&config, dry_run)?;

    let outcome = labeler
        .label_pull_request(&pr, base_branch)
        .await
        .with_context(|| format!("Failed to label {pr}"))?;

    print_outcome(&pr, &outcome, dry_run, format)
}

async fn run_handle_event(payload: &Path, dry_run: bool, format: OutputFormat) -> Result<()> {
    let raw = tokio::fs::read_to_string(payload)
        .await
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    let event =
        PullRequestEvent::from_json(&raw).context("Failed to parse pull_request payload")?;

    let config = BotConfig::from_env()?;
    let Some(request) = event.label_request(&config.target_repo) else {
        info!(action = %event.action, repo = %event.repository.name, "Event ignored");
        println!("Event ignored");
        return Ok(());
    };

    let labeler = build_labeler(&config, dry_run)?;
    let outcome = labeler
        .label_after_wait(&request.pull_request, Some(&request.base_branch))
        .await
        .with_context(|| format!("Failed to label {}", request.pull_request))?;

    print_outcome(&request.pull_request, &outcome, dry_run, format)
}

fn print_outcome(
    pr: &PullRequestRef,
    outcome: &LabelOutcome,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "pull_request": pr,
                "resolved": outcome.resolved,
                "applied": outcome.applied,
                "dry_run": dry_run,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("{pr}");
            println!("  resolved: {}", outcome.resolved.join(", "));
            let verb = if dry_run { "would apply" } else { "applied" };
            println!("  {verb}: {}", outcome.applied.join(", "));
        }
    }
    Ok(())
}
