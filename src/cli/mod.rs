//! Command-line interface for repo-to-text
//!
//! Collects a local directory (`--path`) or a GitHub repository (`--repo`)
//! into `<repo>_contents.txt`. Without either flag the tool asks interactively.

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::collect::{Run, Target};
use crate::config::{load_config, merge_cli_with_config, CliOverrides, Config};

mod prompt;

pub use prompt::{prompt_source_kind, prompt_target};

/// Flatten a repository into a single text file for LLM prompting
#[derive(Parser)]
#[command(name = "repo-to-text")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local directory to collect
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// GitHub repository URL to collect (requires GITHUB_TOKEN)
    #[arg(short = 'r', long, value_name = "URL")]
    pub repo: Option<String>,

    /// Git ref (branch/tag/SHA) when using --repo
    #[arg(long = "ref", value_name = "REF")]
    pub ref_: Option<String>,

    /// Path to config file (repo-to-text.toml or .yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Template prepended to the output; ##REPO_NAME## is replaced
    #[arg(short = 't', long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Directory for the output file
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if cli.path.is_some() && cli.repo.is_some() {
        bail!("Cannot specify both --path and --repo");
    }

    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, cli.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            path: cli.path,
            repo_url: cli.repo,
            ref_: cli.ref_,
            template: cli.template,
            output_dir: cli.output_dir,
        },
    );

    let target = resolve_target(&config)?;
    tracing::debug!(kind = %target.kind(), "target selected");

    let outcome = Run::new(&config)
        .show_progress(true)
        .execute(&target)
        .with_context(|| format!("Failed to collect {}", describe(&target)))?;

    println!(
        "{}",
        style(format!("Repository contents saved to '{}'.", outcome.output_path.display()))
            .green()
    );
    Ok(())
}

/// Target from flags or config, falling back to the interactive prompt.
fn resolve_target(config: &Config) -> Result<Target> {
    if let Some(path) = &config.path {
        return Ok(Target::Local(path.clone()));
    }
    if let Some(repo_url) = &config.repo_url {
        return Ok(Target::Remote(repo_url.clone()));
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    prompt_target(&mut input, &mut output)
}

fn describe(target: &Target) -> String {
    match target {
        Target::Local(path) => path.display().to_string(),
        Target::Remote(url) => url.clone(),
    }
}
