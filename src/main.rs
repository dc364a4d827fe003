//! Sumi-Mirror main entry point
//!
//! This is the command-line interface for the Sumi-Mirror website mirror.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_mirror::config::{load_config, validate, Config, Strategy};
use sumi_mirror::output::{generate_markdown_summary, print_report};
use tracing_subscriber::EnvFilter;

/// Sumi-Mirror: a recursive website mirroring tool
///
/// Downloads a page's HTML together with its stylesheets and scripts, then
/// follows same-site links and stores every page in its own directory.
#[derive(Parser, Debug)]
#[command(name = "sumi-mirror")]
#[command(version = "1.0.0")]
#[command(about = "A recursive website mirroring tool", long_about = None)]
struct Cli {
    /// Absolute URL of the first page to mirror
    #[arg(value_name = "ROOT_URL")]
    root_url: String,

    /// Directory the root page is stored in [default: output]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE", conflicts_with = "reference")]
    config: Option<PathBuf>,

    /// Classic mode: recursive, prefix-filtered, fatal on any error
    #[arg(long)]
    reference: bool,

    /// Traversal strategy
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Write a markdown summary of the crawl to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::info!(
        "Mirroring {} into {} ({:?} strategy)",
        cli.root_url,
        config.output.directory,
        config.crawler.strategy
    );

    let report = match sumi_mirror::mirror(&config, &cli.root_url).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).with_context(|| format!("failed to mirror {}", cli.root_url));
        }
    };

    if !cli.quiet {
        print_report(&report);
    }

    if let Some(summary_path) = &config.output.summary_path {
        generate_markdown_summary(&report, Path::new(summary_path))
            .with_context(|| format!("failed to write summary to {}", summary_path))?;
        tracing::info!("Summary written to {}", summary_path);
    }

    if report.root_failed() {
        bail!("root page {} could not be mirrored", cli.root_url);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_mirror=info,warn"),
            1 => EnvFilter::new("sumi_mirror=debug,info"),
            2 => EnvFilter::new("sumi_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, cli.reference) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        (None, true) => Config::reference(),
        (None, false) => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.directory = output.to_string_lossy().into_owned();
    }
    if let Some(strategy) = cli.strategy {
        config.crawler.strategy = strategy;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.to_string_lossy().into_owned());
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}
