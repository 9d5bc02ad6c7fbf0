//! find404 main entry point
//!
//! This is the command-line interface for the broken-link crawler.

use anyhow::{Context, Result};
use clap::Parser;
use find404_crawler::config::{load_config, validate, validate_seeds, Config};
use find404_crawler::crawler::run_crawl;
use find404_crawler::output::{
    print_crawl_stats, print_log_summary, summarize_log, CRAWL_LOG_FILE_NAME,
};
use find404_crawler::url::Scope;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// find404: find the 404s your pages link to
///
/// Crawls every page reachable from the seed URLs whose address contains one
/// of the seeds, and writes one line per page to crawl-log.ndjson listing the
/// links found on it and whether each one is in scope.
#[derive(Parser, Debug)]
#[command(name = "find404")]
#[command(version)]
#[command(about = "A web crawler for finding 404 errors your pages might link to", long_about = None)]
struct Cli {
    /// Seed URLs to start crawling from
    #[arg(value_name = "URLS", required_unless_present = "summary")]
    urls: Vec<String>,

    /// Folder receiving crawl-log.ndjson
    #[arg(long, value_name = "DIR")]
    output_folder: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra allowed URL pattern (regex), in addition to the seeds
    #[arg(long = "allow", value_name = "REGEX")]
    allowed: Vec<String>,

    /// Forbidden URL pattern (regex); wins over allowed patterns
    #[arg(long = "forbid", value_name = "REGEX")]
    forbidden: Vec<String>,

    /// Seconds to wait for a page to load
    #[arg(long, value_name = "SECS")]
    page_timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate options and show the scope without crawling
    #[arg(long, conflicts_with = "summary")]
    dry_run: bool,

    /// Summarise the existing crawl log in the output folder and exit
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.summary {
        handle_summary(&config)
    } else if cli.dry_run {
        handle_dry_run(&config, &cli.urls)
    } else {
        handle_crawl(&config, &cli.urls).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("find404_crawler=info,warn"),
            1 => EnvFilter::new("find404_crawler=debug,info"),
            2 => EnvFilter::new("find404_crawler=trace,debug"),
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

/// Loads the configuration file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    config.scope.allowed.extend(cli.allowed.iter().cloned());
    config.scope.forbidden.extend(cli.forbidden.iter().cloned());
    if let Some(folder) = &cli.output_folder {
        config.output.folder = folder.clone();
    }
    if let Some(secs) = cli.page_timeout {
        config.crawler.page_timeout_secs = secs;
    }

    validate(&config).context("invalid options")?;
    Ok(config)
}

/// Handles the --summary mode: summarises an existing crawl log
fn handle_summary(config: &Config) -> Result<()> {
    let path = config.output.folder.join(CRAWL_LOG_FILE_NAME);
    println!("Crawl log: {}\n", path.display());

    let summary = summarize_log(&config.output.folder)
        .with_context(|| format!("failed to read {}", path.display()))?;
    print_log_summary(&summary);

    Ok(())
}

/// Handles the --dry-run mode: validates options and shows the scope
fn handle_dry_run(config: &Config, seeds: &[String]) -> Result<()> {
    validate_seeds(seeds)?;
    let scope = Scope::for_seeds(seeds, &config.scope.allowed, &config.scope.forbidden)?;

    println!("=== find404 Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page timeout: {}s", config.crawler.page_timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nOutput:");
    println!(
        "  Crawl log: {}",
        config.output.folder.join(CRAWL_LOG_FILE_NAME).display()
    );

    println!("\nAllowed patterns:");
    for pattern in scope.allowed_patterns() {
        println!("  - {}", pattern);
    }

    println!("\nForbidden patterns:");
    for pattern in scope.forbidden_patterns() {
        println!("  - {}", pattern);
    }

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        let verdict = if scope.evaluate(seed) {
            "in scope"
        } else {
            "out of scope, will not be fetched"
        };
        println!("  * {} ({})", seed, verdict);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seeds: &[String]) -> Result<()> {
    validate_seeds(seeds)?;
    tracing::info!("Starting crawl from {} seed URLs", seeds.len());

    let stats = run_crawl(config, seeds).await.context("crawl setup failed")?;
    print_crawl_stats(&stats);

    Ok(())
}
