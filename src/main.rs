//! Verse-Miner main entry point
//!
//! Command-line interface for the Verse-Miner lyrics harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use verse_miner::config::load_config;
use verse_miner::crawler::crawl;

/// Verse-Miner: a single-domain lyrics harvester
///
/// Verse-Miner starts from configured category listing pages, follows
/// song, artist and album links within one allowed domain, and writes one
/// JSON-lines record per qualifying song.
#[derive(Parser, Debug)]
#[command(name = "verse-miner")]
#[command(version = "1.0.0")]
#[command(about = "A single-domain lyrics harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("verse_miner=info,warn"),
            1 => EnvFilter::new("verse_miner=debug,info"),
            2 => EnvFilter::new("verse_miner=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &verse_miner::config::Config) {
    println!("=== Verse-Miner Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Allowed domain: {}", config.crawler.allowed_domain);
    println!("  Pagination bound: {}", config.crawler.max_category_pages);
    println!("  Target language: {}", config.crawler.target_language);
    println!(
        "  Max concurrent pages: {}",
        config.crawler.max_concurrent_pages_open
    );

    println!("\nCategory Seeds ({}):", config.crawler.category_seeds.len());
    for seed in &config.crawler.category_seeds {
        println!("  - {}", seed);
    }

    println!(
        "\nExcluded Artists ({}):",
        config.crawler.excluded_artists.len()
    );
    for artist in &config.crawler.excluded_artists {
        println!("  - {}", artist);
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Records directory: {}", config.output.records_dir);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling from {} seed URLs",
        config.crawler.category_seeds.len()
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: verse_miner::config::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} starting from {} category seeds",
        config.crawler.allowed_domain,
        config.crawler.category_seeds.len()
    );

    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
