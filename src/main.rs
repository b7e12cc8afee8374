//! Funnelweb main entry point
//!
//! This is the command-line interface for crawling a bounded web domain
//! and searching the index a crawl produces.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use funnelweb::config::{load_or_default, Config};
use funnelweb::crawler::HttpFetcher;
use funnelweb::query::QueryEngine;
use funnelweb::storage::{CrawlMeta, IndexStore, SqliteStorage};
use funnelweb::text::Normalizer;
use funnelweb::CrawlCoordinator;

/// Funnelweb: a bounded-domain web crawler and search index
///
/// `crawl` walks every page reachable from a start URL whose hostname
/// matches a pattern, builds a word index of what it finds, and saves it
/// to a database file. `search` answers queries against a saved index.
#[derive(Parser, Debug)]
#[command(name = "funnelweb")]
#[command(version)]
#[command(about = "Crawl a bounded web domain and search what it finds", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site and save the index it builds
    Crawl {
        /// The page the crawl fans out from
        start_url: String,

        /// Regular expression a page's hostname must match to be crawled
        host_pattern: String,

        /// How many levels of links to follow from the start page
        max_depth: u32,

        /// Where to write the index database
        #[arg(short, long, default_value = "index.db")]
        output: PathBuf,

        /// Path to TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Search a saved index for pages containing every word
    Search {
        /// An index database written by `crawl`
        index_file: PathBuf,

        /// Words a page must contain to match
        #[arg(required = true)]
        words: Vec<String>,

        /// Path to TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl {
            start_url,
            host_pattern,
            max_depth,
            output,
            config,
        } => handle_crawl(&start_url, &host_pattern, max_depth, &output, config.as_deref()).await,
        Command::Search {
            index_file,
            words,
            config,
        } => handle_search(&index_file, &words, config.as_deref()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("funnelweb=info,warn"),
            1 => EnvFilter::new("funnelweb=debug,info"),
            2 => EnvFilter::new("funnelweb=trace,debug"),
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

/// Builds the normalizer shared by a crawl and the queries against it
fn build_normalizer(config: &Config) -> anyhow::Result<Arc<Normalizer>> {
    let normalizer = match &config.text.stopwords_path {
        Some(path) => Normalizer::from_file(Path::new(path))
            .with_context(|| format!("failed to read stop words from {path}"))?,
        None => Normalizer::new(),
    };
    Ok(Arc::new(normalizer))
}

/// Handles the `crawl` subcommand
async fn handle_crawl(
    start_url: &str,
    host_pattern: &str,
    max_depth: u32,
    output: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_or_default(config_path)?;
    let normalizer = build_normalizer(&config)?;
    let fetcher = Arc::new(HttpFetcher::new(&config).context("failed to build HTTP client")?);

    let started_at = chrono::Utc::now();
    let coordinator = CrawlCoordinator::new(config.crawler.workers, fetcher, normalizer);
    let outcome = coordinator.crawl(start_url, host_pattern, max_depth).await?;

    let meta = CrawlMeta {
        start_url: start_url.to_string(),
        host_pattern: host_pattern.to_string(),
        max_depth,
        workers: config.crawler.workers,
        started_at,
        finished_at: chrono::Utc::now(),
    };
    let mut storage = SqliteStorage::new(output)
        .with_context(|| format!("failed to open {}", output.display()))?;
    storage.save_index(&outcome.index, &meta)?;

    println!(
        "Crawled {} pages ({} distinct words) in {:.1}s",
        outcome.stats.pages_visited,
        outcome.stats.distinct_tokens,
        outcome.stats.duration.as_secs_f64()
    );
    println!("Index written to {}", output.display());

    Ok(())
}

/// Handles the `search` subcommand
fn handle_search(
    index_file: &Path,
    words: &[String],
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    if !index_file.exists() {
        bail!(
            "no index found at {}; run a crawl first",
            index_file.display()
        );
    }

    let config = load_or_default(config_path)?;
    let normalizer = build_normalizer(&config)?;

    let storage = SqliteStorage::new(index_file)
        .with_context(|| format!("failed to open {}", index_file.display()))?;
    if let Some(crawl) = storage.latest_crawl()? {
        tracing::info!(
            "searching index of {} ({} pages, finished {})",
            crawl.start_url,
            crawl.page_count,
            crawl.finished_at
        );
    }
    let index = storage.load_index()?;

    let engine = QueryEngine::new(normalizer);
    let hits = engine.search(&index, words);

    // An empty result is an answer, not an error.
    if hits.is_empty() {
        println!("No pages matched.");
        return Ok(());
    }
    for page in &hits {
        println!("{:>6}  {}", page.rank(), page.url());
    }

    Ok(())
}
