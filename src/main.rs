// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Validate the starting URL before anything is fetched
// 4. Run the crawl and print the report
// 5. Exit with proper code (0 = all pages fetched, 1 = some pages failed,
//    2 = invalid input or internal error)
// =============================================================================

mod cli;

use anyhow::{bail, Result};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use link_mapper::{is_crawlable, report, CrawlStats, Crawler};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays parseable
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_mapper=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Reject bad input before any request is made
    if !is_crawlable(&cli.url) {
        bail!("invalid URL '{}': expected an absolute URL with a scheme and a host", cli.url);
    }

    let stats = Arc::new(CrawlStats::new());
    let crawler = Crawler::from_config(&cli.crawl_config())?.with_observer(stats.clone());

    let result = crawler.run(&cli.url, cli.max_depth).await?;

    tracing::info!(
        attempted = stats.fetches_attempted(),
        failed = stats.fetches_failed(),
        records = stats.records_produced(),
        "crawl stats"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        report::write_json(&mut handle, &result)?;
    } else {
        report::write_table(&mut handle, &result)?;
    }

    if result.error_count() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
