// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below *is* the CLI definition, and
// clap generates parsing, --help and --version from it.
// =============================================================================

use clap::Parser;
use std::time::Duration;

use link_mapper::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "link-mapper",
    version,
    about = "Map the pages reachable from a URL, up to a maximum depth",
    long_about = "link-mapper starts at a URL, follows every hyperlink up to --max-depth hops, \
                  and reports each page it visited together with the links found on it."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Maximum number of hops from the starting page
    ///
    /// Depth 0 = just the starting page
    /// Depth 1 = starting page + every page it links to
    /// etc.
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Maximum number of pages fetched at the same time
    #[arg(long, default_value_t = 50)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = link_mapper::config::DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Treat "page#a" and "page#b" as different pages
    #[arg(long)]
    pub keep_fragments: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            concurrency: self.concurrency,
            strip_fragments: !self.keep_fragments,
            ..Default::default()
        }
    }
}
