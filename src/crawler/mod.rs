//! Crawler module for mirroring pages
//!
//! This module contains the crawl engine, including:
//! - The HTTP fetch capability
//! - HTML parsing into stylesheet, script, and link references
//! - Asset aggregation with an optional shared cache
//! - The recursive and worklist crawl drivers

mod assets;
mod fetcher;
mod page;
mod parser;
mod recursive;
mod worklist;

pub use assets::{AssetCache, AssetFailure, AssetLoader, ExtractedAssets};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use page::{visit_page, PageVisit};
pub use parser::{
    parse_page, AssetSource, MalformedRef, MalformedRefPolicy, PageReferences, ReferenceKind,
};
pub use recursive::RecursiveCrawler;
pub use worklist::WorklistCrawler;

use crate::config::{validate_root_url, Config, CrawlerConfig, Strategy};
use crate::output::CrawlReport;
use crate::MirrorError;
use std::path::Path;

/// Mirrors the site at `root_url` over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the root URL
/// 2. Build the HTTP client
/// 3. Run the configured strategy into the configured output directory
///
/// # Arguments
///
/// * `config` - The mirror configuration
/// * `root_url` - Absolute http(s) URL of the first page
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl finished
/// * `Err(MirrorError)` - The crawl could not start, or a fatal error
///   stopped the recursive strategy
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::{mirror, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = mirror(&Config::default(), "https://example.com").await?;
/// println!("Saved {} pages", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn mirror(config: &Config, root_url: &str) -> Result<CrawlReport, MirrorError> {
    validate_root_url(root_url)?;
    let fetcher = HttpFetcher::from_config(&config.crawler)?;
    run_with(&fetcher, &config.crawler, root_url, Path::new(&config.output.directory)).await
}

/// Runs the configured strategy with any fetcher
pub async fn run_with<F: Fetcher + Sync>(
    fetcher: &F,
    config: &CrawlerConfig,
    root_url: &str,
    directory: &Path,
) -> Result<CrawlReport, MirrorError> {
    let cache = config.cache_assets.then(AssetCache::new);
    let loader = AssetLoader::new(fetcher, cache.as_ref());

    match config.strategy {
        Strategy::Recursive => RecursiveCrawler::new(loader, config).run(root_url, directory).await,
        Strategy::Worklist => WorklistCrawler::new(loader, config).run(root_url, directory).await,
    }
}
