//! Crawl report types
//!
//! The report collects what each driver did: which pages were saved, which
//! page visits failed, and which external assets could not be loaded.

use crate::config::Strategy;
use crate::crawler::{AssetFailure, PageVisit, ReferenceKind};
use crate::MirrorError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A page that was fetched and stored
#[derive(Debug, Clone)]
pub struct SavedPage {
    pub url: String,
    pub directory: PathBuf,
    /// Link distance from the root page
    pub depth: u32,
    /// Number of admitted links on the page, duplicates included
    pub links_found: usize,
    pub css_bytes: usize,
    pub js_bytes: usize,
}

/// A page visit that failed
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub url: String,
    pub directory: PathBuf,
    pub depth: u32,
    pub error: String,
}

/// An external stylesheet or script that failed to load on some page
#[derive(Debug, Clone)]
pub struct PageAssetFailure {
    pub page: String,
    pub kind: ReferenceKind,
    pub asset: String,
    pub message: String,
}

/// Summary of one crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub root_url: String,
    pub strategy: Strategy,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub pages: Vec<SavedPage>,
    pub failures: Vec<PageFailure>,
    pub asset_failures: Vec<PageAssetFailure>,
}

impl CrawlReport {
    /// Starts an empty report timestamped now
    pub fn new(root_url: &str, strategy: Strategy) -> Self {
        Self {
            root_url: root_url.to_string(),
            strategy,
            started_at: Utc::now(),
            finished_at: None,
            pages: Vec::new(),
            failures: Vec::new(),
            asset_failures: Vec::new(),
        }
    }

    /// Records a saved page and its asset failures
    pub fn record_page(&mut self, visit: &PageVisit, depth: u32) {
        self.pages.push(SavedPage {
            url: visit.url.clone(),
            directory: visit.directory.clone(),
            depth,
            links_found: visit.links.len(),
            css_bytes: visit.css_bytes,
            js_bytes: visit.js_bytes,
        });

        self.asset_failures
            .extend(visit.asset_failures.iter().map(|failure: &AssetFailure| {
                PageAssetFailure {
                    page: visit.url.clone(),
                    kind: failure.kind,
                    asset: failure.asset.clone(),
                    message: failure.message.clone(),
                }
            }));
    }

    /// Records a failed page visit
    pub fn record_failure(&mut self, url: &str, directory: PathBuf, depth: u32, error: &MirrorError) {
        self.failures.push(PageFailure {
            url: url.to_string(),
            directory,
            depth,
            error: error.to_string(),
        });
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Returns true if the root page itself could not be mirrored
    pub fn root_failed(&self) -> bool {
        self.failures.iter().any(|failure| failure.depth == 0)
    }

    /// Number of page visits attempted
    pub fn pages_attempted(&self) -> usize {
        self.pages.len() + self.failures.len()
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.pages.len() as f64 / attempted as f64) * 100.0
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Mirror Report ===\n");

    println!("Overview:");
    println!("  Root URL: {}", report.root_url);
    println!("  Strategy: {:?}", report.strategy);
    if let Some(duration) = report.duration() {
        println!("  Duration: {:.2}s", duration.num_milliseconds() as f64 / 1000.0);
    }
    println!("  Pages saved: {}", report.pages.len());
    println!("  Pages failed: {}", report.failures.len());
    println!("  Asset failures: {}", report.asset_failures.len());
    println!();

    if !report.failures.is_empty() {
        println!("Failed Pages:");
        for failure in &report.failures {
            println!("  - {} (depth {}): {}", failure.url, failure.depth, failure.error);
        }
        println!();
    }

    if !report.asset_failures.is_empty() {
        println!("Failed Assets:");
        for failure in &report.asset_failures {
            println!(
                "  - {:?} {} on {}: {}",
                failure.kind, failure.asset, failure.page, failure.message
            );
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages saved)",
        report.success_rate(),
        report.pages.len(),
        report.pages_attempted()
    );
}
