//! Output module for crawl reports and summaries
//!
//! This module handles:
//! - Collecting saved pages and failures into a [`CrawlReport`]
//! - Printing the report to stdout
//! - Writing an optional markdown summary

mod markdown;
mod report;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{print_report, CrawlReport, PageAssetFailure, PageFailure, SavedPage};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
