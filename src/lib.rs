//! Sumi-Mirror: a recursive website mirroring tool
//!
//! This crate downloads a page's HTML, gathers the stylesheet and script
//! content it references, and follows same-site hyperlinks, storing every
//! visited page in its own directory.

pub mod config;
pub mod crawler;
pub mod links;
pub mod output;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sumi-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Malformed URL '{input}': {source}")]
    MalformedUrl {
        input: String,
        source: ::url::ParseError,
    },

    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Failed to write {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors raised by the HTTP fetch capability
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sumi-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{mirror, run_with, Fetcher, HttpFetcher};
pub use links::{resolve, DirectoryNaming, LinkScope};
pub use output::CrawlReport;
