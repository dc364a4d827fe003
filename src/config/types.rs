use crate::links::{DirectoryNaming, LinkScope};
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Mirror
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// The classic mirroring profile: depth-first
    /// recursion with no visited-set, string-prefix link filtering,
    /// prefix-stripped directory names, and every failure fatal.
    pub fn reference() -> Self {
        Self {
            crawler: CrawlerConfig {
                strategy: Strategy::Recursive,
                link_scope: LinkScope::Prefix,
                directory_naming: DirectoryNaming::Relative,
                strict_status: false,
                max_concurrent_pages: 1,
                max_depth: None,
                request_timeout_secs: None,
                cache_assets: false,
            },
            output: OutputConfig::default(),
        }
    }
}

/// How the crawl walks the link graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Depth-first recursion; any error aborts the whole crawl
    Recursive,
    /// Breadth-first worklist with a visited-set and per-page failure isolation
    Worklist,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Traversal strategy
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,

    /// Rule deciding which discovered links are followed
    #[serde(rename = "link-scope", default = "default_link_scope")]
    pub link_scope: LinkScope,

    /// How child page directories are named
    #[serde(rename = "directory-naming", default = "default_directory_naming")]
    pub directory_naming: DirectoryNaming,

    /// Treat non-2xx responses as fetch errors
    #[serde(rename = "strict-status", default = "default_strict_status")]
    pub strict_status: bool,

    /// Maximum number of pages visited at once (worklist only)
    #[serde(
        rename = "max-concurrent-pages",
        default = "default_max_concurrent_pages"
    )]
    pub max_concurrent_pages: u32,

    /// Maximum link depth from the root page (worklist only)
    #[serde(rename = "max-depth", default)]
    pub max_depth: Option<u32>,

    /// Total timeout for a single request, in seconds
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: Option<u64>,

    /// Reuse external stylesheet and script bodies across pages
    #[serde(rename = "cache-assets", default)]
    pub cache_assets: bool,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            link_scope: default_link_scope(),
            directory_naming: default_directory_naming(),
            strict_status: default_strict_status(),
            max_concurrent_pages: default_max_concurrent_pages(),
            max_depth: None,
            request_timeout_secs: default_request_timeout_secs(),
            cache_assets: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the root page is stored in
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Optional path for a markdown crawl summary
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            summary_path: None,
        }
    }
}

fn default_strategy() -> Strategy {
    Strategy::Worklist
}

fn default_link_scope() -> LinkScope {
    LinkScope::Origin
}

fn default_directory_naming() -> DirectoryNaming {
    DirectoryNaming::Hashed
}

fn default_strict_status() -> bool {
    true
}

fn default_max_concurrent_pages() -> u32 {
    4
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(30)
}

fn default_output_directory() -> String {
    "output".to_string()
}
