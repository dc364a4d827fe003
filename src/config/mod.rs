//! Configuration module for Sumi-Mirror
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key is optional; [`Config::default`] is the worklist crawl and
//! [`Config::reference`] is the classic recursive mirror.
//!
//! # Example
//!
//! ```no_run
//! use sumi_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirror.toml")).unwrap();
//! println!("Strategy: {:?}", config.crawler.strategy);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, Strategy};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_root_url};
