use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for concurrent page visits
const MAX_CONCURRENT_PAGES: u32 = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > MAX_CONCURRENT_PAGES {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and {}, got {}",
            MAX_CONCURRENT_PAGES, config.max_concurrent_pages
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    if config.max_depth == Some(0) {
        return Err(ConfigError::Validation(
            "max_depth must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if let Some(summary_path) = &config.summary_path {
        if summary_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "summary_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the crawl root: it must be an absolute HTTP(S) URL
pub fn validate_root_url(root: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root URL '{}': {}", root, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Root URL '{}' must use the http or https scheme",
            root
        )));
    }

    Ok(url)
}
