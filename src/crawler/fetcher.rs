//! HTTP fetcher implementation
//!
//! This module provides the "fetch bytes given a URL" capability used for
//! pages and for external stylesheets and scripts:
//! - The [`Fetcher`] trait the crawl drivers are generic over
//! - [`HttpFetcher`], the reqwest-backed implementation
//! - Error classification into [`FetchError`]

use crate::config::CrawlerConfig;
use crate::FetchError;
use reqwest::Client;
use std::future::Future;
use url::Url;

/// Capability to fetch the body of a URL
pub trait Fetcher {
    /// Fetches `url` and returns its body
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Builds an HTTP client with the configured timeout
///
/// No custom headers are sent and redirects follow reqwest's default policy.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::CrawlerConfig;
/// use sumi_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);

    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    strict_status: bool,
}

impl HttpFetcher {
    /// Creates a fetcher from an existing client
    ///
    /// With `strict_status`, any non-2xx response is a [`FetchError::Status`];
    /// otherwise the body of every response is returned as content.
    pub fn new(client: Client, strict_status: bool) -> Self {
        Self {
            client,
            strict_status,
        }
    }

    /// Builds the client and fetcher from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, config.strict_status))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Err(classify_error(e)),
        };

        let status = response.status();
        if self.strict_status && !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        match response.bytes().await {
            Ok(body) => Ok(body.to_vec()),
            Err(e) if e.is_timeout() => Err(FetchError::Timeout),
            Err(e) => Err(FetchError::Body(e)),
        }
    }
}

/// Maps a reqwest send error onto the fetch error taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else {
        FetchError::Request(e)
    }
}
