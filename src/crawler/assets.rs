//! Stylesheet and script aggregation
//!
//! Every source contributes its bytes followed by a newline. External bodies
//! are kept exactly as fetched, whatever their encoding. A failed
//! external fetch contributes nothing and is returned as an
//! [`AssetFailure`] alongside the aggregated text, so callers decide whether
//! to record or ignore it.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{AssetSource, PageReferences, ReferenceKind};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// An external stylesheet or script that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFailure {
    pub kind: ReferenceKind,
    /// The asset URL, or the raw reference when it could not be resolved
    pub asset: String,
    pub message: String,
}

/// Aggregated assets of one page
#[derive(Debug, Clone, Default)]
pub struct ExtractedAssets {
    pub css: Vec<u8>,
    pub js: Vec<u8>,
    pub links: Vec<Url>,
    pub failures: Vec<AssetFailure>,
}

/// Bodies of external assets shared by all pages of one crawl
#[derive(Debug, Default)]
pub struct AssetCache {
    entries: Mutex<HashMap<Url, Vec<u8>>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, url: &Url) -> Option<Vec<u8>> {
        self.entries.lock().ok()?.get(url).cloned()
    }

    fn insert(&self, url: Url, body: Vec<u8>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(url, body);
        }
    }

    /// Number of cached assets
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads external assets through a fetcher and an optional cache
pub struct AssetLoader<'a, F> {
    fetcher: &'a F,
    cache: Option<&'a AssetCache>,
}

impl<'a, F: Fetcher + Sync> AssetLoader<'a, F> {
    pub fn new(fetcher: &'a F, cache: Option<&'a AssetCache>) -> Self {
        Self { fetcher, cache }
    }

    /// The underlying fetcher, used for page requests which bypass the cache
    pub fn fetcher(&self) -> &'a F {
        self.fetcher
    }

    /// Fetches and aggregates the stylesheets and scripts of a page
    ///
    /// Stylesheets keep the order of [`PageReferences::stylesheets`] (linked
    /// sheets before inline styles), scripts keep document order. References
    /// that failed to resolve are reported as failures.
    pub async fn extract(&self, refs: PageReferences) -> ExtractedAssets {
        let mut failures: Vec<AssetFailure> = refs
            .malformed
            .iter()
            .filter(|m| m.kind != ReferenceKind::Hyperlink)
            .map(|m| AssetFailure {
                kind: m.kind,
                asset: m.raw.clone(),
                message: m.message.clone(),
            })
            .collect();

        let css = self
            .aggregate(ReferenceKind::Stylesheet, &refs.stylesheets, &mut failures)
            .await;
        let js = self
            .aggregate(ReferenceKind::Script, &refs.scripts, &mut failures)
            .await;

        ExtractedAssets {
            css,
            js,
            links: refs.links,
            failures,
        }
    }

    async fn aggregate(
        &self,
        kind: ReferenceKind,
        sources: &[AssetSource],
        failures: &mut Vec<AssetFailure>,
    ) -> Vec<u8> {
        let mut content = Vec::new();

        for source in sources {
            match source {
                AssetSource::Inline(text) => {
                    content.extend_from_slice(text.as_bytes());
                    content.push(b'\n');
                }
                AssetSource::External(url) => match self.load(url).await {
                    Ok(body) => {
                        content.extend_from_slice(&body);
                        content.push(b'\n');
                    }
                    Err(e) => {
                        tracing::debug!("Failed to fetch asset {}: {}", url, e);
                        failures.push(AssetFailure {
                            kind,
                            asset: url.to_string(),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        content
    }

    async fn load(&self, url: &Url) -> Result<Vec<u8>, crate::FetchError> {
        if let Some(body) = self.cache.and_then(|cache| cache.get(url)) {
            tracing::trace!("Asset cache hit: {}", url);
            return Ok(body);
        }

        let body = self.fetcher.fetch(url).await?;

        if let Some(cache) = self.cache {
            cache.insert(url.clone(), body.clone());
        }

        Ok(body)
    }
}
