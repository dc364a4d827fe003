//! A single page visit: fetch, persist HTML, parse, aggregate assets,
//! persist assets.

use crate::crawler::assets::{AssetFailure, AssetLoader};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{parse_page, MalformedRefPolicy};
use crate::links::LinkScope;
use crate::storage::{ensure_directory, write_assets, write_html};
use crate::MirrorError;
use std::path::{Path, PathBuf};
use url::Url;

/// Result of a successful page visit
#[derive(Debug, Clone)]
pub struct PageVisit {
    /// The page URL string as requested
    pub url: String,
    pub directory: PathBuf,
    /// Admitted links in document order, duplicates included
    pub links: Vec<Url>,
    pub css_bytes: usize,
    pub js_bytes: usize,
    pub asset_failures: Vec<AssetFailure>,
}

/// Visits one page and stores it in `directory`
///
/// The raw HTML is written before parsing, so a page with an unresolvable
/// reference still leaves its HTML on disk. Nothing is written if the page
/// fetch fails.
///
/// # Arguments
///
/// * `loader` - Fetcher and optional asset cache
/// * `page_url` - The page's URL string; also the base for its references
/// * `directory` - Where the page's files go
/// * `scope` - Which links are returned for further crawling
/// * `policy` - What to do with unresolvable references
///
/// # Returns
///
/// * `Ok(PageVisit)` - The page and its assets were saved
/// * `Err(MirrorError)` - The URL or a reference was malformed, the fetch
///   failed, or a file could not be written
pub async fn visit_page<F: Fetcher + Sync>(
    loader: &AssetLoader<'_, F>,
    page_url: &str,
    directory: &Path,
    scope: LinkScope,
    policy: MalformedRefPolicy,
) -> Result<PageVisit, MirrorError> {
    let url = Url::parse(page_url).map_err(|source| MirrorError::MalformedUrl {
        input: page_url.to_string(),
        source,
    })?;

    let body = loader
        .fetcher()
        .fetch(&url)
        .await
        .map_err(|source| MirrorError::Fetch {
            url: page_url.to_string(),
            source,
        })?;

    ensure_directory(directory)?;
    write_html(directory, &body)?;

    let refs = parse_page(&body, page_url, scope, policy)?;
    for malformed in refs.malformed.iter() {
        tracing::warn!(
            "Skipping malformed reference '{}' on {}: {}",
            malformed.raw,
            page_url,
            malformed.message
        );
    }

    let assets = loader.extract(refs).await;
    write_assets(directory, &assets.css, &assets.js)?;

    tracing::info!("Found {} links on {}", assets.links.len(), page_url);

    Ok(PageVisit {
        url: page_url.to_string(),
        directory: directory.to_path_buf(),
        links: assets.links,
        css_bytes: assets.css.len(),
        js_bytes: assets.js.len(),
        asset_failures: assets.failures,
    })
}
