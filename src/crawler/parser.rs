//! HTML parser for extracting asset and link references
//!
//! This module parses a page's markup and collects, in document order:
//! - Stylesheet sources: every `<link rel="stylesheet" href>` first, then
//!   every inline `<style>` element
//! - Script sources: every `<script>`, external `src` or inline text
//! - Hyperlinks from `<a href>` that pass the link scope
//!
//! All references are resolved against the current page's URL. The parsed
//! document is dropped before returning so nothing borrowed from it is held
//! across later network requests.

use crate::links::{resolve, LinkScope};
use crate::MirrorError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Where a stylesheet or script comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Fetched from an absolute URL
    External(Url),
    /// Text content of the element itself
    Inline(String),
}

/// Kind of element a reference was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Stylesheet,
    Script,
    Hyperlink,
}

/// A reference that could not be resolved to a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRef {
    pub kind: ReferenceKind,
    pub raw: String,
    pub message: String,
}

/// What to do with a reference that cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRefPolicy {
    /// Fail the page with [`MirrorError::MalformedUrl`]
    Abort,
    /// Record it in [`PageReferences::malformed`] and carry on
    Skip,
}

/// Everything a page visit needs from the parsed document
#[derive(Debug, Clone, Default)]
pub struct PageReferences {
    pub stylesheets: Vec<AssetSource>,
    pub scripts: Vec<AssetSource>,
    /// Admitted hyperlinks in document order, duplicates included
    pub links: Vec<Url>,
    pub malformed: Vec<MalformedRef>,
}

/// Decodes a page body and parses its references
///
/// The body is decoded as UTF-8 with invalid sequences replaced, so pages in
/// legacy encodings still yield their links and assets. Only the parsed view
/// is affected; the stored HTML keeps the fetched bytes.
///
/// # Arguments
///
/// * `body` - The raw page body
/// * `page_url` - The page's URL string, used as the base for every reference
/// * `scope` - The rule deciding which hyperlinks are kept
/// * `policy` - What to do with unresolvable references
///
/// # Returns
///
/// * `Ok(PageReferences)` - The collected references
/// * `Err(MirrorError::MalformedUrl)` - A reference could not be resolved
///   under [`MalformedRefPolicy::Abort`]
///
/// # Example
///
/// ```
/// use sumi_mirror::crawler::{parse_page, MalformedRefPolicy};
/// use sumi_mirror::links::LinkScope;
///
/// let html = br#"<html><body><a href="/about">About</a></body></html>"#;
/// let refs = parse_page(html, "https://ex.com", LinkScope::Prefix, MalformedRefPolicy::Abort).unwrap();
/// assert_eq!(refs.links[0].as_str(), "https://ex.com/about");
/// ```
pub fn parse_page(
    body: &[u8],
    page_url: &str,
    scope: LinkScope,
    policy: MalformedRefPolicy,
) -> Result<PageReferences, MirrorError> {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);
    let mut collector = Collector {
        page_url,
        policy,
        refs: PageReferences::default(),
    };

    collector.collect_stylesheets(&document)?;
    collector.collect_scripts(&document)?;
    collector.collect_links(&document, scope)?;

    Ok(collector.refs)
}

struct Collector<'a> {
    page_url: &'a str,
    policy: MalformedRefPolicy,
    refs: PageReferences,
}

impl Collector<'_> {
    fn collect_stylesheets(&mut self, document: &Html) -> Result<(), MirrorError> {
        if let Ok(link_selector) = Selector::parse("link[rel='stylesheet']") {
            for element in document.select(&link_selector) {
                if let Some(href) = element.value().attr("href") {
                    if let Some(url) = self.resolve(ReferenceKind::Stylesheet, href)? {
                        self.refs.stylesheets.push(AssetSource::External(url));
                    }
                }
            }
        }

        if let Ok(style_selector) = Selector::parse("style") {
            for element in document.select(&style_selector) {
                self.refs.stylesheets.push(AssetSource::Inline(text_of(element)));
            }
        }

        Ok(())
    }

    fn collect_scripts(&mut self, document: &Html) -> Result<(), MirrorError> {
        if let Ok(script_selector) = Selector::parse("script") {
            for element in document.select(&script_selector) {
                match element.value().attr("src") {
                    Some(src) => {
                        if let Some(url) = self.resolve(ReferenceKind::Script, src)? {
                            self.refs.scripts.push(AssetSource::External(url));
                        }
                    }
                    None => self.refs.scripts.push(AssetSource::Inline(text_of(element))),
                }
            }
        }

        Ok(())
    }

    fn collect_links(&mut self, document: &Html, scope: LinkScope) -> Result<(), MirrorError> {
        if let Ok(a_selector) = Selector::parse("a[href]") {
            for element in document.select(&a_selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };

                if let Some(url) = self.resolve(ReferenceKind::Hyperlink, href)? {
                    if scope.admits(self.page_url, &url) {
                        self.refs.links.push(url);
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolves a reference, applying the malformed-reference policy
    fn resolve(&mut self, kind: ReferenceKind, raw: &str) -> Result<Option<Url>, MirrorError> {
        match resolve(self.page_url, raw) {
            Ok(url) => Ok(Some(url)),
            Err(e) if self.policy == MalformedRefPolicy::Skip => {
                self.refs.malformed.push(MalformedRef {
                    kind,
                    raw: raw.to_string(),
                    message: e.to_string(),
                });
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
