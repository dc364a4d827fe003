//! Link handling module for Sumi-Mirror
//!
//! This module resolves references found in markup against the page they
//! appear on, decides which hyperlinks belong to the mirrored site, and
//! derives the directory each followed page is stored in.

mod naming;
mod scope;

use crate::MirrorError;
use url::Url;

pub use naming::DirectoryNaming;
pub use scope::LinkScope;

/// Resolves a possibly-relative reference against a base URL
///
/// Resolution follows the standard reference-resolution rules: a reference
/// with a scheme replaces the base entirely, a reference starting with `/`
/// keeps the base's scheme and authority, and anything else is joined onto
/// the base's path with dot segments removed.
///
/// # Arguments
///
/// * `base` - The absolute URL the reference appeared on
/// * `reference` - The raw `href`/`src` value
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(MirrorError::MalformedUrl)` - Either input could not be parsed
///
/// # Examples
///
/// ```
/// use sumi_mirror::links::resolve;
///
/// let url = resolve("https://ex.com/a/b", "../c").unwrap();
/// assert_eq!(url.as_str(), "https://ex.com/c");
///
/// let url = resolve("https://ex.com", "https://other.com/y").unwrap();
/// assert_eq!(url.as_str(), "https://other.com/y");
/// ```
pub fn resolve(base: &str, reference: &str) -> Result<Url, MirrorError> {
    let base_url = Url::parse(base).map_err(|source| MirrorError::MalformedUrl {
        input: base.to_string(),
        source,
    })?;

    base_url
        .join(reference)
        .map_err(|source| MirrorError::MalformedUrl {
            input: reference.to_string(),
            source,
        })
}

/// Returns the identity of the document a URL points at
///
/// The fragment never reaches the server, so `page#a` and `page#b` are the
/// same document.
pub fn page_identity(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
