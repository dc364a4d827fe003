use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use url::Url;

/// Longest readable prefix kept in a hashed directory name
const MAX_SLUG_LEN: usize = 32;

/// Number of hex characters of the SHA-256 digest kept in a hashed name
const HASH_LEN: usize = 16;

/// How the directory of a followed page is named under its parent's directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryNaming {
    /// Strip the parent's URL string from the link and replace every `/`
    /// with `_`.
    ///
    /// Distinct links can collide (`/a/b` and `/a_b` both become `_a_b`) and
    /// query strings or colons pass through unchanged. A remainder of `.` or
    /// `..` (page `/a`, link `/a..`) gets a leading `_` so the child never
    /// lands in or above its parent.
    Relative,

    /// `<slug>-<hash>`, where the hash is taken over the full link URL
    Hashed,
}

impl DirectoryNaming {
    /// Computes the directory name for `link` found on `parent_url`
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_mirror::links::DirectoryNaming;
    /// use url::Url;
    ///
    /// let link = Url::parse("https://ex.com/shop/item/5").unwrap();
    /// let name = DirectoryNaming::Relative.child_name("https://ex.com/shop", &link);
    /// assert_eq!(name, "_item_5");
    /// ```
    pub fn child_name(self, parent_url: &str, link: &Url) -> String {
        match self {
            Self::Relative => relative_name(parent_url, link),
            Self::Hashed => hashed_name(link),
        }
    }

    /// Computes the storage directory of `link` under `parent_dir`
    pub fn child_directory(self, parent_dir: &Path, parent_url: &str, link: &Url) -> PathBuf {
        parent_dir.join(self.child_name(parent_url, link))
    }
}

fn relative_name(parent_url: &str, link: &Url) -> String {
    let link = link.as_str();
    // Only the origin scope can admit a link that doesn't extend the parent
    let remainder = link.strip_prefix(parent_url).unwrap_or(link);
    match remainder {
        "." | ".." => format!("_{}", remainder),
        _ => remainder.replace('/', "_"),
    }
}

fn hashed_name(link: &Url) -> String {
    let digest = Sha256::digest(link.as_str().as_bytes());
    let hash = hex::encode(digest);
    format!("{}-{}", slug(link), &hash[..HASH_LEN])
}

/// Readable, filesystem-safe label taken from the last path segment
fn slug(link: &Url) -> String {
    let segment = link
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("");

    let cleaned: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .take(MAX_SLUG_LEN)
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "page".to_string()
    } else {
        cleaned.to_string()
    }
}
