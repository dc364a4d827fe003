use serde::Deserialize;
use url::Url;

/// Rule deciding whether a discovered link is part of the mirrored site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LinkScope {
    /// Keep links whose URL string starts with the page's URL string.
    ///
    /// This is a string test, not an origin test: with a base of
    /// `https://ex.com`, both `https://ex.compage` and
    /// `https://ex.com.attacker.net` pass it.
    Prefix,

    /// Keep links with the same scheme, host, and port as the page
    Origin,
}

impl LinkScope {
    /// Returns true if `candidate` should be followed from `page_url`
    ///
    /// # Arguments
    ///
    /// * `page_url` - The page's URL string, exactly as it was requested
    /// * `candidate` - The link, already resolved against `page_url`
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_mirror::links::LinkScope;
    /// use url::Url;
    ///
    /// let about = Url::parse("https://ex.com/about").unwrap();
    /// assert!(LinkScope::Prefix.admits("https://ex.com", &about));
    /// assert!(LinkScope::Origin.admits("https://ex.com", &about));
    ///
    /// let lookalike = Url::parse("https://ex.compage").unwrap();
    /// assert!(LinkScope::Prefix.admits("https://ex.com", &lookalike));
    /// assert!(!LinkScope::Origin.admits("https://ex.com", &lookalike));
    /// ```
    pub fn admits(self, page_url: &str, candidate: &Url) -> bool {
        match self {
            Self::Prefix => candidate.as_str().starts_with(page_url),
            Self::Origin => match Url::parse(page_url) {
                // Opaque origins (mailto:, data:) are never equal to anything
                Ok(base) => base.origin().is_tuple() && base.origin() == candidate.origin(),
                Err(_) => false,
            },
        }
    }
}
