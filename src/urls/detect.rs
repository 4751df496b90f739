//! URL shape checks
//!
//! These look only at the front of a string. They decide how a part passed
//! to [`Url::join`](super::Url::join) is merged, and whether a raw pair of
//! strings is a URL or a filepath.

use once_cell::sync::Lazy;
use regex::Regex;

/// Scheme markers: `http:`, `https:`, or a protocol-relative `//`
static URL_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:https?:|//)").unwrap());

/// Does `location` start like a URL?
pub fn is_url(location: &str) -> bool {
    URL_MARKER.is_match(location)
}

/// Is `part` a query string (`?...`)?
pub fn is_url_search(part: &str) -> bool {
    part.starts_with('?')
}

/// Is `part` a fragment (`#...`)?
pub fn is_url_hash(part: &str) -> bool {
    part.starts_with('#')
}

/// What a single part of a join changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlPart<'a> {
    /// A full URL; replaces everything
    Url(&'a str),
    /// A query string; replaces `search` and drops `hash`
    Search(&'a str),
    /// A fragment; replaces `hash`
    Hash(&'a str),
    /// A path segment; merged into `pathname`, drops `search` and `hash`
    Path(&'a str),
}

impl<'a> UrlPart<'a> {
    /// Classify `part`
    pub fn classify(part: &'a str) -> Self {
        if is_url(part) {
            UrlPart::Url(part)
        } else if is_url_search(part) {
            UrlPart::Search(part)
        } else if is_url_hash(part) {
            UrlPart::Hash(part)
        } else {
            UrlPart::Path(part)
        }
    }
}
