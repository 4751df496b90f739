//! The URL parser behind [`Url`](super::Url)

use std::fmt;
use url::{ParseError, Url as WhatwgUrl};

/// Parses a (possibly relative) location against an optional base
///
/// Implementations must follow WHATWG URL semantics: the result is always an
/// absolute URL, and input that cannot become one is an error.
pub trait UrlApi: fmt::Debug + Send + Sync {
    /// Parse `location`, resolving it against `base` when one is given
    fn parse(&self, location: &str, base: Option<&str>) -> Result<WhatwgUrl, ParseError>;
}

/// [`UrlApi`] backed by the `url` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatwgUrlApi;

impl UrlApi for WhatwgUrlApi {
    fn parse(&self, location: &str, base: Option<&str>) -> Result<WhatwgUrl, ParseError> {
        match base {
            Some(base) => WhatwgUrl::parse(base)?.join(location),
            None => WhatwgUrl::parse(location),
        }
    }
}
