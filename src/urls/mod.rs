//! URL locations
//!
//! A [`Url`] resolves its `base` and `location` once, through an injected
//! [`UrlApi`], into an absolute WHATWG URL. Its getters follow the WHATWG
//! names, so `protocol` keeps its trailing `:`, `search` keeps its `?`, and
//! missing components come back as empty strings.
//!
//! [`Url::join`] and [`Url::resolve`] merge further parts into the URL using
//! the rules in [`join_parts_to_url`]. Usernames and passwords are not
//! supported, and there are no setters.

mod api;
mod detect;
mod format_options;
mod href;
mod join;
mod parsed;

pub use api::{UrlApi, WhatwgUrlApi};
pub use detect::{is_url, is_url_hash, is_url_search, UrlPart};
pub use format_options::{UrlFormatOptions, UrlFormatShape};
pub use href::build_url_href;
use href::build_parsed_href;
pub use join::join_parts_to_url;
pub use parsed::{search_params_of, ParsedUrl};

use crate::config::Config;
use crate::error::{Error, OnError, Result};
use crate::locations::DataLocation;
use crate::paths::posix_dirname;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;
use url::Url as WhatwgUrl;

const URL_OPERATIONS: &[&str] = &[
    "base",
    "location",
    "value_of",
    "hash",
    "host",
    "hostname",
    "href",
    "origin",
    "pathname",
    "port",
    "protocol",
    "search",
    "search_params",
    "to_json",
    "dirname",
    "join",
    "parse",
    "resolve",
];

/// Builds [`Url`] values with an injected [`UrlApi`] and error hook
#[derive(Debug, Clone)]
pub struct UrlFactory {
    url_api: Arc<dyn UrlApi>,
    on_error: OnError,
}

impl Default for UrlFactory {
    fn default() -> Self {
        Config::default().urls()
    }
}

impl UrlFactory {
    /// Create a factory using `url_api` and the default error hook
    pub fn new(url_api: Arc<dyn UrlApi>) -> Self {
        Self {
            url_api,
            on_error: OnError::default(),
        }
    }

    /// Set the error hook
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// The URL parser every URL from this factory uses
    pub fn url_api(&self) -> &Arc<dyn UrlApi> {
        &self.url_api
    }

    /// Build a URL from an optional `base` and a (possibly relative)
    /// `location`
    ///
    /// Fails with [`Error::NotAUrl`] if the pair does not resolve to an
    /// absolute URL.
    pub fn from(&self, base: Option<&str>, location: &str) -> Result<Url> {
        let parsed = self
            .url_api
            .parse(location, base)
            .map_err(|source| self.on_error.report(Error::not_a_url(base, location, source)))?;
        tracing::trace!(?base, location, href = parsed.as_str(), "built url");

        Ok(Url {
            base: base.map(str::to_string),
            location: location.to_string(),
            parsed,
            factory: self.clone(),
        })
    }

    /// Build a URL that is its own `base`
    pub fn from_base(&self, base: &str) -> Result<Url> {
        self.from(Some(base), "")
    }

    /// Build a URL with no `base`; `location` must be absolute
    pub fn from_location(&self, location: &str) -> Result<Url> {
        self.from(None, location)
    }

    /// Build a URL from a structural description
    pub fn format(&self, base: Option<&str>, parts: &UrlFormatOptions) -> Result<Url> {
        self.from(base, &build_url_href(parts))
    }
}

/// A URL, built from an optional base and a (possibly relative) location
#[derive(Debug, Clone)]
pub struct Url {
    base: Option<String>,
    location: String,
    parsed: WhatwgUrl,
    factory: UrlFactory,
}

impl Url {
    /// Build a URL with the default factory
    pub fn from(base: Option<&str>, location: &str) -> Result<Self> {
        UrlFactory::default().from(base, location)
    }

    /// Build a URL that is its own `base`, with the default factory
    pub fn from_base(base: &str) -> Result<Self> {
        UrlFactory::default().from_base(base)
    }

    /// Build a URL with no `base`, with the default factory
    pub fn from_location(location: &str) -> Result<Self> {
        UrlFactory::default().from_location(location)
    }

    /// Build a URL from a structural description, with the default factory
    pub fn format(base: Option<&str>, parts: &UrlFormatOptions) -> Result<Self> {
        UrlFactory::default().format(base, parts)
    }

    /// The factory this URL was built with
    pub fn factory(&self) -> &UrlFactory {
        &self.factory
    }

    /// The underlying parsed URL
    pub fn as_whatwg(&self) -> &WhatwgUrl {
        &self.parsed
    }

    /// The `#fragment`, or an empty string
    pub fn hash(&self) -> String {
        match self.parsed.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
            _ => String::new(),
        }
    }

    /// `hostname:port`, or just the hostname when the port is the default
    pub fn host(&self) -> String {
        match self.parsed.port() {
            Some(port) => format!("{}:{}", self.hostname(), port),
            None => self.hostname().to_string(),
        }
    }

    /// The hostname, or an empty string
    pub fn hostname(&self) -> &str {
        self.parsed.host_str().unwrap_or_default()
    }

    /// The whole URL
    pub fn href(&self) -> &str {
        self.parsed.as_str()
    }

    /// `protocol://hostname:port`
    pub fn origin(&self) -> String {
        self.parsed.origin().ascii_serialization()
    }

    /// The path
    pub fn pathname(&self) -> &str {
        self.parsed.path()
    }

    /// The port as a string; empty when missing or the protocol's default
    pub fn port(&self) -> String {
        self.port_number().map(|port| port.to_string()).unwrap_or_default()
    }

    /// The port; `None` when missing or the protocol's default
    pub fn port_number(&self) -> Option<u16> {
        self.parsed.port()
    }

    /// The protocol, with its trailing `:`
    pub fn protocol(&self) -> String {
        format!("{}:", self.parsed.scheme())
    }

    /// The `?query`, or an empty string
    pub fn search(&self) -> String {
        match self.parsed.query() {
            Some(query) if !query.is_empty() => format!("?{}", query),
            _ => String::new(),
        }
    }

    /// The query string as decoded key/value pairs
    pub fn search_params(&self) -> Vec<(String, String)> {
        self.parsed.query_pairs().into_owned().collect()
    }

    /// The URL as a plain string (not a quoted JSON string)
    pub fn to_json(&self) -> String {
        self.href().to_string()
    }

    /// The parent of this URL
    ///
    /// The returned URL has the same `base` as this one, and no `search` or
    /// `hash`.
    pub fn dirname(&self) -> Result<Url> {
        let mut parts = self.parse();
        parts.pathname = posix_dirname(&parts.pathname);
        parts.set_search(None);
        parts.set_hash(None);

        self.factory.from(self.base(), &build_parsed_href(&parts))
    }

    /// Merge `parts` into this URL
    ///
    /// The returned URL has the same `base` as this one.
    pub fn join(&self, parts: &[&str]) -> Result<Url> {
        let merged = join_parts_to_url(self, parts)?;
        self.factory.from(self.base(), &build_parsed_href(&merged))
    }

    /// Break this URL down into its parts
    pub fn parse(&self) -> ParsedUrl {
        let mut parsed = ParsedUrl {
            protocol: self.protocol(),
            hostname: self.hostname().to_string(),
            port: self.port_number(),
            pathname: self.pathname().to_string(),
            ..ParsedUrl::default()
        };
        parsed.set_search(Some(&self.search()));
        parsed.set_hash(Some(&self.hash()));
        parsed
    }

    /// Merge `parts` into this URL, anchoring the result here
    ///
    /// The returned URL has this URL's href as its `base`.
    pub fn resolve(&self, parts: &[&str]) -> Result<Url> {
        let merged = join_parts_to_url(self, parts)?;
        self.factory.from(Some(self.href()), &build_parsed_href(&merged))
    }
}

impl DataLocation for Url {
    fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn value_of(&self) -> &str {
        self.href()
    }

    fn operations(&self) -> &'static [&'static str] {
        URL_OPERATIONS
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.href() == other.href()
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.href().hash(state);
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.href()
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.parsed.into()
    }
}

impl FromStr for Url {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Url::from_location(s)
    }
}

impl Serialize for Url {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.href())
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let href = String::deserialize(deserializer)?;
        Url::from_location(&href).map_err(serde::de::Error::custom)
    }
}
