//! Structural description of a URL to assemble
//!
//! [`UrlFormatOptions`] is the input to
//! [`build_url_href`](super::build_url_href). Any field may be missing; the
//! fields that are present decide which [`UrlFormatShape`] the description
//! has, and the shape decides how the href is built. Empty strings count as
//! missing.

use super::parsed::ParsedUrl;
use serde::{Deserialize, Serialize};

/// The parts of a URL to assemble
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlFormatOptions {
    /// Protocol, with or without its trailing `:`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Build a protocol-relative URL (`//host/...`); `false` means no
    /// protocol at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_relative: Option<bool>,

    /// The server where the remote data is hosted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Port number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// The path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,

    /// Query string; a leading `?` is optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Fragment; a leading `#` is optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Which kind of URL a [`UrlFormatOptions`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFormatShape {
    /// Has a hostname and a protocol-relative flag
    ProtocolRelative,
    /// Has a hostname
    WithHostname,
    /// No hostname; has a path
    WithPathname,
    /// No hostname or path; has a query string
    WithSearch,
    /// Only a fragment
    WithHash,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

impl UrlFormatOptions {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Set the protocol-relative flag
    pub fn protocol_relative(mut self, protocol_relative: bool) -> Self {
        self.protocol_relative = Some(protocol_relative);
        self
    }

    /// Set the hostname
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the path
    pub fn pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = Some(pathname.into());
        self
    }

    /// Set the query string
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the fragment
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Which kind of URL this describes, or `None` when every field is
    /// missing
    pub fn shape(&self) -> Option<UrlFormatShape> {
        if self.hostname_part().is_some() {
            if self.protocol_relative.is_some() {
                Some(UrlFormatShape::ProtocolRelative)
            } else {
                Some(UrlFormatShape::WithHostname)
            }
        } else if self.pathname_part().is_some() {
            Some(UrlFormatShape::WithPathname)
        } else if self.search_part().is_some() {
            Some(UrlFormatShape::WithSearch)
        } else if self.hash_part().is_some() {
            Some(UrlFormatShape::WithHash)
        } else {
            None
        }
    }

    pub(crate) fn protocol_part(&self) -> Option<&str> {
        present(&self.protocol)
    }

    pub(crate) fn hostname_part(&self) -> Option<&str> {
        present(&self.hostname)
    }

    pub(crate) fn pathname_part(&self) -> Option<&str> {
        present(&self.pathname)
    }

    /// The query string without its leading `?`
    pub(crate) fn search_part(&self) -> Option<&str> {
        present(&self.search)
            .map(|search| search.strip_prefix('?').unwrap_or(search))
            .filter(|search| !search.is_empty())
    }

    /// The fragment without its leading `#`
    pub(crate) fn hash_part(&self) -> Option<&str> {
        present(&self.hash)
            .map(|hash| hash.strip_prefix('#').unwrap_or(hash))
            .filter(|hash| !hash.is_empty())
    }
}

impl From<&ParsedUrl> for UrlFormatOptions {
    fn from(parsed: &ParsedUrl) -> Self {
        Self {
            protocol: Some(parsed.protocol.clone()),
            protocol_relative: None,
            hostname: Some(parsed.hostname.clone()),
            port: parsed.port,
            pathname: Some(parsed.pathname.clone()),
            search: parsed.search.clone(),
            hash: parsed.hash.clone(),
        }
    }
}

impl From<ParsedUrl> for UrlFormatOptions {
    fn from(parsed: ParsedUrl) -> Self {
        Self::from(&parsed)
    }
}
