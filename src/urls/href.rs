//! Href assembly

use super::format_options::{UrlFormatOptions, UrlFormatShape};
use super::parsed::ParsedUrl;

/// Assemble a URL string from a structural description
///
/// Components are copied verbatim; nothing is re-encoded. The result is
/// only absolute when `parts` carries a protocol and a hostname.
///
/// ```rust
/// use datalocations::urls::{build_url_href, UrlFormatOptions};
///
/// let parts = UrlFormatOptions::new().hostname("example.com").hash("id12345");
/// assert_eq!(build_url_href(&parts), "example.com/#id12345");
/// ```
pub fn build_url_href(parts: &UrlFormatOptions) -> String {
    match parts.shape() {
        Some(UrlFormatShape::ProtocolRelative) => build_protocol_relative_href(parts),
        Some(UrlFormatShape::WithHostname) => build_href_with_hostname(parts),
        Some(_) => common_elements(parts),
        None => String::new(),
    }
}

/// The href of a decomposed absolute URL
///
/// Unlike [`build_url_href`], a protocol without a hostname is kept, so
/// `file:` and other host-less URLs stay absolute.
pub(crate) fn build_parsed_href(parsed: &ParsedUrl) -> String {
    let parts = UrlFormatOptions::from(parsed);
    match parts.protocol_part() {
        Some(protocol) if parts.hostname_part().is_none() => {
            let mut href = protocol.to_string();
            if !href.ends_with(':') {
                href.push(':');
            }
            // an empty authority keeps `file:///path` a hierarchical URL
            if parsed.pathname.starts_with('/') {
                href.push_str("//");
            }
            href + &common_elements(&parts)
        }
        _ => build_url_href(&parts),
    }
}

fn build_protocol_relative_href(parts: &UrlFormatOptions) -> String {
    let mut href = String::new();
    if parts.protocol_relative == Some(true) {
        href.push_str("//");
    }

    href.push_str(&hostname_and_port(parts));
    href.push_str(authority_separator(parts));
    href + &common_elements(parts)
}

fn build_href_with_hostname(parts: &UrlFormatOptions) -> String {
    let mut href = String::new();

    // a protocol taken from a parsed URL already ends in ':'
    if let Some(protocol) = parts.protocol_part() {
        href.push_str(protocol);
        if !protocol.ends_with(':') {
            href.push(':');
        }
        href.push_str("//");
    }

    href.push_str(&hostname_and_port(parts));
    href.push_str(authority_separator(parts));
    href + &common_elements(parts)
}

fn hostname_and_port(parts: &UrlFormatOptions) -> String {
    let hostname = parts.hostname_part().unwrap_or_default();
    match parts.port {
        Some(port) => format!("{}:{}", hostname, port),
        None => hostname.to_string(),
    }
}

/// `host/#hash`, not `host#hash`
fn authority_separator(parts: &UrlFormatOptions) -> &'static str {
    if parts.pathname_part().is_none() && (parts.search_part().is_some() || parts.hash_part().is_some()) {
        "/"
    } else {
        ""
    }
}

fn common_elements(parts: &UrlFormatOptions) -> String {
    let mut href = String::new();

    if let Some(pathname) = parts.pathname_part() {
        href.push_str(pathname);
    }
    if let Some(search) = parts.search_part() {
        href.push('?');
        href.push_str(search);
    }
    if let Some(hash) = parts.hash_part() {
        href.push('#');
        href.push_str(hash);
    }

    href
}
