//! Sparse decomposition of a URL

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// The parts of a URL, named as the WHATWG URL standard names them
///
/// `protocol`, `hostname` and `pathname` are always present. The other
/// fields are only set when the URL gives them a non-empty value. Usernames
/// and passwords are not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUrl {
    /// Network protocol, with its trailing `:` (e.g. `https:`)
    pub protocol: String,

    /// The server where the remote data is hosted
    pub hostname: String,

    /// Port number; absent when the URL uses the protocol's default port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// The path; at least `/` for hierarchical URLs
    pub pathname: String,

    /// Query string, with its leading `?`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Query string as decoded key/value pairs, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_params: Option<Vec<(String, String)>>,

    /// Fragment, with its leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl ParsedUrl {
    /// Replace the query string, keeping `search_params` in step
    pub(crate) fn set_search(&mut self, search: Option<&str>) {
        match search.filter(|s| !s.is_empty()) {
            Some(search) => {
                self.search_params = Some(search_params_of(search));
                self.search = Some(search.to_string());
            }
            None => {
                self.search = None;
                self.search_params = None;
            }
        }
    }

    /// Replace the fragment
    pub(crate) fn set_hash(&mut self, hash: Option<&str>) {
        self.hash = hash.filter(|h| !h.is_empty()).map(str::to_string);
    }
}

/// Decode a query string (with or without its leading `?`) into pairs
pub fn search_params_of(search: &str) -> Vec<(String, String)> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_params_of() {
        assert_eq!(
            search_params_of("?with=search&a=b%20c"),
            vec![
                ("with".to_string(), "search".to_string()),
                ("a".to_string(), "b c".to_string()),
            ]
        );
        assert_eq!(search_params_of("x=1"), vec![("x".to_string(), "1".to_string())]);
        assert!(search_params_of("").is_empty());
    }

    #[test]
    fn test_set_search_clears_params() {
        let mut parsed = ParsedUrl::default();
        parsed.set_search(Some("?a=1"));
        assert_eq!(parsed.search.as_deref(), Some("?a=1"));
        assert_eq!(parsed.search_params.as_ref().map(Vec::len), Some(1));

        parsed.set_search(None);
        assert!(parsed.search.is_none());
        assert!(parsed.search_params.is_none());
    }

    #[test]
    fn test_serializes_sparsely() {
        let parsed = ParsedUrl {
            protocol: "http:".into(),
            hostname: "example.com".into(),
            pathname: "/".into(),
            ..ParsedUrl::default()
        };

        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({ "protocol": "http:", "hostname": "example.com", "pathname": "/" })
        );
    }

    #[test]
    fn test_serializes_every_field_that_is_set() {
        let mut parsed = ParsedUrl {
            protocol: "http:".into(),
            hostname: "example.com".into(),
            port: Some(8080),
            pathname: "/a".into(),
            ..ParsedUrl::default()
        };
        parsed.set_search(Some("?k=v"));
        parsed.set_hash(Some("#top"));

        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({
                "protocol": "http:",
                "hostname": "example.com",
                "port": 8080,
                "pathname": "/a",
                "search": "?k=v",
                "searchParams": [["k", "v"]],
                "hash": "#top",
            })
        );
    }
}
