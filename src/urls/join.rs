//! The merge-precedence rules behind [`Url::join`] and [`Url::resolve`]
//!
//! Parts are applied left to right. Changing something earlier in a URL
//! drops everything that comes after it:
//!
//! | part          | replaces          | drops            |
//! |---------------|-------------------|------------------|
//! | full URL      | everything        |                  |
//! | `?search`     | `search`          | `hash`           |
//! | `#hash`       | `hash`            |                  |
//! | path segment  | merged `pathname` | `search`, `hash` |

use super::detect::UrlPart;
use super::href::build_parsed_href;
use super::parsed::ParsedUrl;
use super::Url;
use crate::error::Result;
use crate::paths::posix_join;

/// Apply `parts` to `from`, returning the merged parts
///
/// A full URL part goes through the same factory as `from`, so a bad URL is
/// reported through the same error hook. A protocol-relative part (`//host`)
/// takes its protocol from the parts merged so far.
pub fn join_parts_to_url(from: &Url, parts: &[&str]) -> Result<ParsedUrl> {
    let mut merged = from.parse();

    for part in parts {
        match UrlPart::classify(part) {
            UrlPart::Url(url) => {
                let current = build_parsed_href(&merged);
                merged = from.factory().from(Some(&current), url)?.parse();
            }
            UrlPart::Search(search) => {
                merged.set_search(Some(search));
                merged.set_hash(None);
            }
            UrlPart::Hash(hash) => {
                merged.set_hash(Some(hash));
            }
            UrlPart::Path(segment) => {
                let segment = escape_delimiters(segment);
                merged.pathname = posix_join(&[merged.pathname.as_str(), segment.as_str()]);
                merged.set_search(None);
                merged.set_hash(None);
            }
        }
        tracing::trace!(part, merged = ?merged, "merged url part");
    }

    Ok(merged)
}

/// `?` and `#` inside a path part are data, not delimiters
fn escape_delimiters(segment: &str) -> String {
    segment.replace('?', "%3F").replace('#', "%23")
}
