//! Location values
//!
//! A location is an immutable `(base, location)` pair that resolves to one
//! canonical string. [`DataLocation`] is the contract every concrete location
//! satisfies; [`Location`] picks the right concrete type for a pair of raw
//! strings.

use crate::capabilities::{Extended, Extension};
use crate::error::Result;
use crate::filepaths::Filepath;
use crate::urls::{is_url, Url};
use std::fmt;
use std::str::FromStr;

/// The contract shared by every location value
pub trait DataLocation: fmt::Display + fmt::Debug {
    /// Where we are: the anchor `location` was applied to, if known
    fn base(&self) -> Option<&str>;

    /// The (possibly relative) location that was applied to `base`
    fn location(&self) -> &str;

    /// The canonical string this location resolves to
    fn value_of(&self) -> &str;

    /// Names of the operations this type supports natively
    fn operations(&self) -> &'static [&'static str];

    /// Does this value provide the named operation?
    fn implements_operation(&self, name: &str) -> bool {
        self.operations().contains(&name)
    }

    /// Does this value provide every one of the named operations?
    ///
    /// Operations count whether they are native or were attached with
    /// [`add_extension`](DataLocation::add_extension).
    fn implements_capability(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.implements_operation(name))
    }

    /// Attach extra operations, returning a new value; `self` is unchanged
    fn add_extension(&self, extension: &Extension) -> Extended<Self>
    where
        Self: Clone + Sized,
    {
        Extended::new(self.clone(), extension)
    }
}

/// A location of either kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// File system path
    Filepath(Filepath),
    /// URL (http, https, ...)
    Url(Url),
}

impl Location {
    /// Build a location, detecting whether the pair describes a URL or a
    /// filepath
    ///
    /// The pair is a URL when either side looks like one; otherwise both
    /// sides are treated as filesystem paths.
    pub fn parse(base: Option<&str>, location: &str) -> Result<Self> {
        if is_url(location) || base.map_or(false, is_url) {
            Ok(Location::Url(Url::from(base, location)?))
        } else {
            Ok(Location::Filepath(Filepath::from(base, location)?))
        }
    }

    /// Check if this is a remote location (URL)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        matches!(self, Location::Filepath(_))
    }

    /// The filepath, if this is one
    pub fn as_filepath(&self) -> Option<&Filepath> {
        match self {
            Location::Filepath(path) => Some(path),
            Location::Url(_) => None,
        }
    }

    /// The URL, if this is one
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Location::Url(url) => Some(url),
            Location::Filepath(_) => None,
        }
    }

    fn inner(&self) -> &dyn DataLocation {
        match self {
            Location::Filepath(path) => path,
            Location::Url(url) => url,
        }
    }
}

impl DataLocation for Location {
    fn base(&self) -> Option<&str> {
        self.inner().base()
    }

    fn location(&self) -> &str {
        self.inner().location()
    }

    fn value_of(&self) -> &str {
        self.inner().value_of()
    }

    fn operations(&self) -> &'static [&'static str] {
        self.inner().operations()
    }
}

impl FromStr for Location {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Location::parse(None, s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value_of())
    }
}

impl From<Filepath> for Location {
    fn from(path: Filepath) -> Self {
        Location::Filepath(path)
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Location::Url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_url() {
        let loc: Location = "http://example.com/data.json".parse().unwrap();
        assert!(matches!(loc, Location::Url(_)));
        assert!(loc.is_remote());
        assert_eq!(loc.value_of(), "http://example.com/data.json");
    }

    #[test]
    fn test_location_from_path() {
        let loc: Location = "/tmp/data.json".parse().unwrap();
        assert!(matches!(loc, Location::Filepath(_)));
        assert!(loc.is_file());
        assert!(loc.as_filepath().is_some());
        assert!(loc.as_url().is_none());
    }

    #[test]
    fn test_url_base_makes_a_url() {
        let loc = Location::parse(Some("https://example.com/api/"), "v1/data.json").unwrap();
        assert!(loc.is_remote());
        assert_eq!(loc.base(), Some("https://example.com/api/"));
        assert_eq!(loc.location(), "v1/data.json");
        assert_eq!(loc.to_string(), "https://example.com/api/v1/data.json");
    }

    #[test]
    fn test_relative_url_without_base_is_a_path() {
        let loc = Location::parse(Some("/tmp"), "example").unwrap();
        assert!(loc.is_file());
        assert_eq!(loc.base(), Some("/tmp"));
    }

    #[test]
    fn test_operations_follow_the_variant() {
        let path: Location = "/tmp".parse().unwrap();
        let url: Location = "http://example.com".parse().unwrap();
        assert!(path.implements_capability(&["basename", "to_namespaced_path"]));
        assert!(!path.implements_operation("origin"));
        assert!(url.implements_capability(&["origin", "search_params"]));
    }
}
