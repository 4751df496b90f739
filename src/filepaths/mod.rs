//! Filesystem path locations
//!
//! A [`Filepath`] resolves its `base` and `location` once, when it is built,
//! and answers every later question from that resolved path. The thing it
//! points at does not have to exist.
//!
//! Derivations differ in what they keep:
//!
//! - [`Filepath::dirname`] and [`Filepath::join`] keep the receiver's `base`
//! - [`Filepath::resolve`] makes the receiver the new `base`

mod detect;

pub use detect::{is_filepath, must_be_filepath};

use crate::config::Config;
use crate::error::{OnError, Result};
use crate::locations::DataLocation;
use crate::paths::{ParsedPath, PathApi};
use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

const FILEPATH_OPERATIONS: &[&str] = &[
    "base",
    "location",
    "value_of",
    "basename",
    "dirname",
    "extname",
    "is_absolute",
    "join",
    "parse",
    "relative",
    "resolve",
    "to_namespaced_path",
];

/// Builds [`Filepath`] values with an injected [`PathApi`] and error hook
#[derive(Debug, Clone)]
pub struct FilepathFactory {
    path_api: Arc<dyn PathApi>,
    on_error: OnError,
}

impl Default for FilepathFactory {
    fn default() -> Self {
        Config::default().filepaths()
    }
}

impl FilepathFactory {
    /// Create a factory using `path_api` and the default error hook
    pub fn new(path_api: Arc<dyn PathApi>) -> Self {
        Self {
            path_api,
            on_error: OnError::default(),
        }
    }

    /// Set the error hook
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// The path API every filepath from this factory uses
    pub fn path_api(&self) -> &Arc<dyn PathApi> {
        &self.path_api
    }

    /// Build a filepath from an optional `base` and a `location`
    ///
    /// Fails with [`Error::NotAFilepath`](crate::Error::NotAFilepath) if
    /// either side looks like a URL.
    pub fn from(&self, base: Option<&str>, location: &str) -> Result<Filepath> {
        must_be_filepath(base, location, &self.on_error)?;

        // calculate the actual path ONCE
        let resolved = match base {
            Some(base) => self.path_api.resolve(&[base, location]),
            None => location.to_string(),
        };
        let path = self.path_api.normalize(&resolved);
        tracing::trace!(?base, location, %path, "built filepath");

        Ok(Filepath {
            base: base.map(str::to_string),
            location: location.to_string(),
            path,
            parts: OnceCell::new(),
            factory: self.clone(),
        })
    }

    /// Build a filepath that is its own `base`
    pub fn from_base(&self, base: &str) -> Result<Filepath> {
        self.from(Some(base), "")
    }

    /// Build a filepath with no `base`
    pub fn from_location(&self, location: &str) -> Result<Filepath> {
        self.from(None, location)
    }

    /// Build a filepath from its parsed parts
    pub fn format(&self, base: Option<&str>, parts: &ParsedPath) -> Result<Filepath> {
        self.from(base, &self.path_api.format(parts))
    }
}

/// A path to a file, folder or other entry in a filesystem
#[derive(Debug, Clone)]
pub struct Filepath {
    base: Option<String>,
    location: String,
    path: String,
    parts: OnceCell<ParsedPath>,
    factory: FilepathFactory,
}

impl Filepath {
    /// Build a filepath with the default factory
    pub fn from(base: Option<&str>, location: &str) -> Result<Self> {
        FilepathFactory::default().from(base, location)
    }

    /// Build a filepath that is its own `base`, with the default factory
    pub fn from_base(base: &str) -> Result<Self> {
        FilepathFactory::default().from_base(base)
    }

    /// Build a filepath with no `base`, with the default factory
    pub fn from_location(location: &str) -> Result<Self> {
        FilepathFactory::default().from_location(location)
    }

    /// Build a filepath from parsed parts, with the default factory
    pub fn format(base: Option<&str>, parts: &ParsedPath) -> Result<Self> {
        FilepathFactory::default().format(base, parts)
    }

    /// The path API this filepath was built with
    pub fn path_api(&self) -> &Arc<dyn PathApi> {
        self.factory.path_api()
    }

    /// The factory this filepath was built with
    pub fn factory(&self) -> &FilepathFactory {
        &self.factory
    }

    /// The final segment of the path, with `suffix` stripped if it matches
    pub fn basename(&self, suffix: Option<&str>) -> String {
        self.path_api().basename(&self.path, suffix)
    }

    /// The parent of this path
    ///
    /// The returned filepath has the same `base` as this one.
    pub fn dirname(&self) -> Result<Filepath> {
        let parent = self.path_api().dirname(&self.path);
        self.factory.from(self.base(), &parent)
    }

    /// The file extension, or an empty string
    pub fn extname(&self) -> String {
        self.path_api().extname(&self.path)
    }

    /// Does this path start from a root?
    pub fn is_absolute(&self) -> bool {
        self.path_api().is_absolute(&self.path)
    }

    /// Append `segments` to this filepath's `location`
    ///
    /// The returned filepath has the same `base` as this one.
    pub fn join(&self, segments: &[&str]) -> Result<Filepath> {
        let mut paths = Vec::with_capacity(segments.len() + 1);
        paths.push(self.location.as_str());
        paths.extend_from_slice(segments);

        let location = self.path_api().join(&paths);
        self.factory.from(self.base(), &location)
    }

    /// The structure of this path, computed on first use
    pub fn parse(&self) -> &ParsedPath {
        self.parts.get_or_init(|| self.path_api().parse(&self.path))
    }

    /// The relative path from this filepath to `to`
    pub fn relative(&self, to: &Filepath) -> String {
        self.path_api().relative(&self.path, &to.path)
    }

    /// Resolve `segments` against this filepath
    ///
    /// The returned filepath has this filepath's resolved path as its `base`.
    pub fn resolve(&self, segments: &[&str]) -> Result<Filepath> {
        let mut paths = Vec::with_capacity(segments.len() + 1);
        paths.push(self.path.as_str());
        paths.extend_from_slice(segments);

        let location = self.path_api().resolve(&paths);
        self.factory.from(Some(&self.path), &location)
    }

    /// The Win32 namespaced form of this path; the plain path elsewhere
    pub fn to_namespaced_path(&self) -> String {
        self.path_api().to_namespaced_path(&self.path)
    }
}

impl DataLocation for Filepath {
    fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn value_of(&self) -> &str {
        &self.path
    }

    fn operations(&self) -> &'static [&'static str] {
        FILEPATH_OPERATIONS
    }
}

impl PartialEq for Filepath {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.path == other.path
    }
}

impl Eq for Filepath {}

impl Hash for Filepath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.path.hash(state);
    }
}

impl fmt::Display for Filepath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for Filepath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl From<Filepath> for String {
    fn from(path: Filepath) -> Self {
        path.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PosixPath;

    fn posix() -> FilepathFactory {
        FilepathFactory::new(Arc::new(PosixPath::new().with_cwd("/home/user/project")))
    }

    #[test]
    fn test_from_resolves_base_and_location() {
        let path = posix().from(Some("."), "..").unwrap();
        assert_eq!(path.value_of(), "/home/user");
        assert_eq!(path.base(), Some("."));
        assert_eq!(path.location(), "..");
    }

    #[test]
    fn test_from_without_base_only_normalizes() {
        let path = posix().from(None, "./a/../b/").unwrap();
        assert_eq!(path.value_of(), "b/");
        assert!(!path.is_absolute());
    }

    #[test]
    fn test_from_base() {
        let path = posix().from_base("/tmp/example").unwrap();
        assert_eq!(path.base(), Some("/tmp/example"));
        assert_eq!(path.location(), "");
        assert_eq!(path.value_of(), "/tmp/example");
    }

    #[test]
    fn test_from_location() {
        let path = posix().from_location("/tmp/example").unwrap();
        assert_eq!(path.base(), None);
        assert_eq!(path.location(), "/tmp/example");
        assert_eq!(path.value_of(), "/tmp/example");
    }

    #[test]
    fn test_rejects_urls() {
        assert!(posix().from(Some("http://example.com"), ".").is_err());
        assert!(posix().from(None, "http://example.com").is_err());
        assert!(posix().from_base("http://example.com").is_err());
    }

    #[test]
    fn test_parse_is_cached() {
        let path = posix().from_location("/tmp/example/file.ts").unwrap();
        let first = path.parse() as *const ParsedPath;
        let second = path.parse() as *const ParsedPath;
        assert_eq!(first, second);
        assert_eq!(path.parse().name, "file");
    }

    #[test]
    fn test_display_and_conversions() {
        let path = posix().from(Some("/tmp"), "example").unwrap();
        assert_eq!(format!("the path is: {}", path), "the path is: /tmp/example");
        assert_eq!(path.as_ref(), "/tmp/example");
        assert_eq!(String::from(path), "/tmp/example");
    }

    #[test]
    fn test_equality_uses_base_and_resolved_path() {
        let a = posix().from(Some("/tmp"), "example").unwrap();
        let c = posix().from(None, "/tmp/example").unwrap();
        assert_ne!(a, c);
        assert_eq!(a, posix().from(Some("/tmp"), "x/../example").unwrap());

        // resolving drops a trailing separator, normalizing alone keeps it
        assert_eq!(a, posix().from(Some("/tmp"), "./example/").unwrap());
        assert_ne!(c, posix().from(None, "/tmp/example/").unwrap());
    }
}
