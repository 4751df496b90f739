//! Path manipulation primitives
//!
//! Filepaths never touch path strings directly. Every character-level
//! operation goes through a [`PathApi`], so callers can pick POSIX or Win32
//! semantics (or substitute a recording fake in tests) without changing the
//! location algebra built on top.
//!
//! Both built-in implementations read paths through `typed_path`, so POSIX
//! and Windows rules apply whatever platform we run on.

mod posix;
mod win32;

pub use posix::PosixPath;
pub use win32::Win32Path;

pub(crate) use posix::{dirname as posix_dirname, join as posix_join};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use typed_path::Utf8UnixPath as UnixPath;

/// Which family of path rules to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathFlavor {
    /// Forward slashes, single root
    Posix,
    /// Back or forward slashes, drive letters and UNC shares
    Win32,
}

impl PathFlavor {
    /// The flavour of the platform we were compiled for
    pub fn native() -> Self {
        if cfg!(windows) {
            PathFlavor::Win32
        } else {
            PathFlavor::Posix
        }
    }

    /// The preferred separator
    pub fn separator(&self) -> char {
        match self {
            PathFlavor::Posix => '/',
            PathFlavor::Win32 => '\\',
        }
    }
}

impl Default for PathFlavor {
    fn default() -> Self {
        Self::native()
    }
}

/// The structure of a path, as returned by [`PathApi::parse`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedPath {
    /// The root, e.g. `/` or `C:\`
    pub root: String,
    /// Everything up to the final segment
    pub dir: String,
    /// The final segment, including its extension
    pub base: String,
    /// The extension of the final segment, including the dot
    pub ext: String,
    /// The final segment without its extension
    pub name: String,
}

/// The path primitives a [`Filepath`](crate::filepaths::Filepath) relies on
///
/// Implementations follow the usual POSIX / Win32 conventions: `join` and
/// `resolve` normalize their output, `dirname` and `basename` ignore
/// trailing separators, and `resolve` falls back to the working directory
/// when no argument is absolute.
pub trait PathApi: fmt::Debug + Send + Sync {
    /// Which rules this implementation follows
    fn flavor(&self) -> PathFlavor;

    /// Collapse `.` and `..` segments and duplicate separators
    fn normalize(&self, path: &str) -> String;

    /// The final segment, with `suffix` removed when it matches exactly
    fn basename(&self, path: &str, suffix: Option<&str>) -> String;

    /// Everything but the final segment
    fn dirname(&self, path: &str) -> String;

    /// The extension of the final segment
    fn extname(&self, path: &str) -> String;

    /// Does the path start from a root?
    fn is_absolute(&self, path: &str) -> bool;

    /// Join the segments with the separator and normalize the result
    fn join(&self, paths: &[&str]) -> String;

    /// Break a path into root, dir, base, ext and name
    fn parse(&self, path: &str) -> ParsedPath;

    /// The inverse of [`parse`](PathApi::parse)
    fn format(&self, parts: &ParsedPath) -> String;

    /// The path from `from` to `to`
    fn relative(&self, from: &str, to: &str) -> String;

    /// Resolve the segments, right to left, into an absolute path
    fn resolve(&self, paths: &[&str]) -> String;

    /// The Win32 namespaced form of the path; a no-op elsewhere
    fn to_namespaced_path(&self, path: &str) -> String;
}

/// The path API for the platform we were compiled for
pub fn default_path_api() -> Arc<dyn PathApi> {
    path_api_for(PathFlavor::native(), None)
}

/// Build a path API of the given flavour, optionally pinned to a working
/// directory
pub fn path_api_for(flavor: PathFlavor, cwd: Option<String>) -> Arc<dyn PathApi> {
    match flavor {
        PathFlavor::Posix => Arc::new(PosixPath::new().with_cwd_opt(cwd)),
        PathFlavor::Win32 => Arc::new(Win32Path::new().with_cwd_opt(cwd)),
    }
}

pub(crate) fn process_cwd() -> String {
    match std::env::current_dir() {
        Ok(dir) => dir.to_string_lossy().into_owned(),
        Err(error) => {
            tracing::warn!(%error, "working directory unavailable, resolving against /");
            "/".to_string()
        }
    }
}

/// Apply one `..` to the names collected so far
///
/// Above a root there is nothing to climb to; in a relative path the `..`
/// is kept.
pub(crate) fn climb(names: &mut Vec<&str>, rooted: bool) {
    match names.last() {
        Some(&last) if last != ".." => {
            names.pop();
        }
        _ if !rooted => names.push(".."),
        _ => {}
    }
}

/// The final name with `suffix` cut off, unless the name is the suffix
pub(crate) fn strip_suffix(name: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) if !suffix.is_empty() && name != suffix => {
            name.strip_suffix(suffix).unwrap_or(name).to_string()
        }
        _ => name.to_string(),
    }
}

/// The extension of a single name, dot included
pub(crate) fn extension_of(name: &str) -> &str {
    match UnixPath::new(name).extension() {
        Some(ext) => &name[name.len() - ext.len() - 1..],
        None => "",
    }
}

/// Put parsed parts back together with `sep`
pub(crate) fn format_parts(parts: &ParsedPath, sep: char) -> String {
    let dir = if parts.dir.is_empty() { &parts.root } else { &parts.dir };
    let base = if parts.base.is_empty() {
        format!("{}{}", parts.name, parts.ext)
    } else {
        parts.base.clone()
    };

    if dir.is_empty() {
        base
    } else if *dir == parts.root {
        format!("{}{}", dir, base)
    } else {
        format!("{}{}{}", dir, sep, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_flavor_matches_platform() {
        if cfg!(windows) {
            assert_eq!(PathFlavor::native(), PathFlavor::Win32);
        } else {
            assert_eq!(PathFlavor::native(), PathFlavor::Posix);
        }
    }

    #[test]
    fn test_path_api_for_flavor() {
        let api = path_api_for(PathFlavor::Win32, Some("C:\\work".to_string()));
        assert_eq!(api.flavor(), PathFlavor::Win32);
        assert_eq!(api.resolve(&["example"]), "C:\\work\\example");

        let api = path_api_for(PathFlavor::Posix, Some("/work".to_string()));
        assert_eq!(api.flavor(), PathFlavor::Posix);
        assert_eq!(api.resolve(&["example"]), "/work/example");
    }

    #[test]
    fn test_process_cwd_is_absolute() {
        let cwd = process_cwd();
        assert!(std::path::Path::new(&cwd).is_absolute() || cwd == "/");
    }

    #[test]
    fn test_climb() {
        let mut names = vec!["a", "b"];
        climb(&mut names, true);
        assert_eq!(names, vec!["a"]);

        let mut names = vec![];
        climb(&mut names, true);
        assert!(names.is_empty());

        climb(&mut names, false);
        climb(&mut names, false);
        assert_eq!(names, vec!["..", ".."]);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("file.ts"), ".ts");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of(".."), "");
        assert_eq!(extension_of("file."), ".");
        assert_eq!(extension_of("file"), "");
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("quux.html", Some(".html")), "quux");
        assert_eq!(strip_suffix("quux.html", Some(".php")), "quux.html");
        assert_eq!(strip_suffix(".html", Some(".html")), ".html");
        assert_eq!(strip_suffix("quux.html", None), "quux.html");
    }

    #[test]
    fn test_parsed_path_serializes() {
        let parts = ParsedPath {
            root: "/".to_string(),
            dir: "/tmp".to_string(),
            base: "file.ts".to_string(),
            ext: ".ts".to_string(),
            name: "file".to_string(),
        };
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(json["dir"], "/tmp");
        assert_eq!(json["ext"], ".ts");
    }
}
