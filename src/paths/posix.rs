//! POSIX path rules

use std::iter;

use typed_path::{Utf8UnixComponent, Utf8UnixPath};

use super::{climb, extension_of, format_parts, process_cwd, strip_suffix, ParsedPath, PathApi, PathFlavor};

/// Path API following POSIX rules
#[derive(Debug, Clone, Default)]
pub struct PosixPath {
    cwd: Option<String>,
}

impl PosixPath {
    /// Create a POSIX path API that resolves against the process working
    /// directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `cwd` instead of the process working
    /// directory
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub(crate) fn with_cwd_opt(mut self, cwd: Option<String>) -> Self {
        self.cwd = cwd;
        self
    }

    fn cwd(&self) -> String {
        self.cwd.clone().unwrap_or_else(process_cwd)
    }
}

/// Whether `path` is rooted, and its names with `.` dropped and `..` applied
fn lexical(path: &str) -> (bool, Vec<&str>) {
    let mut rooted = false;
    let mut names = Vec::new();

    for component in Utf8UnixPath::new(path).components() {
        match component {
            Utf8UnixComponent::RootDir => rooted = true,
            Utf8UnixComponent::CurDir => {}
            Utf8UnixComponent::ParentDir => climb(&mut names, rooted),
            Utf8UnixComponent::Normal(name) => names.push(name),
        }
    }

    (rooted, names)
}

fn last_name(path: &str) -> &str {
    match Utf8UnixPath::new(path).components().next_back() {
        Some(Utf8UnixComponent::Normal(name)) => name,
        Some(Utf8UnixComponent::ParentDir) => "..",
        Some(Utf8UnixComponent::CurDir) => ".",
        Some(Utf8UnixComponent::RootDir) | None => "",
    }
}

pub(crate) fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let (rooted, names) = lexical(path);
    let mut normalized = names.join("/");
    if normalized.is_empty() && !rooted {
        normalized.push('.');
    }
    if !normalized.is_empty() && path.ends_with('/') {
        normalized.push('/');
    }

    if rooted {
        format!("/{}", normalized)
    } else {
        normalized
    }
}

pub(crate) fn join(paths: &[&str]) -> String {
    let joined = paths
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        ".".to_string()
    } else {
        normalize(&joined)
    }
}

pub(crate) fn dirname(path: &str) -> String {
    let unix = Utf8UnixPath::new(path);
    match unix.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.as_str().to_string(),
        None if unix.has_root() => "/".to_string(),
        _ => ".".to_string(),
    }
}

fn resolve_from(paths: &[&str], cwd: &str) -> String {
    let mut pending: Vec<&str> = Vec::new();
    for path in paths.iter().rev().chain(iter::once(&cwd)).filter(|p| !p.is_empty()) {
        pending.push(*path);
        if Utf8UnixPath::new(path).is_absolute() {
            break;
        }
    }
    pending.reverse();

    let joined = pending.join("/");
    let (rooted, names) = lexical(&joined);
    let resolved = names.join("/");

    if rooted {
        format!("/{}", resolved)
    } else if resolved.is_empty() {
        ".".to_string()
    } else {
        resolved
    }
}

impl PathApi for PosixPath {
    fn flavor(&self) -> PathFlavor {
        PathFlavor::Posix
    }

    fn normalize(&self, path: &str) -> String {
        normalize(path)
    }

    fn basename(&self, path: &str, suffix: Option<&str>) -> String {
        strip_suffix(last_name(path), suffix)
    }

    fn dirname(&self, path: &str) -> String {
        dirname(path)
    }

    fn extname(&self, path: &str) -> String {
        extension_of(last_name(path)).to_string()
    }

    fn is_absolute(&self, path: &str) -> bool {
        Utf8UnixPath::new(path).is_absolute()
    }

    fn join(&self, paths: &[&str]) -> String {
        join(paths)
    }

    fn parse(&self, path: &str) -> ParsedPath {
        if path.is_empty() {
            return ParsedPath::default();
        }

        let unix = Utf8UnixPath::new(path);
        let root = if unix.has_root() { "/" } else { "" };
        let base = last_name(path);
        let ext = extension_of(base);

        ParsedPath {
            root: root.to_string(),
            dir: unix.parent().map_or(root, |parent| parent.as_str()).to_string(),
            base: base.to_string(),
            ext: ext.to_string(),
            name: base[..base.len() - ext.len()].to_string(),
        }
    }

    fn format(&self, parts: &ParsedPath) -> String {
        format_parts(parts, '/')
    }

    fn relative(&self, from: &str, to: &str) -> String {
        let cwd = self.cwd();
        let from = resolve_from(&[from], &cwd);
        let to = resolve_from(&[to], &cwd);

        match pathdiff::diff_paths(&to, &from) {
            Some(diff) => diff
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            None => to,
        }
    }

    fn resolve(&self, paths: &[&str]) -> String {
        resolve_from(paths, &self.cwd())
    }

    fn to_namespaced_path(&self, path: &str) -> String {
        path.to_string()
    }
}
