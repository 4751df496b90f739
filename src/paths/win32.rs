//! Win32 path rules: drive letters, UNC shares, either slash as separator

use std::iter;

use typed_path::{Utf8WindowsComponent, Utf8WindowsPath, Utf8WindowsPrefix};

use super::{climb, extension_of, format_parts, process_cwd, strip_suffix, ParsedPath, PathApi, PathFlavor};

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// The device (`C:` or `\\server\share`) of `path`, and whether it has a root
fn root_of(path: &str) -> (String, bool) {
    let windows = Utf8WindowsPath::new(path);
    let device = match windows.components().next() {
        Some(Utf8WindowsComponent::Prefix(prefix)) => prefix.as_str().replace('/', "\\"),
        _ => String::new(),
    };
    (device, windows.has_root())
}

fn root_text(path: &str) -> String {
    match root_of(path) {
        (device, true) => format!("{}\\", device),
        (device, false) => device,
    }
}

/// Names of `path` below its root, applied onto `names`
fn collect_names<'a>(path: &'a str, names: &mut Vec<&'a str>, rooted: bool) {
    for component in Utf8WindowsPath::new(path).components() {
        match component {
            Utf8WindowsComponent::ParentDir => climb(names, rooted),
            Utf8WindowsComponent::Normal(name) => names.push(name),
            Utf8WindowsComponent::Prefix(_) | Utf8WindowsComponent::RootDir | Utf8WindowsComponent::CurDir => {}
        }
    }
}

fn last_name(path: &str) -> &str {
    match Utf8WindowsPath::new(path).components().next_back() {
        Some(Utf8WindowsComponent::Normal(name)) => name,
        Some(Utf8WindowsComponent::ParentDir) => "..",
        Some(Utf8WindowsComponent::CurDir) => ".",
        _ => "",
    }
}

/// Path API following Win32 rules
#[derive(Debug, Clone, Default)]
pub struct Win32Path {
    cwd: Option<String>,
}

impl Win32Path {
    /// Create a Win32 path API that resolves against the process working
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

fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let (device, rooted) = root_of(path);
    let mut names = Vec::new();
    collect_names(path, &mut names, rooted);

    let mut tail = names.join("\\");
    if tail.is_empty() && !rooted {
        tail.push('.');
    }
    if !tail.is_empty() && path.ends_with(is_separator) {
        tail.push('\\');
    }

    if rooted {
        format!("{}\\{}", device, tail)
    } else {
        format!("{}{}", device, tail)
    }
}

fn resolve_from(paths: &[&str], cwd: &str) -> String {
    let mut device = String::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut rooted = false;

    for path in paths.iter().rev().chain(iter::once(&cwd)).filter(|p| !p.is_empty()) {
        let (this_device, this_rooted) = root_of(path);
        if !this_device.is_empty() && !device.is_empty() && !this_device.eq_ignore_ascii_case(&device) {
            // a path on another drive cannot contribute
            continue;
        }
        if device.is_empty() {
            device = this_device;
        }
        if !rooted {
            pending.push(*path);
            rooted = this_rooted;
        }
        if rooted && !device.is_empty() {
            break;
        }
    }

    let mut names = Vec::new();
    for path in pending.iter().rev() {
        collect_names(*path, &mut names, rooted);
    }

    let tail = names.join("\\");
    if rooted {
        format!("{}\\{}", device, tail)
    } else if device.is_empty() && tail.is_empty() {
        ".".to_string()
    } else {
        format!("{}{}", device, tail)
    }
}

impl PathApi for Win32Path {
    fn flavor(&self) -> PathFlavor {
        PathFlavor::Win32
    }

    fn normalize(&self, path: &str) -> String {
        normalize(path)
    }

    fn basename(&self, path: &str, suffix: Option<&str>) -> String {
        strip_suffix(last_name(path), suffix)
    }

    fn dirname(&self, path: &str) -> String {
        match Utf8WindowsPath::new(path).parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.as_str().to_string(),
            Some(_) => ".".to_string(),
            None => match root_text(path) {
                root if root.is_empty() => ".".to_string(),
                root => root,
            },
        }
    }

    fn extname(&self, path: &str) -> String {
        extension_of(last_name(path)).to_string()
    }

    fn is_absolute(&self, path: &str) -> bool {
        // `\foo` counts: it is absolute on the current drive
        Utf8WindowsPath::new(path).has_root()
    }

    fn join(&self, paths: &[&str]) -> String {
        let joined = paths
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\\");

        if joined.is_empty() {
            ".".to_string()
        } else {
            normalize(&joined)
        }
    }

    fn parse(&self, path: &str) -> ParsedPath {
        if path.is_empty() {
            return ParsedPath::default();
        }

        let root = root_text(path);
        let base = last_name(path);
        let ext = extension_of(base);
        let dir = match Utf8WindowsPath::new(path).parent() {
            Some(parent) => parent.as_str().to_string(),
            None => root.clone(),
        };

        ParsedPath {
            root,
            dir,
            base: base.to_string(),
            ext: ext.to_string(),
            name: base[..base.len() - ext.len()].to_string(),
        }
    }

    fn format(&self, parts: &ParsedPath) -> String {
        format_parts(parts, '\\')
    }

    fn relative(&self, from: &str, to: &str) -> String {
        let cwd = self.cwd();
        let from = resolve_from(&[from], &cwd);
        let to = resolve_from(&[to], &cwd);
        if from.eq_ignore_ascii_case(&to) {
            return String::new();
        }
        if !root_of(&from).0.eq_ignore_ascii_case(&root_of(&to).0) {
            return to;
        }

        // names compare case-insensitively
        let mut from_names = Vec::new();
        collect_names(&from, &mut from_names, true);
        let mut to_names = Vec::new();
        collect_names(&to, &mut to_names, true);

        let common = from_names
            .iter()
            .zip(&to_names)
            .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
            .count();

        let mut out = vec![".."; from_names.len() - common];
        out.extend_from_slice(&to_names[common..]);
        out.join("\\")
    }

    fn resolve(&self, paths: &[&str]) -> String {
        resolve_from(paths, &self.cwd())
    }

    fn to_namespaced_path(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }

        let resolved = resolve_from(&[path], &self.cwd());
        match Utf8WindowsPath::new(&resolved).components().next() {
            Some(Utf8WindowsComponent::Prefix(prefix)) => match prefix.kind() {
                Utf8WindowsPrefix::UNC(..) => {
                    format!("\\\\?\\UNC\\{}", resolved.trim_start_matches(is_separator))
                }
                Utf8WindowsPrefix::Disk(_) => format!("\\\\?\\{}", resolved),
                _ => path.to_string(),
            },
            _ => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> Win32Path {
        Win32Path::new().with_cwd("C:\\work")
    }

    #[test]
    fn test_root_of() {
        assert_eq!(root_of("C:\\foo"), ("C:".to_string(), true));
        assert_eq!(root_of("C:foo"), ("C:".to_string(), false));
        assert_eq!(root_of("\\\\server\\share\\a"), ("\\\\server\\share".to_string(), true));
        assert_eq!(root_of("\\foo"), (String::new(), true));
        assert_eq!(root_of("foo"), (String::new(), false));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("C:\\temp\\\\foo\\bar\\..\\"), "C:\\temp\\foo\\");
        assert_eq!(normalize("C:////temp\\\\/\\/\\/foo/bar"), "C:\\temp\\foo\\bar");
        assert_eq!(normalize("C:"), "C:.");
        assert_eq!(normalize("\\\\server\\share\\a\\..\\b"), "\\\\server\\share\\b");
        assert_eq!(normalize("..\\a"), "..\\a");
    }

    #[test]
    fn test_resolve() {
        let api = api();
        assert_eq!(api.resolve(&["C:\\foo\\bar", ".\\baz"]), "C:\\foo\\bar\\baz");
        assert_eq!(api.resolve(&["example"]), "C:\\work\\example");
        assert_eq!(api.resolve(&["\\tmp"]), "C:\\tmp");
        assert_eq!(api.resolve(&["D:\\data", "C:relative"]), "C:\\work\\relative");
        assert_eq!(api.resolve(&["D:\\data", "more"]), "D:\\data\\more");
    }

    #[test]
    fn test_dirname_basename_extname() {
        let api = api();
        assert_eq!(api.dirname("C:\\foo\\bar"), "C:\\foo");
        assert_eq!(api.dirname("C:\\foo"), "C:\\");
        assert_eq!(api.dirname("C:\\"), "C:\\");
        assert_eq!(api.dirname("foo"), ".");
        assert_eq!(api.basename("C:\\temp\\myfile.html", None), "myfile.html");
        assert_eq!(api.basename("C:\\temp\\myfile.html", Some(".html")), "myfile");
        assert_eq!(api.extname("C:\\temp\\myfile.html"), ".html");
    }

    #[test]
    fn test_parse_and_format() {
        let api = api();
        let parts = api.parse("C:\\path\\dir\\file.txt");
        assert_eq!(parts.root, "C:\\");
        assert_eq!(parts.dir, "C:\\path\\dir");
        assert_eq!(parts.base, "file.txt");
        assert_eq!(parts.ext, ".txt");
        assert_eq!(parts.name, "file");
        assert_eq!(api.format(&parts), "C:\\path\\dir\\file.txt");
    }

    #[test]
    fn test_relative() {
        let api = api();
        assert_eq!(
            api.relative("C:\\orandea\\test\\aaa", "C:\\orandea\\impl\\bbb"),
            "..\\..\\impl\\bbb"
        );
        assert_eq!(api.relative("C:\\a", "c:\\A"), "");
        assert_eq!(api.relative("C:\\a", "D:\\b"), "D:\\b");
    }

    #[test]
    fn test_is_absolute() {
        let api = api();
        assert!(api.is_absolute("C:\\foo"));
        assert!(api.is_absolute("\\foo"));
        assert!(api.is_absolute("\\\\server\\share"));
        assert!(!api.is_absolute("C:foo"));
        assert!(!api.is_absolute("foo\\bar"));
    }

    #[test]
    fn test_namespaced_path() {
        let api = api();
        assert_eq!(api.to_namespaced_path("c:\\Windows\\System"), "\\\\?\\c:\\Windows\\System");
        assert_eq!(
            api.to_namespaced_path("\\\\server\\share\\file"),
            "\\\\?\\UNC\\server\\share\\file"
        );
        assert_eq!(api.to_namespaced_path(""), "");
    }
}
