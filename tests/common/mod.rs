//! Shared helpers for the integration tests

#![allow(dead_code)]

use datalocations::paths::{ParsedPath, PathApi, PathFlavor, PosixPath};
use datalocations::urls::{UrlApi, WhatwgUrlApi};
use datalocations::{FilepathFactory, UrlFactory};
use std::sync::{Arc, Mutex};

/// Working directory every test factory resolves against
pub const TEST_CWD: &str = "/home/tester";

/// A POSIX path API that remembers every call made to it
#[derive(Debug, Default)]
pub struct RecordingPathApi {
    inner: PosixPath,
    calls: Mutex<Vec<String>>,
}

impl RecordingPathApi {
    pub fn new() -> Self {
        Self {
            inner: PosixPath::new().with_cwd(TEST_CWD),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Names of the primitives called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl PathApi for RecordingPathApi {
    fn flavor(&self) -> PathFlavor {
        PathFlavor::Posix
    }

    fn normalize(&self, path: &str) -> String {
        self.record("normalize");
        self.inner.normalize(path)
    }

    fn basename(&self, path: &str, suffix: Option<&str>) -> String {
        self.record("basename");
        self.inner.basename(path, suffix)
    }

    fn dirname(&self, path: &str) -> String {
        self.record("dirname");
        self.inner.dirname(path)
    }

    fn extname(&self, path: &str) -> String {
        self.record("extname");
        self.inner.extname(path)
    }

    fn is_absolute(&self, path: &str) -> bool {
        self.record("is_absolute");
        self.inner.is_absolute(path)
    }

    fn join(&self, paths: &[&str]) -> String {
        self.record("join");
        self.inner.join(paths)
    }

    fn parse(&self, path: &str) -> ParsedPath {
        self.record("parse");
        self.inner.parse(path)
    }

    fn format(&self, parts: &ParsedPath) -> String {
        self.record("format");
        self.inner.format(parts)
    }

    fn relative(&self, from: &str, to: &str) -> String {
        self.record("relative");
        self.inner.relative(from, to)
    }

    fn resolve(&self, paths: &[&str]) -> String {
        self.record("resolve");
        self.inner.resolve(paths)
    }

    fn to_namespaced_path(&self, path: &str) -> String {
        self.record("to_namespaced_path");
        self.inner.to_namespaced_path(path)
    }
}

/// A URL parser that remembers every `(location, base)` it was asked about
#[derive(Debug, Default)]
pub struct RecordingUrlApi {
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingUrlApi {
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl UrlApi for RecordingUrlApi {
    fn parse(&self, location: &str, base: Option<&str>) -> Result<url::Url, url::ParseError> {
        self.calls
            .lock()
            .unwrap()
            .push((location.to_string(), base.map(str::to_string)));
        WhatwgUrlApi.parse(location, base)
    }
}

/// A POSIX filepath factory pinned to [`TEST_CWD`]
pub fn posix_paths() -> FilepathFactory {
    FilepathFactory::new(Arc::new(PosixPath::new().with_cwd(TEST_CWD)))
}

/// A filepath factory backed by a recording path API
pub fn recording_paths() -> (FilepathFactory, Arc<RecordingPathApi>) {
    let api = Arc::new(RecordingPathApi::new());
    (FilepathFactory::new(api.clone()), api)
}

/// A URL factory backed by a recording parser
pub fn recording_urls() -> (UrlFactory, Arc<RecordingUrlApi>) {
    let api = Arc::new(RecordingUrlApi::default());
    (UrlFactory::new(api.clone()), api)
}
