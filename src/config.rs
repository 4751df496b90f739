//! Configuration for building locations
//!
//! [`Config`] is the composition root: it decides which path rules apply,
//! which working directory relative paths resolve against, and which error
//! hook every constructor reports through. The factories it hands out carry
//! those choices into every location they build.

use crate::error::OnError;
use crate::filepaths::FilepathFactory;
use crate::paths::{path_api_for, PathApi, PathFlavor};
use crate::urls::{UrlFactory, WhatwgUrlApi};
use std::sync::Arc;

/// Global location configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Which path rules filepaths follow
    pub path_flavor: PathFlavor,

    /// Working directory for resolving relative paths; `None` means the
    /// process working directory at the time of each call
    pub cwd: Option<String>,

    /// Hook every validation failure is reported through
    pub on_error: OnError,
}

impl Config {
    /// Create a Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// POSIX path rules, whatever the platform
    pub fn posix() -> Self {
        Self {
            path_flavor: PathFlavor::Posix,
            ..Self::default()
        }
    }

    /// Win32 path rules, whatever the platform
    pub fn win32() -> Self {
        Self {
            path_flavor: PathFlavor::Win32,
            ..Self::default()
        }
    }

    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the error hook
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// The path API these settings describe
    pub fn path_api(&self) -> Arc<dyn PathApi> {
        path_api_for(self.path_flavor, self.cwd.clone())
    }

    /// A filepath factory using these settings
    pub fn filepaths(&self) -> FilepathFactory {
        FilepathFactory::new(self.path_api()).with_on_error(self.on_error.clone())
    }

    /// A URL factory using these settings
    pub fn urls(&self) -> UrlFactory {
        UrlFactory::new(Arc::new(WhatwgUrlApi)).with_on_error(self.on_error.clone())
    }
}
