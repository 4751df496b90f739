//! Error types for datalocations
//!
//! This module defines the errors raised while building and deriving
//! locations, and the [`OnError`] hook every constructor reports through.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias using datalocations Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for datalocations operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `base` or `location` looked like a URL where a filepath was required
    #[error("not a filepath: base {base:?}, location {location:?}")]
    NotAFilepath {
        /// The rejected base
        base: Option<String>,
        /// The rejected location
        location: String,
    },

    /// The URL parser could not turn `base` + `location` into an absolute URL
    #[error("not a URL: base {base:?}, location {location:?}: {source}")]
    NotAUrl {
        /// The rejected base
        base: Option<String>,
        /// The rejected location
        location: String,
        /// Why the parser rejected it
        #[source]
        source: url::ParseError,
    },

    /// The location does not provide the named operation
    #[error("operation not supported: {0}")]
    UnsupportedOperation(String),

    /// An extension operation reported a failure
    #[error("operation '{name}' failed: {message}")]
    Operation {
        /// Name of the operation
        name: String,
        /// What went wrong
        message: String,
    },

    /// JSON error from extension state or arguments
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not-a-filepath error
    pub fn not_a_filepath(base: Option<&str>, location: &str) -> Self {
        Error::NotAFilepath {
            base: base.map(str::to_string),
            location: location.to_string(),
        }
    }

    /// Create a not-a-URL error
    pub fn not_a_url(base: Option<&str>, location: &str, source: url::ParseError) -> Self {
        Error::NotAUrl {
            base: base.map(str::to_string),
            location: location.to_string(),
            source,
        }
    }

    /// Create an operation failure
    pub fn operation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Operation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Is this one of the construction-time validation errors?
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::NotAFilepath { .. } | Error::NotAUrl { .. })
    }
}

/// Error reporting hook
///
/// Constructors hand every validation failure to this hook and return
/// whatever error it gives back. A hook can log, wrap or replace the error,
/// but it cannot turn the failure into a success.
#[derive(Clone)]
pub struct OnError(Arc<dyn Fn(Error) -> Error + Send + Sync>);

impl OnError {
    /// Wrap a custom handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// The default hook: log the rejection and propagate it unchanged
    pub fn throw_the_error() -> Self {
        Self::new(|err| {
            tracing::debug!(error = %err, "rejected location");
            err
        })
    }

    /// Pass an error through the hook
    pub fn report(&self, err: Error) -> Error {
        (self.0)(err)
    }
}

impl Default for OnError {
    fn default() -> Self {
        Self::throw_the_error()
    }
}

impl fmt::Debug for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnError(..)")
    }
}
