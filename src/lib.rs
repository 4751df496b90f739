//! # datalocations
//!
//! Immutable values for locations of data: paths on a filesystem and URLs.
//!
//! Every location is built from an optional `base` and a `location`, resolved
//! once into a canonical string. From there it can be decomposed into its
//! parts and derived into new locations (parent, joined child, resolved
//! sibling). The source value is never changed.
//!
//! ## Features
//!
//! - [`Filepath`] with POSIX and Win32 path rules
//! - [`Url`] with WHATWG parsing and a merge-precedence algebra for `join`
//! - Href assembly from structural parts
//! - Runtime capability checks and extension of location values
//! - A pluggable error hook
//!
//! ## Example
//!
//! ```rust
//! use datalocations::{DataLocation, Filepath, Url};
//!
//! let url = Url::from_location("http://example.com:8080/this/is/a/path?with=search#andFragment")?;
//! assert_eq!(url.dirname()?.value_of(), "http://example.com:8080/this/is/a");
//! assert_eq!(
//!     url.join(&["#anotherFragment"])?.to_string(),
//!     "http://example.com:8080/this/is/a/path?with=search#anotherFragment"
//! );
//!
//! let path = Filepath::from_base("/tmp/example")?;
//! assert_eq!(path.join(&["data", "file.json"])?.extname(), ".json");
//! # Ok::<(), datalocations::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod error;

// Native primitives
pub mod paths;

// Location values
pub mod capabilities;
pub mod filepaths;
pub mod locations;
pub mod urls;

// Re-exports for convenience
pub use capabilities::{augment, implements_capability, Extended, Extension, OperationContext};
pub use config::Config;
pub use error::{Error, OnError, Result};
pub use filepaths::{is_filepath, must_be_filepath, Filepath, FilepathFactory};
pub use locations::{DataLocation, Location};
pub use paths::{ParsedPath, PathApi, PathFlavor, PosixPath, Win32Path};
pub use urls::{build_url_href, is_url, ParsedUrl, Url, UrlApi, UrlFactory, UrlFormatOptions, WhatwgUrlApi};

/// Version of the datalocations library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
