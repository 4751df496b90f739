//! Filepath shape checks

use crate::error::{Error, OnError, Result};
use crate::urls::is_url;

/// Do `base` and `location` both look like filesystem paths?
///
/// Only URL-shaped input is rejected; nothing here checks that the path
/// exists or is legal for a particular filesystem.
pub fn is_filepath(base: Option<&str>, location: &str) -> bool {
    !is_url(location) && !base.map_or(false, is_url)
}

/// Report a [`Error::NotAFilepath`] through `on_error` unless
/// [`is_filepath`] holds
pub fn must_be_filepath(base: Option<&str>, location: &str, on_error: &OnError) -> Result<()> {
    if is_filepath(base, location) {
        Ok(())
    } else {
        Err(on_error.report(Error::not_a_filepath(base, location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_POSIX_PATHS: &[&str] = &["/root", "..", ".", "relative/path", ""];
    const INVALID_PATHS: &[&str] = &["https://api.example.com", "http://example.com", "//cdn.example.com/lib.js"];

    #[test]
    fn test_accepts_paths_without_base() {
        for path in VALID_POSIX_PATHS {
            assert!(is_filepath(None, path), "{}", path);
            assert!(must_be_filepath(None, path, &OnError::default()).is_ok());
        }
    }

    #[test]
    fn test_rejects_urls_without_base() {
        for path in INVALID_PATHS {
            assert!(!is_filepath(None, path), "{}", path);
            let err = must_be_filepath(None, path, &OnError::default()).unwrap_err();
            assert!(matches!(err, Error::NotAFilepath { .. }));
        }
    }

    #[test]
    fn test_with_base() {
        assert!(is_filepath(Some("/tmp/example"), "../alfred/trout"));
        assert!(is_filepath(Some("/tmp/example"), "/alfred/trout"));
        assert!(!is_filepath(Some("https://api.example.org/"), "/tmp/example"));
        assert!(!is_filepath(Some("/tmp/example"), "https://api.example.org/"));
    }

    #[test]
    fn test_custom_handler_sees_the_inputs() {
        let on_error = OnError::new(|err| match err {
            Error::NotAFilepath { base, location } => {
                Error::operation("must_be_filepath", format!("{:?} {}", base, location))
            }
            other => other,
        });

        let err = must_be_filepath(Some("/tmp"), "https://not-a-path", &on_error).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operation 'must_be_filepath' failed: Some(\"/tmp\") https://not-a-path"
        );
    }
}
