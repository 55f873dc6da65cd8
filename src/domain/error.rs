//! Error types for the zbooks plugin.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type alias
//! [`Result`] used throughout the plugin. None of these errors are shown to the
//! user: callers log them and leave state unchanged.

use thiserror::Error;

/// The main error type for zbooks operations.
///
/// Consolidates failures from the settings store, page fetching and decoding,
/// and theme loading. Variants wrapping errors from external crates use
/// `#[from]` so `?` converts them automatically.
///
/// # Examples
///
/// ```
/// use zbooks::BookshelfError;
///
/// fn read_settings() -> Result<(), BookshelfError> {
///     Err(BookshelfError::Storage("settings file is locked".to_string()))
/// }
///
/// assert!(read_settings().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// Settings store read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A page body or settings file was not valid JSON for the expected shape.
    ///
    /// A single malformed record fails the whole page.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The search service answered with a non-success status.
    #[error("Fetch failed with status {status}: {message}")]
    Fetch {
        /// HTTP status reported by the host.
        status: u16,
        /// Short excerpt of the response body.
        message: String,
    },

    /// A configured endpoint is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for zbooks operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_mentions_status() {
        let err = BookshelfError::Fetch {
            status: 503,
            message: "backend unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Fetch failed with status 503: backend unavailable"
        );
    }

    #[test]
    fn json_errors_convert_into_decode() {
        let parse: std::result::Result<Vec<u8>, _> = serde_json::from_str("{");
        let err: BookshelfError = parse.unwrap_err().into();
        assert!(matches!(err, BookshelfError::Decode(_)));
    }
}
