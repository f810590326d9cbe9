//! Error types for pdfoutline library.
//!
//! The inference pipeline itself never fails: unreadable or empty input
//! degrades to an empty [`OutlineResult`](crate::model::OutlineResult).
//! These errors only surface at the I/O boundary (loading layout dumps,
//! writing results, batch processing).

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around outline extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The layout dump could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller supplied arguments that cannot be processed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("output directory equals input directory".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: output directory equals input directory"
        );

        let err = Error::Render("bad tree".into());
        assert_eq!(err.to_string(), "Rendering error: bad tree");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
