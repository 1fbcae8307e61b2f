//! Error types for narraflow library.

use std::io;
use thiserror::Error;

/// Result type alias for narraflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while flowing or rendering a narrative.
///
/// Parsing and table extraction never fail; malformed input degrades to
/// plain text. Errors come from configuration and from backends.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The flow policy cannot describe a usable page.
    #[error("Invalid flow policy: {0}")]
    InvalidPolicy(String),

    /// No format adapter is registered for the requested format.
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// A drawing backend rejected a call.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Error during serialization of render output (JSON, outline).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat("odt".to_string());
        assert_eq!(err.to_string(), "Unknown output format: odt");

        let err = Error::InvalidPolicy("page height 80 leaves no content area".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid flow policy: page height 80 leaves no content area"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Render(_)));
        assert!(err
            .to_string()
            .starts_with("Rendering error: JSON serialization error: "));
    }
}
