//! Error types for sb-core
//!
//! Provides the error taxonomy shared by every s3butler crate.

use thiserror::Error;

/// Result type alias for sb-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sb-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No usable credentials in the ambient chain
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Failure reported by the storage service
    #[error("Service error: {0}")]
    Service(String),

    /// Local network fetch failure during download-and-reupload
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Invalid argument or flag combination
    #[error("Usage error: {0}")]
    Usage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Service("NoSuchBucket".into());
        assert_eq!(err.to_string(), "Service error: NoSuchBucket");

        let err = Error::Usage("missing policy".into());
        assert_eq!(err.to_string(), "Usage error: missing policy");

        let err = Error::Auth("no credentials in chain".into());
        assert_eq!(
            err.to_string(),
            "Authentication failed: no credentials in chain"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
