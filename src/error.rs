//! Error types for the ADNI dataset library.

use thiserror::Error as ThisError;

/// Main error type for dataset operations.
///
/// Filesystem and decode failures are carried untranslated: a missing category
/// directory surfaces as `Io` at construction time, an undecodable file as
/// `Image` at access time.
#[derive(ThisError, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or processing error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Sample index outside `[0, len)`
    #[error("index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Specialized Result type for dataset operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 out of bounds for dataset of length 3"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_result_type() {
        let success: Result<i32> = Ok(42);
        assert!(success.is_ok());
    }
}
