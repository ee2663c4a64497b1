//! Error types for the lettercorpus library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lettercorpus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling a corpus.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not well-formed hOCR markup.
    #[error("hOCR parsing error in {path}: {message}")]
    HocrParse {
        /// Path of the offending document.
        path: PathBuf,
        /// Description of the defect.
        message: String,
    },

    /// The document lacks an `ocr_page` container.
    #[error("no ocr_page container in {0}")]
    MissingPage(PathBuf),

    /// The input directory holds no hOCR documents.
    #[error("no .hocr documents found in {0}")]
    NoDocuments(PathBuf),

    /// The collection name is not recognized.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// Error serializing the finalized corpus.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoDocuments(PathBuf::from("/tmp/empty"));
        assert_eq!(err.to_string(), "no .hocr documents found in /tmp/empty");

        let err = Error::UnknownCollection("hooke".to_string());
        assert_eq!(err.to_string(), "unknown collection: hooke");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
