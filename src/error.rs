//! Error types for unocr library.

use std::io;
use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or reconstructing OCR output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid OCR analysis response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A block in the response cannot be turned into a typed fragment.
    #[error("Invalid block {id}: {reason}")]
    InvalidBlock {
        /// Identifier of the offending block
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// A KEY fragment has no VALUE relationship.
    #[error("Key {key_id} on page {page} has no bound value")]
    MissingValue {
        /// Identifier of the KEY fragment
        key_id: String,
        /// Page being reconstructed
        page: u32,
    },

    /// A relationship points at a fragment that is not on the page.
    #[error("Fragment {id} referenced on page {page} does not exist")]
    DanglingReference {
        /// The missing identifier
        id: String,
        /// Page being reconstructed
        page: u32,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Page this error is attached to, if it came out of a page reconstruction.
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::MissingValue { page, .. } | Error::DanglingReference { page, .. } => {
                Some(*page)
            }
            Error::PageOutOfRange(page, _) => Some(*page),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingValue {
            key_id: "k-1".to_string(),
            page: 2,
        };
        assert_eq!(err.to_string(), "Key k-1 on page 2 has no bound value");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_error_page() {
        let err = Error::DanglingReference {
            id: "w-9".to_string(),
            page: 3,
        };
        assert_eq!(err.page(), Some(3));
        assert_eq!(Error::Render("x".into()).page(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
