//! Error types for `quiver-core` store operations.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while building or persisting an embedding table.
#[derive(Error, Debug)]
pub enum Error {
    /// Embedding rejected because its norm is zero: cosine similarity
    /// against it would be undefined.
    #[error("Zero-norm embedding rejected")]
    ZeroNorm,

    /// Vector length does not match the table's fixed dimension.
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension every stored vector must have.
        expected: usize,
        /// The dimension the caller supplied.
        actual: usize,
    },

    /// Memory reservation for a page or the page arena failed.
    #[error("Allocation failure: {0}")]
    Alloc(#[from] TryReserveError),

    /// File length is not a whole number of 520-byte records.
    #[error("Corrupt embedding file: {len} bytes is not a multiple of the record size")]
    CorruptFile {
        /// Observed file length in bytes.
        len: u64,
    },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DimensionMismatch {
            expected: 512,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Vector dimension mismatch: expected 512, got 3"
        );

        let err = Error::CorruptFile { len: 521 };
        assert!(err.to_string().contains("521 bytes"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
