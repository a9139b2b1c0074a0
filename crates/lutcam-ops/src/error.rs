//! Operation error types.

use thiserror::Error;

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during per-frame operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Buffer length does not match the stated dimensions.
    #[error("buffer length mismatch: expected {expected} components, found {found}")]
    LengthMismatch {
        /// `width * height * 4`.
        expected: usize,
        /// Components actually supplied.
        found: usize,
    },

    /// An operation parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
