//! LUT error types.

use thiserror::Error;

/// Result type for LUT parsing and transform operations.
pub type LutResult<T> = Result<T, CubeError>;

/// Errors that can occur while parsing a `.cube` file.
#[derive(Debug, Error)]
pub enum CubeError {
    /// The mandatory `LUT_3D_SIZE` directive is absent.
    #[error("missing LUT_3D_SIZE directive")]
    MissingSize,

    /// The `LUT_3D_SIZE` directive is present but not a valid integer.
    #[error("invalid LUT_3D_SIZE value: {0:?}")]
    InvalidSize(String),

    /// The declared size is outside the supported `1..=64` range.
    #[error("unsupported cube size {0} (supported: 1..=64)")]
    UnsupportedSize(usize),

    /// The number of data components does not match `size^3 * 3`.
    ///
    /// This is the primary guard against truncated or padded files.
    #[error("cube data length mismatch: expected {expected} components, found {found}")]
    SizeMismatch {
        /// `size^3 * 3`.
        expected: usize,
        /// Components actually collected from data lines.
        found: usize,
    },

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
