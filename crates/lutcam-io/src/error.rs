//! I/O error types.

use thiserror::Error;

/// Result type for image I/O.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing still images.
#[derive(Debug, Error)]
pub enum IoError {
    /// File extension is not a supported image format.
    #[error("unsupported image extension: {0}")]
    UnsupportedExtension(String),

    /// The file decoded into something we cannot represent.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding to the target format failed.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// The frame was malformed before encoding.
    #[error("frame error: {0}")]
    Frame(#[from] lutcam_core::CoreError),

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
