//! Error types for frame buffer operations.

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing or indexing frames.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel buffer length does not match the stated dimensions.
    #[error("buffer length {found} does not match {width}x{height} RGBA ({expected} expected)")]
    BufferMismatch {
        /// Stated frame width.
        width: u32,
        /// Stated frame height.
        height: u32,
        /// Expected component count (`width * height * 4`).
        expected: usize,
        /// Actual component count supplied.
        found: usize,
    },

    /// Pixel coordinate outside the frame.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} frame")]
    OutOfBounds {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
    },

    /// Zero-sized frames are not representable.
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame {
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
    },
}
