//! Registry and storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for registry operations.
pub type FiltersResult<T> = Result<T, FilterError>;

/// Errors from the managed filter storage directory.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The source file handed to `add_user_filter` does not exist.
    #[error("source file not found: {0}")]
    NotFound(PathBuf),

    /// Managed storage could not be created or written.
    #[error("filter storage unavailable at {path}: {source}")]
    Unavailable {
        /// The managed storage directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Copying a user file into managed storage failed.
    #[error("failed to copy {src} into managed storage: {source}")]
    CopyFailed {
        /// Source path supplied by the caller.
        src: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Deleting a user filter's backing file failed.
    #[error("failed to delete {path}: {source}")]
    DeleteFailed {
        /// The backing file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that can occur while managing filters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Storage-level failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The filter file exists but failed to parse.
    #[error("LUT parse failed: {0}")]
    Parse(#[from] lutcam_lut::CubeError),
}
