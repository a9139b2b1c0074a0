//! Pipeline error types.

use thiserror::Error;

/// Result type for session operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors from session control operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Negative intensity is undefined for the blend formula.
    ///
    /// Values above 1.0 are allowed (creative over-drive); only the
    /// sign is checked.
    #[error("filter intensity must be >= 0, got {0}")]
    InvalidIntensity(f32),

    /// The session worker has shut down.
    #[error("session is closed")]
    SessionClosed,
}
