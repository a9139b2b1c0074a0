//! Still-capture completion plumbing.
//!
//! A capture request is a single-shot operation: once issued it cannot
//! be cancelled, and its handle completes exactly once - with the
//! encoded file's path on success, or an explicit error. The caller is
//! never left waiting.

use std::path::PathBuf;
use std::sync::mpsc;
use thiserror::Error;

/// Errors surfaced through a [`CaptureHandle`].
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The session disappeared before the capture could run.
    #[error("capture device unavailable")]
    DeviceUnavailable,

    /// A processing stage failed after the capture was committed.
    ///
    /// Unlike preview, a capture never silently returns a partially
    /// processed image.
    #[error("capture processing failed: {0}")]
    StageFailed(String),

    /// Encoding or writing the output file failed.
    #[error("capture encode failed: {0}")]
    EncodeFailed(String),

    /// The session shut down while the capture was still pending.
    #[error("capture cancelled by session teardown")]
    Cancelled,
}

/// One-shot result of a capture request.
pub type CaptureResult = Result<PathBuf, CaptureError>;

/// Awaitable handle for a still-capture request.
pub struct CaptureHandle {
    rx: mpsc::Receiver<CaptureResult>,
}

impl CaptureHandle {
    /// Creates the handle and its completion sender.
    pub(crate) fn new() -> (mpsc::SyncSender<CaptureResult>, Self) {
        // Buffered so the worker never blocks on a caller that has not
        // reached wait() yet.
        let (tx, rx) = mpsc::sync_channel(1);
        (tx, Self { rx })
    }

    /// Blocks until the capture completes.
    ///
    /// Completes exactly once even on failure; a worker that died
    /// without responding reads as [`CaptureError::DeviceUnavailable`].
    pub fn wait(self) -> CaptureResult {
        self.rx
            .recv()
            .unwrap_or(Err(CaptureError::DeviceUnavailable))
    }

    /// Non-blocking poll; `None` while the capture is still in flight.
    pub fn try_wait(&self) -> Option<CaptureResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(Err(CaptureError::DeviceUnavailable))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_delivers_once() {
        let (tx, handle) = CaptureHandle::new();
        tx.send(Ok(PathBuf::from("/tmp/x.jpg"))).unwrap();
        assert_eq!(handle.wait().unwrap(), PathBuf::from("/tmp/x.jpg"));
    }

    #[test]
    fn test_dropped_sender_reads_as_unavailable() {
        let (tx, handle) = CaptureHandle::new();
        drop(tx);
        assert!(matches!(handle.wait(), Err(CaptureError::DeviceUnavailable)));
    }

    #[test]
    fn test_try_wait_pending() {
        let (_tx, handle) = CaptureHandle::new();
        assert!(handle.try_wait().is_none());
    }
}
