//! Display sink abstraction.

use lutcam_core::Frame;
use std::sync::{Arc, Mutex};

/// Receiver of rendered preview frames.
///
/// The worker thread calls [`push`](FrameSink::push) for every frame in
/// arrival order. Implementations that present on a UI must marshal to
/// their own context; the worker does no UI-affecting work itself and
/// expects `push` to return promptly.
pub trait FrameSink: Send {
    /// Hands one rendered frame to the sink. Cheap: frames share their
    /// pixel buffer via `Arc`.
    fn push(&self, frame: Frame);
}

/// A sink that discards every frame.
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn push(&self, _frame: Frame) {}
}

/// A sink that retains every frame it receives.
///
/// Used by tests and by the CLI's offline preview drive. Clones share
/// the same backing store.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl CollectSink {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the frames received so far.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().expect("sink lock poisoned").clone()
    }

    /// Number of frames received so far.
    pub fn len(&self) -> usize {
        self.frames.lock().expect("sink lock poisoned").len()
    }

    /// Whether no frame has arrived yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FrameSink for CollectSink {
    fn push(&self, frame: Frame) {
        self.frames.lock().expect("sink lock poisoned").push(frame);
    }
}
