//! # lutcam-pipeline
//!
//! The real-time frame session.
//!
//! A session owns one dedicated worker thread - the analogue of the
//! capture device's serial frame queue. Frames, control changes, and
//! capture requests all flow through one bounded channel, so frame
//! processing is serialized in arrival order and never re-entered
//! concurrently with itself.
//!
//! # State machine
//!
//! ```text
//!              first frame            filter selected
//! Uninitialized ----------> Previewing ----------------> Previewing
//!                           (fast path)   <------------  (filtered)
//!                                         normal / miss
//!
//!                 capture() : transient, resolved on the next frame
//! ```
//!
//! - The very first frame bypasses every stage straight to the display
//!   sink: the user sees a live image before any transform buffer is
//!   warm.
//! - The "normal" filter skips the color stage entirely - it is a fast
//!   path, not an identity cube application.
//! - A filter/intensity change rebuilds the [`lutcam_lut::ColorCube`]
//!   once; per-frame processing only ever samples the retained cube.
//! - Preview stage failures degrade: the failing stage is skipped and
//!   the previous image passes through. Capture stage failures surface
//!   as an explicit [`CaptureError`] through the capture handle, which
//!   always completes exactly once.
//!
//! # Threading
//!
//! Display handoff happens through the [`FrameSink`] trait; the sink
//! implementation is responsible for marshalling to its own UI context.
//! The worker never blocks on I/O during preview - file I/O exists only
//! on the capture path.

#![warn(missing_docs)]

pub mod capture;
pub mod effects;
pub mod error;
pub mod session;
pub mod sink;

pub use capture::{CaptureError, CaptureHandle};
pub use effects::EffectState;
pub use error::{PipelineError, PipelineResult};
pub use session::{SessionConfig, SessionHandle};
pub use sink::{CollectSink, FrameSink, NullSink};
