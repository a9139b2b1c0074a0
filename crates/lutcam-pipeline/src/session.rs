//! The frame session: worker thread, control surface, capture path.

use crate::capture::{CaptureError, CaptureHandle, CaptureResult};
use crate::effects::EffectState;
use crate::error::{PipelineError, PipelineResult};
use crate::sink::FrameSink;
use lutcam_core::Frame;
use lutcam_filters::{FilterId, FilterRegistry};
use lutcam_lut::ColorCube;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory captures are encoded into.
    pub capture_dir: PathBuf,
    /// Bound of the frame/control queue. When the queue is full,
    /// incoming frames are discarded (the device's late-frame policy);
    /// control messages instead wait for space.
    pub queue_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_dir: std::env::temp_dir(),
            queue_depth: 4,
        }
    }
}

enum Command {
    Frame(Frame),
    SetFilter { id: FilterId, intensity: f32 },
    SetGrain { enabled: bool, intensity: f32 },
    SetMist { enabled: bool, intensity: f32 },
    Capture { done: SyncSender<CaptureResult> },
    Shutdown,
}

/// Control surface of a running frame session.
///
/// Owns the worker thread; dropping the handle shuts the session down
/// and joins the worker. The registry passed at spawn outlives the
/// session - cached LUT data survives a camera switch, only the
/// in-flight transform cube is released.
pub struct SessionHandle {
    tx: SyncSender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Starts a session over a registry and a display sink.
    pub fn spawn(
        registry: Arc<FilterRegistry>,
        sink: Box<dyn FrameSink>,
        config: SessionConfig,
    ) -> Self {
        let (tx, rx) = mpsc::sync_channel(config.queue_depth.max(1));
        let worker = thread::Builder::new()
            .name("lutcam-frames".to_string())
            .spawn(move || {
                let mut worker = Worker {
                    registry,
                    sink,
                    config,
                    effects: EffectState::default(),
                    active: None,
                    initialized: false,
                    pending_captures: VecDeque::new(),
                    capture_seq: 0,
                };
                while let Ok(command) = rx.recv() {
                    if !worker.handle(command) {
                        break;
                    }
                }
                worker.drain_pending();
            })
            .expect("failed to spawn frame worker");
        Self {
            tx,
            worker: Some(worker),
        }
    }

    /// Offers a frame to the session.
    ///
    /// Returns `false` when the frame was discarded because the worker
    /// is behind (or the session is closed) - the late-frame policy of
    /// a live preview, where a fresher frame is always coming.
    pub fn push_frame(&self, frame: Frame) -> bool {
        match self.tx.try_send(Command::Frame(frame)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!("frame queue full, discarding late frame");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Selects the active filter and intensity.
    ///
    /// The worker rebuilds the transform cube once and reuses it for
    /// every subsequent frame. Selecting the normal filter (or an
    /// effectively zero intensity) clears the color stage entirely.
    pub fn set_filter(&self, id: FilterId, intensity: f32) -> PipelineResult<()> {
        if intensity < 0.0 {
            return Err(PipelineError::InvalidIntensity(intensity));
        }
        self.send(Command::SetFilter { id, intensity })
    }

    /// Toggles grain and sets its intensity.
    pub fn set_grain(&self, enabled: bool, intensity: f32) -> PipelineResult<()> {
        self.send(Command::SetGrain { enabled, intensity })
    }

    /// Toggles mist and sets its intensity.
    pub fn set_mist(&self, enabled: bool, intensity: f32) -> PipelineResult<()> {
        self.send(Command::SetMist { enabled, intensity })
    }

    /// Requests a still capture.
    ///
    /// The next frame to arrive runs the full processing chain and is
    /// encoded to disk. The returned handle completes exactly once,
    /// success or failure; there is no cancellation path.
    pub fn capture(&self) -> CaptureHandle {
        let (done, handle) = CaptureHandle::new();
        if self.tx.send(Command::Capture { done: done.clone() }).is_err() {
            let _ = done.send(Err(CaptureError::DeviceUnavailable));
        }
        handle
    }

    fn send(&self, command: Command) -> PipelineResult<()> {
        self.tx
            .send(command)
            .map_err(|_| PipelineError::SessionClosed)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

struct ActiveFilter {
    id: FilterId,
    cube: ColorCube,
}

struct Worker {
    registry: Arc<FilterRegistry>,
    sink: Box<dyn FrameSink>,
    config: SessionConfig,
    effects: EffectState,
    active: Option<ActiveFilter>,
    initialized: bool,
    pending_captures: VecDeque<SyncSender<CaptureResult>>,
    capture_seq: u64,
}

impl Worker {
    /// Handles one command; returns `false` to stop the loop.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Frame(frame) => self.on_frame(frame),
            Command::SetFilter { id, intensity } => self.set_filter(id, intensity),
            Command::SetGrain { enabled, intensity } => {
                self.effects.grain_enabled = enabled;
                self.effects.grain_intensity = intensity;
            }
            Command::SetMist { enabled, intensity } => {
                self.effects.mist_enabled = enabled;
                self.effects.mist_intensity = intensity;
            }
            Command::Capture { done } => self.pending_captures.push_back(done),
            Command::Shutdown => return false,
        }
        true
    }

    fn on_frame(&mut self, frame: Frame) {
        if !self.initialized {
            // First frame: straight to the sink, no transforms. The
            // user sees a live image before any cube is built.
            self.sink.push(frame.clone());
            self.initialized = true;
        } else {
            self.sink.push(self.process_preview(&frame));
        }

        if let Some(done) = self.pending_captures.pop_front() {
            let result = self.run_capture(&frame);
            // Exactly-once completion; a caller that already dropped
            // its handle is not an error.
            let _ = done.send(result);
        }
    }

    fn set_filter(&mut self, id: FilterId, intensity: f32) {
        if id.is_normal() || intensity <= f32::EPSILON {
            debug!(%id, "color stage cleared (fast path)");
            self.active = None;
            return;
        }
        match self.registry.cube_data(&id) {
            Some(lut) => {
                let cube = ColorCube::build(&lut, intensity);
                debug!(%id, intensity, size = cube.size(), "transform cube rebuilt");
                self.active = Some(ActiveFilter { id, cube });
            }
            None => {
                warn!(%id, "LUT cache miss, degrading to pass-through");
                self.active = None;
            }
        }
    }

    /// Preview path: a failing stage is skipped and the previous image
    /// passes through - a preview frame is never dropped to black.
    fn process_preview(&self, frame: &Frame) -> Frame {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let mut current = frame.clone();

        if let Some(active) = &self.active {
            current = match lutcam_ops::cube::apply(current.pixels(), w, h, &active.cube)
                .map_err(|e| e.to_string())
                .and_then(|px| current.with_pixels(px).map_err(|e| e.to_string()))
            {
                Ok(next) => next,
                Err(err) => {
                    warn!(id = %active.id, %err, "color stage failed, passing through");
                    current
                }
            };
        }
        if self.effects.mist_active() {
            current = match lutcam_ops::mist::apply(
                current.pixels(),
                w,
                h,
                self.effects.mist_intensity,
            )
            .map_err(|e| e.to_string())
            .and_then(|px| current.with_pixels(px).map_err(|e| e.to_string()))
            {
                Ok(next) => next,
                Err(err) => {
                    warn!(%err, "mist stage failed, passing through");
                    current
                }
            };
        }
        if self.effects.grain_active() {
            current = match lutcam_ops::grain::apply(
                current.pixels(),
                w,
                h,
                self.effects.grain_intensity,
            )
            .map_err(|e| e.to_string())
            .and_then(|px| current.with_pixels(px).map_err(|e| e.to_string()))
            {
                Ok(next) => next,
                Err(err) => {
                    warn!(%err, "grain stage failed, passing through");
                    current
                }
            };
        }
        current
    }

    /// Capture path: same stage order as preview, but any failure after
    /// the commit point surfaces as an explicit error.
    fn process_strict(&self, frame: &Frame) -> Result<Frame, CaptureError> {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let mut current = frame.clone();

        if let Some(active) = &self.active {
            let px = lutcam_ops::cube::apply(current.pixels(), w, h, &active.cube)
                .map_err(|e| CaptureError::StageFailed(e.to_string()))?;
            current = current
                .with_pixels(px)
                .map_err(|e| CaptureError::StageFailed(e.to_string()))?;
        }
        if self.effects.mist_active() {
            let px = lutcam_ops::mist::apply(current.pixels(), w, h, self.effects.mist_intensity)
                .map_err(|e| CaptureError::StageFailed(e.to_string()))?;
            current = current
                .with_pixels(px)
                .map_err(|e| CaptureError::StageFailed(e.to_string()))?;
        }
        if self.effects.grain_active() {
            let px = lutcam_ops::grain::apply(current.pixels(), w, h, self.effects.grain_intensity)
                .map_err(|e| CaptureError::StageFailed(e.to_string()))?;
            current = current
                .with_pixels(px)
                .map_err(|e| CaptureError::StageFailed(e.to_string()))?;
        }
        Ok(current)
    }

    fn run_capture(&mut self, frame: &Frame) -> CaptureResult {
        let processed = self.process_strict(frame)?.oriented();

        std::fs::create_dir_all(&self.config.capture_dir)
            .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
        self.capture_seq += 1;
        let path = self
            .config
            .capture_dir
            .join(format!("lutcam_capture_{:04}.jpg", self.capture_seq));

        lutcam_io::write(&path, &processed)
            .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
        debug!(path = %path.display(), "capture written");
        Ok(path)
    }

    /// Completes every still-pending capture on teardown.
    fn drain_pending(&mut self) {
        for done in self.pending_captures.drain(..) {
            let _ = done.send(Err(CaptureError::Cancelled));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CollectSink;
    use lutcam_filters::RegistryConfig;
    use std::time::Duration;

    // Deliberately non-identity so a filtered frame is observably
    // different from the raw one.
    const TINY: &str = "\
LUT_3D_SIZE 2
0.3 0.1 0.1
1.0 0.1 0.1
0.3 0.9 0.1
1.0 0.9 0.1
0.3 0.1 0.9
1.0 0.1 0.9
0.3 0.9 0.9
1.0 0.9 0.9
";

    fn registry(dir: &std::path::Path) -> Arc<FilterRegistry> {
        let builtin_dir = dir.join("builtin");
        std::fs::create_dir_all(&builtin_dir).unwrap();
        std::fs::write(builtin_dir.join("film.cube"), TINY).unwrap();
        let registry = FilterRegistry::new(RegistryConfig {
            builtin_dir,
            user_dir: dir.join("user"),
        });
        registry.load_built_ins();
        Arc::new(registry)
    }

    fn frame() -> Frame {
        Frame::solid(8, 8, [0.25, 0.5, 0.75, 1.0]).unwrap()
    }

    fn settle(sink: &CollectSink, count: usize) {
        for _ in 0..200 {
            if sink.len() >= count {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("sink never received {count} frames");
    }

    #[test]
    fn test_first_frame_bypasses_processing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CollectSink::new();
        let session = SessionHandle::spawn(
            registry(dir.path()),
            Box::new(sink.clone()),
            SessionConfig::default(),
        );
        session.set_grain(true, 1.0).unwrap();

        let raw = frame();
        assert!(session.push_frame(raw.clone()));
        settle(&sink, 1);

        // Even with grain on, frame one is the untouched raw image.
        assert_eq!(sink.frames()[0].pixels(), raw.pixels());
    }

    #[test]
    fn test_normal_filter_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CollectSink::new();
        let session = SessionHandle::spawn(
            registry(dir.path()),
            Box::new(sink.clone()),
            SessionConfig::default(),
        );
        session.set_filter(FilterId::normal(), 1.0).unwrap();

        let raw = frame();
        session.push_frame(raw.clone());
        settle(&sink, 1);
        session.push_frame(raw.clone());
        settle(&sink, 2);

        assert_eq!(sink.frames()[1].pixels(), raw.pixels());
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionHandle::spawn(
            registry(dir.path()),
            Box::new(crate::sink::NullSink),
            SessionConfig::default(),
        );
        let err = session.set_filter(FilterId::builtin("film"), -0.5).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidIntensity(_)));
    }

    #[test]
    fn test_cache_miss_degrades_to_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CollectSink::new();
        let session = SessionHandle::spawn(
            registry(dir.path()),
            Box::new(sink.clone()),
            SessionConfig::default(),
        );
        session
            .set_filter(FilterId::user("never-loaded"), 1.0)
            .unwrap();

        let raw = frame();
        session.push_frame(raw.clone());
        settle(&sink, 1);
        session.push_frame(raw.clone());
        settle(&sink, 2);

        assert_eq!(sink.frames()[1].pixels(), raw.pixels());
    }

    #[test]
    fn test_capture_without_filter_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CollectSink::new();
        let config = SessionConfig {
            capture_dir: dir.path().join("captures"),
            ..Default::default()
        };
        let session = SessionHandle::spawn(registry(dir.path()), Box::new(sink.clone()), config);

        let handle = session.capture();
        session.push_frame(frame());

        let path = handle.wait().unwrap();
        assert!(path.exists());
        let loaded = lutcam_io::read(&path).unwrap();
        assert_eq!(loaded.width(), 8);
    }

    #[test]
    fn test_capture_applies_orientation() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CollectSink::new();
        let config = SessionConfig {
            capture_dir: dir.path().join("captures"),
            ..Default::default()
        };
        let session = SessionHandle::spawn(registry(dir.path()), Box::new(sink.clone()), config);

        let raw = Frame::solid(6, 4, [0.5, 0.5, 0.5, 1.0])
            .unwrap()
            .with_orientation(lutcam_core::Orientation::RotateCw90, false);
        let handle = session.capture();
        session.push_frame(raw);

        let path = handle.wait().unwrap();
        let loaded = lutcam_io::read(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 6));
    }

    #[test]
    fn test_shutdown_cancels_pending_capture() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionHandle::spawn(
            registry(dir.path()),
            Box::new(crate::sink::NullSink),
            SessionConfig::default(),
        );
        let handle = session.capture();
        drop(session); // no frame ever arrives
        assert!(matches!(handle.wait(), Err(CaptureError::Cancelled)));
    }

    #[test]
    fn test_filtered_preview_differs_from_raw() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CollectSink::new();
        let session = SessionHandle::spawn(
            registry(dir.path()),
            Box::new(sink.clone()),
            SessionConfig::default(),
        );
        session.set_filter(FilterId::builtin("film"), 1.0).unwrap();

        let raw = frame();
        session.push_frame(raw.clone());
        settle(&sink, 1);
        session.push_frame(raw.clone());
        settle(&sink, 2);

        assert_ne!(sink.frames()[1].pixels(), raw.pixels());
    }
}
