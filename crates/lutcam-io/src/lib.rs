//! # lutcam-io
//!
//! Still-image encode/decode for the lutcam pipeline.
//!
//! The capture path encodes finished frames to JPEG; the CLI reads and
//! writes both JPEG and PNG. Nothing here runs on the per-frame preview
//! path - file I/O belongs to load/capture time only.
//!
//! # Example
//!
//! ```rust,ignore
//! use lutcam_io as io;
//!
//! let frame = io::read("photo.jpg")?;
//! io::write("graded.png", &frame)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod jpeg;
pub mod png;

pub use error::{IoError, IoResult};

use lutcam_core::Frame;
use std::path::Path;

/// JPEG quality used by the capture file sink.
pub const CAPTURE_JPEG_QUALITY: u8 = 80;

/// Reads a still image, dispatching on the file extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Frame> {
    let path = path.as_ref();
    match extension_of(path)?.as_str() {
        "jpg" | "jpeg" => jpeg::read(path),
        "png" => png::read(path),
        other => Err(IoError::UnsupportedExtension(other.to_string())),
    }
}

/// Writes a still image, dispatching on the file extension.
pub fn write<P: AsRef<Path>>(path: P, frame: &Frame) -> IoResult<()> {
    let path = path.as_ref();
    match extension_of(path)?.as_str() {
        "jpg" | "jpeg" => jpeg::write(path, frame, CAPTURE_JPEG_QUALITY),
        "png" => png::write(path, frame),
        other => Err(IoError::UnsupportedExtension(other.to_string())),
    }
}

fn extension_of(path: &Path) -> IoResult<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnsupportedExtension(path.display().to_string()))
}

/// Converts a frame's `f32` components to 8-bit, clamping to `[0, 1]`.
pub(crate) fn to_u8(components: &[f32]) -> Vec<u8> {
    components
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
        .collect()
}

/// Converts 8-bit components back to `f32`.
pub(crate) fn to_f32(components: &[u8]) -> Vec<f32> {
    components.iter().map(|v| *v as f32 / 255.0).collect()
}
