//! # lutcam-ops
//!
//! Per-frame image operations for the lutcam pipeline.
//!
//! All operations share the same shape: they take an interleaved RGBA
//! `f32` slice plus dimensions and return a new buffer, leaving the
//! input untouched. The frame pipeline composes them in a fixed order:
//!
//! ```text
//! raw frame -> [cube] -> [mist] -> [grain] -> sink
//! ```
//!
//! Grain sits last by policy - it is meant to ride on top of every
//! other grading stage.
//!
//! # Modules
//!
//! - [`cube`] - applies a prebuilt [`lutcam_lut::ColorCube`]
//! - [`grain`] - synthetic film grain (fresh noise every frame)
//! - [`mist`] - directional-blur atmosphere
//! - [`blur`] - the directional blur primitive behind mist
//! - [`blend`] - soft-light / source-over compositing
//! - [`color`] - brightness/contrast correction
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel processing via rayon

#![warn(missing_docs)]

pub mod blend;
pub mod blur;
pub mod color;
pub mod cube;
pub mod error;
pub mod grain;
pub mod mist;

pub use error::{OpsError, OpsResult};

/// Components per pixel; every operation in this crate is RGBA.
pub const CHANNELS: usize = 4;

/// Validates that `src` holds a `width x height` RGBA buffer.
pub(crate) fn check_dims(src: &[f32], width: usize, height: usize) -> OpsResult<()> {
    let expected = width * height * CHANNELS;
    if src.len() != expected {
        return Err(OpsError::LengthMismatch {
            expected,
            found: src.len(),
        });
    }
    Ok(())
}
