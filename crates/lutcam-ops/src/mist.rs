//! Atmospheric mist.
//!
//! Four directional blur passes along the diagonals, each faded and
//! composited over the running result, finished with a slight lift in
//! brightness and contrast. Every intermediate keeps the input extent,
//! so the effect never shifts content.

use crate::blend::{source_over, with_alpha};
use crate::blur::directional;
use crate::color::brightness_contrast;
use crate::error::OpsResult;
use crate::check_dims;

/// The four diagonal passes and their per-pass radius weight.
const DIRECTIONS: [(f32, f32); 4] = [(45.0, 0.6), (135.0, 0.6), (225.0, 0.6), (315.0, 0.6)];

/// Per-pass opacity factor; scaled by intensity.
const PASS_OPACITY: f32 = 0.35;

/// Base blur radius for a ~1000px frame; larger frames scale up.
const BASE_RADIUS: f32 = 10.0;

/// Radius for the current frame size.
///
/// Keeps the visual weight of the effect constant across capture
/// resolutions: a 4K still gets proportionally more blur than the
/// preview stream.
fn adjusted_radius(width: usize, height: usize) -> f32 {
    let size_factor = width.max(height) as f32 / 1000.0;
    BASE_RADIUS * size_factor.max(1.0)
}

/// Blends mist into a frame.
///
/// Intensity scales the blur radius, each pass's opacity, and the
/// finishing brightness/contrast lift together. Zero or negative
/// intensity returns the input unchanged.
pub fn apply(src: &[f32], width: usize, height: usize, intensity: f32) -> OpsResult<Vec<f32>> {
    check_dims(src, width, height)?;

    if intensity <= 0.0 {
        return Ok(src.to_vec());
    }

    let radius = adjusted_radius(width, height);
    let mut acc = src.to_vec();

    for (angle, weight) in DIRECTIONS {
        let blurred = directional(&acc, width, height, intensity * radius * weight, angle)?;
        let faded = with_alpha(&blurred, width, height, intensity * PASS_OPACITY)?;
        acc = source_over(&faded, &acc, width, height)?;
    }

    brightness_contrast(
        &acc,
        width,
        height,
        0.03 * intensity,
        1.0 + intensity * 0.05,
    )
}
