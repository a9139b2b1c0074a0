//! Directional (motion) blur.
//!
//! The mist effect layers several of these passes at different angles.
//! Sampling clamps at the frame edge, so the output always has the
//! input's extent - the blur never grows the bounding box or shifts
//! content.

use crate::error::OpsResult;
use crate::{check_dims, CHANNELS};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Blurs along a single direction.
///
/// Averages samples along the line at `angle_deg` (degrees, screen
/// coordinates) out to `radius` pixels on both sides. A radius under
/// one pixel returns a copy of the input.
pub fn directional(
    src: &[f32],
    width: usize,
    height: usize,
    radius: f32,
    angle_deg: f32,
) -> OpsResult<Vec<f32>> {
    check_dims(src, width, height)?;

    if radius < 1.0 {
        return Ok(src.to_vec());
    }

    let taps = radius.ceil() as i64;
    let theta = angle_deg.to_radians();
    let (dx, dy) = (theta.cos(), theta.sin());
    let inv_count = 1.0 / (2 * taps + 1) as f32;

    let row = |y: usize, out_row: &mut [f32]| {
        for x in 0..width {
            let mut acc = [0.0f32; CHANNELS];
            for t in -taps..=taps {
                let step = t as f32 * radius / taps as f32;
                let sx = (x as f32 + dx * step).round() as i64;
                let sy = (y as f32 + dy * step).round() as i64;
                let sx = sx.clamp(0, width as i64 - 1) as usize;
                let sy = sy.clamp(0, height as i64 - 1) as usize;
                let p = (sy * width + sx) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += src[p + c];
                }
            }
            let o = x * CHANNELS;
            for c in 0..CHANNELS {
                out_row[o + c] = acc[c] * inv_count;
            }
        }
    };

    let mut out = vec![0.0f32; src.len()];

    #[cfg(feature = "parallel")]
    out.par_chunks_exact_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, out_row)| row(y, out_row));

    #[cfg(not(feature = "parallel"))]
    for (y, out_row) in out.chunks_exact_mut(width * CHANNELS).enumerate() {
        row(y, out_row);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_radius_is_copy() {
        let src: Vec<f32> = (0..4 * 4 * 4).map(|i| i as f32 / 64.0).collect();
        let out = directional(&src, 4, 4, 0.0, 45.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_constant_image_unchanged() {
        let src = vec![0.25f32; 8 * 8 * 4];
        let out = directional(&src, 8, 8, 3.0, 45.0).unwrap();
        for v in out {
            assert_abs_diff_eq!(v, 0.25, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_extent_preserved() {
        let src = vec![0.5f32; 6 * 3 * 4];
        let out = directional(&src, 6, 3, 10.0, 135.0).unwrap();
        assert_eq!(out.len(), src.len());
    }

    #[test]
    fn test_spike_spreads_along_direction() {
        // Single bright pixel in the middle of a 9x9 black frame.
        let (w, h) = (9usize, 9usize);
        let mut src = vec![0.0f32; w * h * 4];
        let center = (4 * w + 4) * 4;
        src[center] = 1.0;
        src[center + 3] = 1.0;

        let out = directional(&src, w, h, 3.0, 0.0).unwrap();
        // Horizontal blur: energy lands on the same row, not the column.
        let right = (4 * w + 6) * 4;
        let below = (6 * w + 4) * 4;
        assert!(out[right] > 0.0);
        assert_abs_diff_eq!(out[below], 0.0, epsilon = 1e-6);
    }
}
