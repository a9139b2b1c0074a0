//! Brightness/contrast correction.

use crate::error::OpsResult;
use crate::{check_dims, CHANNELS};

/// Applies a brightness offset and a contrast scale around mid-gray.
///
/// `out = (in - 0.5) * contrast + 0.5 + brightness` per RGB channel;
/// alpha passes through. Output is not clamped - downstream encoding
/// clamps once at the edge of the pipeline, keeping intermediate
/// stages lossless.
pub fn brightness_contrast(
    src: &[f32],
    width: usize,
    height: usize,
    brightness: f32,
    contrast: f32,
) -> OpsResult<Vec<f32>> {
    check_dims(src, width, height)?;

    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(CHANNELS) {
        for c in px.iter_mut().take(3) {
            *c = (*c - 0.5) * contrast + 0.5 + brightness;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_neutral_parameters_are_identity() {
        let src = vec![0.1, 0.6, 0.9, 1.0];
        let out = brightness_contrast(&src, 1, 1, 0.0, 1.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let src = vec![0.5, 0.5, 0.5, 1.0];
        let out = brightness_contrast(&src, 1, 1, 0.0, 2.0).unwrap();
        for c in 0..3 {
            assert_abs_diff_eq!(out[c], 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_brightness_shifts_all_channels() {
        let src = vec![0.2, 0.4, 0.6, 1.0];
        let out = brightness_contrast(&src, 1, 1, 0.1, 1.0).unwrap();
        assert_abs_diff_eq!(out[0], 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(out[1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(out[2], 0.7, epsilon = 1e-6);
        assert_eq!(out[3], 1.0);
    }
}
