//! Applies a prebuilt color cube to a frame buffer.

use crate::error::OpsResult;
use crate::{check_dims, CHANNELS};
use lutcam_lut::ColorCube;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs every pixel through the cube's trilinear lookup.
///
/// The cube is built once per filter/intensity change and reused here
/// frame after frame; this function never rebuilds it. Alpha passes
/// through untouched.
pub fn apply(src: &[f32], width: usize, height: usize, cube: &ColorCube) -> OpsResult<Vec<f32>> {
    check_dims(src, width, height)?;

    let row = |y: usize, out_row: &mut [f32]| {
        let base = y * width * CHANNELS;
        for x in 0..width {
            let p = base + x * CHANNELS;
            let o = x * CHANNELS;
            let rgb = cube.sample([src[p], src[p + 1], src[p + 2]]);
            out_row[o] = rgb[0];
            out_row[o + 1] = rgb[1];
            out_row[o + 2] = rgb[2];
            out_row[o + 3] = src[p + 3];
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
    fn test_identity_cube_is_noop() {
        let cube = ColorCube::identity(8);
        let src: Vec<f32> = (0..4 * 4 * 4).map(|i| (i % 11) as f32 / 10.0).collect();
        let out = apply(&src, 4, 4, &cube).unwrap();
        for (a, b) in src.iter().zip(out.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_alpha_untouched() {
        let cube = ColorCube::identity(2);
        let src = vec![0.3, 0.3, 0.3, 0.7];
        let out = apply(&src, 1, 1, &cube).unwrap();
        assert_eq!(out[3], 0.7);
    }

    #[test]
    fn test_dimension_check() {
        let cube = ColorCube::identity(2);
        let err = apply(&[0.0; 7], 1, 1, &cube).unwrap_err();
        assert!(matches!(err, crate::OpsError::LengthMismatch { .. }));
    }
}
