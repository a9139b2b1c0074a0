//! Compositing and blending primitives.
//!
//! Two blend rules cover everything the effects need:
//!
//! - [`source_over`] - Porter-Duff over, used by the mist accumulator
//! - [`soft_light`] - Photoshop-style soft light, used to sit grain on
//!   top of the graded image
//!
//! Pixel-level variants are exposed for the hot loops; buffer-level
//! variants validate dimensions and allocate the output.

use crate::error::OpsResult;
use crate::{check_dims, CHANNELS};

/// Composites foreground over background (Porter-Duff over).
///
/// Operates on unpremultiplied RGBA: `out = Fg*a + Bg*b*(1-a)`, with
/// the result renormalized by the combined alpha.
///
/// # Example
///
/// ```rust
/// use lutcam_ops::blend::over_pixel;
///
/// let fg = [1.0, 0.0, 0.0, 0.5];
/// let bg = [0.0, 0.0, 1.0, 1.0];
/// let out = over_pixel(fg, bg);
/// assert!(out[0] > 0.4 && out[2] > 0.4);
/// ```
#[inline]
pub fn over_pixel(fg: [f32; 4], bg: [f32; 4]) -> [f32; 4] {
    let fg_a = fg[3];
    let bg_a = bg[3];
    let out_a = fg_a + bg_a * (1.0 - fg_a);

    if out_a < 1e-8 {
        return [0.0, 0.0, 0.0, 0.0];
    }

    let inv = 1.0 / out_a;
    [
        (fg[0] * fg_a + bg[0] * bg_a * (1.0 - fg_a)) * inv,
        (fg[1] * fg_a + bg[1] * bg_a * (1.0 - fg_a)) * inv,
        (fg[2] * fg_a + bg[2] * bg_a * (1.0 - fg_a)) * inv,
        out_a,
    ]
}

/// Soft-light blend of one channel: `fg` lights or shades `bg`.
#[inline]
pub fn soft_light_channel(fg: f32, bg: f32) -> f32 {
    if fg <= 0.5 {
        bg - (1.0 - 2.0 * fg) * bg * (1.0 - bg)
    } else {
        let d = if bg <= 0.25 {
            ((16.0 * bg - 12.0) * bg + 4.0) * bg
        } else {
            bg.sqrt()
        };
        bg + (2.0 * fg - 1.0) * (d - bg)
    }
}

/// Buffer-level source-over compositing.
pub fn source_over(
    fg: &[f32],
    bg: &[f32],
    width: usize,
    height: usize,
) -> OpsResult<Vec<f32>> {
    check_dims(fg, width, height)?;
    check_dims(bg, width, height)?;

    let mut out = vec![0.0f32; fg.len()];
    for (i, chunk) in out.chunks_exact_mut(CHANNELS).enumerate() {
        let p = i * CHANNELS;
        let blended = over_pixel(
            [fg[p], fg[p + 1], fg[p + 2], fg[p + 3]],
            [bg[p], bg[p + 1], bg[p + 2], bg[p + 3]],
        );
        chunk.copy_from_slice(&blended);
    }
    Ok(out)
}

/// Buffer-level soft-light: blends `fg` RGB over `bg` RGB, keeping the
/// background alpha.
pub fn soft_light(
    fg: &[f32],
    bg: &[f32],
    width: usize,
    height: usize,
) -> OpsResult<Vec<f32>> {
    check_dims(fg, width, height)?;
    check_dims(bg, width, height)?;

    let mut out = vec![0.0f32; fg.len()];
    for i in (0..out.len()).step_by(CHANNELS) {
        for c in 0..3 {
            out[i + c] = soft_light_channel(fg[i + c], bg[i + c]);
        }
        out[i + 3] = bg[i + 3];
    }
    Ok(out)
}

/// Scales the alpha channel of every pixel by `alpha`.
///
/// The RGB channels pass through untouched; combined with
/// [`source_over`] this fades a layer without premultiplying it.
pub fn with_alpha(src: &[f32], width: usize, height: usize, alpha: f32) -> OpsResult<Vec<f32>> {
    check_dims(src, width, height)?;
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(CHANNELS) {
        px[3] *= alpha;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_over_opaque_foreground_wins() {
        let out = over_pixel([0.2, 0.4, 0.6, 1.0], [0.9, 0.9, 0.9, 1.0]);
        assert_eq!(out, [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn test_over_transparent_foreground_is_noop() {
        let bg = [0.9, 0.1, 0.5, 1.0];
        let out = over_pixel([0.0, 1.0, 0.0, 0.0], bg);
        for c in 0..4 {
            assert_abs_diff_eq!(out[c], bg[c], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_soft_light_neutral_gray_is_identity() {
        // fg = 0.5 leaves the background unchanged.
        for bg in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_abs_diff_eq!(soft_light_channel(0.5, bg), bg, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_soft_light_darkens_and_lightens() {
        assert!(soft_light_channel(0.1, 0.5) < 0.5);
        assert!(soft_light_channel(0.9, 0.5) > 0.5);
    }

    #[test]
    fn test_with_alpha_scales_only_alpha() {
        let src = vec![0.5, 0.5, 0.5, 1.0];
        let out = with_alpha(&src, 1, 1, 0.35).unwrap();
        assert_eq!(&out[..3], &src[..3]);
        assert_abs_diff_eq!(out[3], 0.35, epsilon = 1e-6);
    }

    #[test]
    fn test_source_over_half_alpha_mixes() {
        let fg = vec![1.0, 0.0, 0.0, 0.5];
        let bg = vec![0.0, 0.0, 0.0, 1.0];
        let out = source_over(&fg, &bg, 1, 1).unwrap();
        assert_abs_diff_eq!(out[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(out[3], 1.0, epsilon = 1e-6);
    }
}
