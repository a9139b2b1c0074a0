//! Synthetic film grain.
//!
//! Regenerates an independent monochrome noise field for every frame -
//! the frame-to-frame flicker is what makes synthetic grain read as
//! film rather than a static texture, so no temporal coherence is
//! attempted. The structure is deterministic (block size, blend chain,
//! final correction); only the noise values vary.

use crate::blend::soft_light_channel;
use crate::error::OpsResult;
use crate::{check_dims, CHANNELS};
use lutcam_core::luminance_rec709;
use rand::Rng;

/// Fixed contrast applied to the noise field before blending.
///
/// Pulls the noise toward mid-gray so the soft-light blend shades
/// rather than overwrites.
const NOISE_CONTRAST: f32 = 0.8;

/// Fixed brightness correction applied after the blend.
const FINISH_BRIGHTNESS: f32 = -0.01;

/// Blends film grain into a frame.
///
/// `intensity` controls the grain scale: blocks grow from one pixel at
/// intensity 0 toward three pixels at intensity 1, so stronger grain
/// reads coarser, as on pushed film stock.
pub fn apply(src: &[f32], width: usize, height: usize, intensity: f32) -> OpsResult<Vec<f32>> {
    check_dims(src, width, height)?;

    // Coarser blocks as intensity grows: 1 + 2 * intensity pixels.
    let block = (1.0 + 2.0 * intensity).round().max(1.0) as usize;
    let grid_w = width.div_ceil(block);
    let grid_h = height.div_ceil(block);

    // Monochrome noise field at block resolution. Color noise collapsed
    // through Rec.709 luminance, then contrast-compressed toward gray.
    let mut rng = rand::thread_rng();
    let mut field = Vec::with_capacity(grid_w * grid_h);
    for _ in 0..grid_w * grid_h {
        let rgb: [f32; 3] = [rng.gen(), rng.gen(), rng.gen()];
        let mono = luminance_rec709(rgb);
        field.push((mono - 0.5) * NOISE_CONTRAST + 0.5);
    }

    let mut out = vec![0.0f32; src.len()];
    for y in 0..height {
        let field_row = (y / block) * grid_w;
        for x in 0..width {
            let n = field[field_row + x / block];
            let p = (y * width + x) * CHANNELS;
            for c in 0..3 {
                let lit = soft_light_channel(n, src[p + c]);
                out[p + c] = lit + FINISH_BRIGHTNESS;
            }
            out[p + 3] = src[p + 3];
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stays_near_input() {
        // Soft light around a compressed-noise field shifts mid-gray by
        // a bounded amount.
        let src = vec![0.5f32; 16 * 16 * 4];
        let out = apply(&src, 16, 16, 0.15).unwrap();
        for px in out.chunks_exact(4) {
            for c in 0..3 {
                assert!((px[c] - 0.5).abs() < 0.25, "grain moved too far: {}", px[c]);
            }
            assert_eq!(px[3], 1.0);
        }
    }

    #[test]
    fn test_noise_differs_between_calls() {
        let src = vec![0.5f32; 32 * 32 * 4];
        let a = apply(&src, 32, 32, 0.5).unwrap();
        let b = apply(&src, 32, 32, 0.5).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_high_intensity_coarsens_blocks() {
        // At intensity 1 the block size is 3: pixels inside one block
        // of a flat source get identical grain.
        let src = vec![0.5f32; 12 * 12 * 4];
        let out = apply(&src, 12, 12, 1.0).unwrap();
        let p00 = out[0];
        let p10 = out[4];
        let p20 = out[2 * 4];
        assert_eq!(p00, p10);
        assert_eq!(p00, p20);
    }

    #[test]
    fn test_alpha_preserved() {
        let src = vec![0.2, 0.4, 0.6, 0.9];
        let out = apply(&src, 1, 1, 0.3).unwrap();
        assert_eq!(out[3], 0.9);
    }
}
