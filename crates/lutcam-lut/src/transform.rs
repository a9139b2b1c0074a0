//! Intensity-blended color cube construction and sampling.
//!
//! A [`ColorCube`] is the dense RGBA buffer the frame pipeline actually
//! samples: every grid cell holds the parsed LUT color blended against
//! the cell's own identity color by the selected intensity. It is built
//! once per filter/intensity change and reused for every subsequent
//! frame - rebuilding it per frame would blow the real-time budget.
//!
//! # Blend rule
//!
//! For cell `i` of an `N`-cube, grid coordinates are
//! `(i % N, (i/N) % N, i / N^2)` and the identity color is
//! `coordinate / (N - 1)` per channel (defined as 0 when `N == 1`).
//! The output is `lut * intensity + identity * (1 - intensity)`, alpha
//! fixed at 1.0. Intensity is deliberately not clamped here: values
//! above 1.0 over-drive the grade and are legitimate creative headroom.
//! Negative intensity is undefined and rejected by callers.

use crate::cube::CubeLut;

/// Dense RGBA transform cube, `size^3 * 4` components.
///
/// Cells are stored in the same order as the source LUT: red fastest,
/// blue slowest (`idx = r + g*N + b*N^2`).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCube {
    size: usize,
    data: Vec<f32>,
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl ColorCube {
    /// Builds the transform cube for a LUT at the given intensity.
    ///
    /// Pure and allocation-bounded; safe to call off the frame thread.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lutcam_lut::{ColorCube, CubeLut};
    ///
    /// let lut = CubeLut::identity(2).unwrap();
    /// let cube = ColorCube::build(&lut, 1.0);
    /// assert_eq!(cube.data().len(), 8 * 4);
    /// ```
    pub fn build(lut: &CubeLut, intensity: f32) -> Self {
        let n = lut.size();
        let cells = lut.entry_count();
        let step = if n > 1 { 1.0 / (n - 1) as f32 } else { 0.0 };

        let mut data = Vec::with_capacity(cells * 4);
        for i in 0..cells {
            let identity_r = (i % n) as f32 * step;
            let identity_g = ((i / n) % n) as f32 * step;
            let identity_b = (i / (n * n)) as f32 * step;

            let [lr, lg, lb] = lut.triple(i);
            data.push(lerp(identity_r, lr, intensity));
            data.push(lerp(identity_g, lg, intensity));
            data.push(lerp(identity_b, lb, intensity));
            data.push(1.0);
        }

        Self { size: n, data }
    }

    /// The identity (no-op) cube of a given edge length.
    pub fn identity(size: usize) -> Self {
        let lut = CubeLut::identity(size).expect("identity size within supported range");
        Self::build(&lut, 0.0)
    }

    /// Cube edge length `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat RGBA components, length `N^3 * 4`.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// RGB of a cell by grid coordinate.
    #[inline]
    fn cell(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        let idx = (r + g * self.size + b * self.size * self.size) * 4;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Samples the cube with trilinear interpolation.
    ///
    /// Input components are clamped to `[0, 1]` before lookup; alpha is
    /// not part of the transform and is handled by the caller.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        let n = self.size;
        if n == 1 {
            return self.cell(0, 0, 0);
        }

        let scale = (n - 1) as f32;
        let fr = rgb[0].clamp(0.0, 1.0) * scale;
        let fg = rgb[1].clamp(0.0, 1.0) * scale;
        let fb = rgb[2].clamp(0.0, 1.0) * scale;

        let r0 = (fr as usize).min(n - 2);
        let g0 = (fg as usize).min(n - 2);
        let b0 = (fb as usize).min(n - 2);
        let tr = fr - r0 as f32;
        let tg = fg - g0 as f32;
        let tb = fb - b0 as f32;

        let mut out = [0.0f32; 3];
        for c in 0..3 {
            let c000 = self.cell(r0, g0, b0)[c];
            let c100 = self.cell(r0 + 1, g0, b0)[c];
            let c010 = self.cell(r0, g0 + 1, b0)[c];
            let c110 = self.cell(r0 + 1, g0 + 1, b0)[c];
            let c001 = self.cell(r0, g0, b0 + 1)[c];
            let c101 = self.cell(r0 + 1, g0, b0 + 1)[c];
            let c011 = self.cell(r0, g0 + 1, b0 + 1)[c];
            let c111 = self.cell(r0 + 1, g0 + 1, b0 + 1)[c];

            let c00 = lerp(c000, c100, tr);
            let c10 = lerp(c010, c110, tr);
            let c01 = lerp(c001, c101, tr);
            let c11 = lerp(c011, c111, tr);

            let c0 = lerp(c00, c10, tg);
            let c1 = lerp(c01, c11, tg);
            out[c] = lerp(c0, c1, tb);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn warm_lut() -> CubeLut {
        // A 2-cube that pushes everything toward red.
        let file = "\
LUT_3D_SIZE 2
0.2 0.0 0.0
1.0 0.0 0.0
0.2 0.8 0.0
1.0 0.8 0.0
0.2 0.0 0.8
1.0 0.0 0.8
0.2 0.8 0.8
1.0 0.8 0.8
";
        crate::cube::parse_str(file).unwrap()
    }

    #[test]
    fn test_full_intensity_is_raw_lut() {
        let lut = warm_lut();
        let cube = ColorCube::build(&lut, 1.0);
        for i in 0..lut.entry_count() {
            let [r, g, b] = lut.triple(i);
            assert_abs_diff_eq!(cube.data()[i * 4], r, epsilon = 1e-6);
            assert_abs_diff_eq!(cube.data()[i * 4 + 1], g, epsilon = 1e-6);
            assert_abs_diff_eq!(cube.data()[i * 4 + 2], b, epsilon = 1e-6);
            assert_eq!(cube.data()[i * 4 + 3], 1.0);
        }
    }

    #[test]
    fn test_zero_intensity_is_identity_grid() {
        let lut = warm_lut();
        let cube = ColorCube::build(&lut, 0.0);
        let n = lut.size();
        for i in 0..lut.entry_count() {
            let expect = [
                (i % n) as f32,
                ((i / n) % n) as f32,
                (i / (n * n)) as f32,
            ];
            for c in 0..3 {
                assert_abs_diff_eq!(cube.data()[i * 4 + c], expect[c], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_half_intensity_blends() {
        let lut = warm_lut();
        let cube = ColorCube::build(&lut, 0.5);
        // Cell 0: lut (0.2, 0, 0), identity (0, 0, 0).
        assert_abs_diff_eq!(cube.data()[0], 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_overdrive_intensity_extrapolates() {
        let lut = warm_lut();
        let cube = ColorCube::build(&lut, 2.0);
        // Cell 0 red: 0.2 * 2 + 0 * -1 = 0.4.
        assert_abs_diff_eq!(cube.data()[0], 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_size_one_no_division_by_zero() {
        let lut = CubeLut::identity(1).unwrap();
        let cube = ColorCube::build(&lut, 1.0);
        assert_eq!(cube.data(), &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cube.sample([0.7, 0.7, 0.7]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_identity_sample_is_noop() {
        let cube = ColorCube::identity(8);
        for rgb in [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [0.3, 0.6, 0.9]] {
            let out = cube.sample(rgb);
            for c in 0..3 {
                assert_abs_diff_eq!(out[c], rgb[c], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_sample_clamps_input() {
        let cube = ColorCube::identity(4);
        let out = cube.sample([-0.5, 2.0, 0.5]);
        assert_abs_diff_eq!(out[0], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(out[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sample_interpolates_between_cells() {
        let cube = ColorCube::identity(2);
        let out = cube.sample([0.25, 0.75, 0.5]);
        assert_abs_diff_eq!(out[0], 0.25, epsilon = 1e-5);
        assert_abs_diff_eq!(out[1], 0.75, epsilon = 1e-5);
        assert_abs_diff_eq!(out[2], 0.5, epsilon = 1e-5);
    }
}
