//! Frame buffer and orientation types.
//!
//! A [`Frame`] is a single raw image sample from a continuous capture
//! stream, or a single captured still. It is immutable once produced:
//! pipeline stages only read it and build new frames from the result.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with
//! interleaved RGBA components:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use lutcam_core::Frame;
//!
//! let frame = Frame::solid(4, 4, [0.5, 0.25, 0.1, 1.0]).unwrap();
//! assert_eq!(frame.pixel(0, 0).unwrap(), [0.5, 0.25, 0.1, 1.0]);
//! ```

use crate::error::{CoreError, CoreResult};
use std::sync::Arc;

/// Number of components per pixel. Frames are always RGBA.
pub const CHANNELS: usize = 4;

/// Rotation and mirror state of a frame relative to upright display.
///
/// Describes the transform that must be applied to present the frame
/// upright: first the rotation, then an optional horizontal mirror.
/// Capture devices report this per still; the preview feed from a front
/// camera arrives mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Already upright; [`Frame::oriented`] is a no-op copy.
    #[default]
    Up,
    /// Rotate 90 degrees clockwise to display upright.
    RotateCw90,
    /// Rotate 180 degrees to display upright.
    RotateCw180,
    /// Rotate 270 degrees clockwise to display upright.
    RotateCw270,
}

/// Immutable RGBA frame buffer.
///
/// The pixel buffer is stored in an `Arc<Vec<f32>>`, so cloning a frame
/// (for a display sink, a capture path, a test) shares the underlying
/// data instead of copying it.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Arc<Vec<f32>>,
    width: u32,
    height: u32,
    orientation: Orientation,
    mirrored: bool,
}

impl Frame {
    /// Creates a frame from an interleaved RGBA buffer.
    ///
    /// The buffer length must be exactly `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<f32>) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyFrame { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(CoreError::BufferMismatch {
                width,
                height,
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            orientation: Orientation::Up,
            mirrored: false,
        })
    }

    /// Creates a frame filled with a single RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [f32; 4]) -> CoreResult<Self> {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self::from_rgba(width, height, data)
    }

    /// Creates a frame by evaluating `f(x, y)` for every pixel.
    ///
    /// Mostly a test and synthetic-source helper.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> CoreResult<Self>
    where
        F: FnMut(u32, u32) -> [f32; 4],
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_rgba(width, height, data)
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Orientation that must be applied to display the frame upright.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the frame is horizontally mirrored (front-camera feed).
    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Returns a copy of the frame tagged with a new orientation.
    ///
    /// Only the tag changes; pixel data is shared with `self`.
    pub fn with_orientation(&self, orientation: Orientation, mirrored: bool) -> Self {
        Self {
            data: Arc::clone(&self.data),
            width: self.width,
            height: self.height,
            orientation,
            mirrored,
        }
    }

    /// The interleaved RGBA pixel buffer.
    #[inline]
    pub fn pixels(&self) -> &[f32] {
        &self.data
    }

    /// Reads one RGBA pixel.
    pub fn pixel(&self, x: u32, y: u32) -> CoreResult<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return Err(CoreError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Ok([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Builds a new frame with the same dimensions and orientation tags
    /// but a replaced pixel buffer.
    ///
    /// This is how processing stages hand their output back: the stage
    /// computes a new buffer and the frame metadata carries over.
    pub fn with_pixels(&self, data: Vec<f32>) -> CoreResult<Self> {
        let expected = self.width as usize * self.height as usize * CHANNELS;
        if data.len() != expected {
            return Err(CoreError::BufferMismatch {
                width: self.width,
                height: self.height,
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            mirrored: self.mirrored,
        })
    }

    /// Resamples the frame to upright, unmirrored presentation.
    ///
    /// Applies the tagged rotation and mirror and clears both tags.
    /// Returns a shared-data copy when the frame is already upright.
    pub fn oriented(&self) -> Self {
        if self.orientation == Orientation::Up && !self.mirrored {
            return self.clone();
        }

        let (sw, sh) = (self.width as usize, self.height as usize);
        let (dw, dh) = match self.orientation {
            Orientation::Up | Orientation::RotateCw180 => (sw, sh),
            Orientation::RotateCw90 | Orientation::RotateCw270 => (sh, sw),
        };

        let mut out = vec![0.0f32; dw * dh * CHANNELS];
        for dy in 0..dh {
            for dx in 0..dw {
                // Invert the display transform: mirror is applied last on
                // output, so undo it first when mapping back to source.
                let ux = if self.mirrored { dw - 1 - dx } else { dx };
                let (sx, sy) = match self.orientation {
                    Orientation::Up => (ux, dy),
                    Orientation::RotateCw90 => (dy, sh - 1 - ux),
                    Orientation::RotateCw180 => (sw - 1 - ux, sh - 1 - dy),
                    Orientation::RotateCw270 => (sw - 1 - dy, ux),
                };
                let src = (sy * sw + sx) * CHANNELS;
                let dst = (dy * dw + dx) * CHANNELS;
                out[dst..dst + CHANNELS].copy_from_slice(&self.data[src..src + CHANNELS]);
            }
        }

        Self {
            data: Arc::new(out),
            width: dw as u32,
            height: dh as u32,
            orientation: Orientation::Up,
            mirrored: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Frame {
        Frame::from_fn(w, h, |x, y| {
            [x as f32 / 10.0, y as f32 / 10.0, 0.0, 1.0]
        })
        .unwrap()
    }

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        let err = Frame::from_rgba(2, 2, vec![0.0; 15]).unwrap_err();
        assert!(matches!(err, CoreError::BufferMismatch { expected: 16, found: 15, .. }));
    }

    #[test]
    fn test_solid_fill() {
        let f = Frame::solid(3, 2, [0.1, 0.2, 0.3, 1.0]).unwrap();
        assert_eq!(f.pixels().len(), 3 * 2 * 4);
        assert_eq!(f.pixel(2, 1).unwrap(), [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_clone_shares_data() {
        let f = gradient(4, 4);
        let g = f.clone();
        assert!(std::ptr::eq(f.pixels().as_ptr(), g.pixels().as_ptr()));
    }

    #[test]
    fn test_oriented_up_is_identity() {
        let f = gradient(4, 3);
        let o = f.oriented();
        assert_eq!(o.width(), 4);
        assert_eq!(o.height(), 3);
        assert_eq!(o.pixels(), f.pixels());
    }

    #[test]
    fn test_oriented_cw90_swaps_dimensions() {
        let f = gradient(4, 3).with_orientation(Orientation::RotateCw90, false);
        let o = f.oriented();
        assert_eq!(o.width(), 3);
        assert_eq!(o.height(), 4);
        // Source top-left lands on the top-right edge after a CW rotation.
        assert_eq!(o.pixel(2, 0).unwrap(), f.pixel(0, 0).unwrap());
    }

    #[test]
    fn test_oriented_cw180_round_trip() {
        let f = gradient(4, 3).with_orientation(Orientation::RotateCw180, false);
        let o = f.oriented();
        assert_eq!(o.pixel(0, 0).unwrap(), f.pixel(3, 2).unwrap());
        assert_eq!(o.pixel(3, 2).unwrap(), f.pixel(0, 0).unwrap());
    }

    #[test]
    fn test_oriented_mirror() {
        let f = gradient(4, 3).with_orientation(Orientation::Up, true);
        let o = f.oriented();
        assert_eq!(o.pixel(0, 1).unwrap(), f.pixel(3, 1).unwrap());
        assert!(!o.is_mirrored());
    }
}
