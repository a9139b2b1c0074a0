//! JPEG read/write.
//!
//! JPEG is the capture output format: lossy, universal, and what the
//! photo roll expects. Alpha is not representable, so writing drops it
//! and reading restores an opaque alpha of 1.0.

use crate::error::{IoError, IoResult};
use crate::{to_f32, to_u8};
use lutcam_core::{Frame, CHANNELS};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a JPEG into an opaque RGBA frame.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Frame> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG header info".to_string()))?;

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => {
            pixels.iter().flat_map(|&v| [v, v, v]).collect()
        }
        other => {
            return Err(IoError::DecodeError(format!(
                "unsupported JPEG pixel format: {other:?}"
            )))
        }
    };

    let width = info.width as u32;
    let height = info.height as u32;
    let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for px in rgb.chunks_exact(3) {
        data.extend(to_f32(px));
        data.push(1.0);
    }
    Ok(Frame::from_rgba(width, height, data)?)
}

/// Encodes a frame as JPEG at the given quality (1-100).
pub fn write<P: AsRef<Path>>(path: P, frame: &Frame, quality: u8) -> IoResult<()> {
    let rgb: Vec<u8> = frame
        .pixels()
        .chunks_exact(CHANNELS)
        .flat_map(|px| to_u8(&px[..3]))
        .collect();

    let mut buffer = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut buffer, quality);
    encoder
        .encode(
            &rgb,
            frame.width() as u16,
            frame.height() as u16,
            jpeg_encoder::ColorType::Rgb,
        )
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    std::fs::write(path.as_ref(), &buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_dimensions_and_tone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.jpg");
        let frame = Frame::solid(16, 8, [0.5, 0.5, 0.5, 1.0]).unwrap();

        write(&path, &frame, 90).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.width(), 16);
        assert_eq!(loaded.height(), 8);
        // Lossy, but a flat mid-gray survives within a small tolerance.
        let px = loaded.pixel(8, 4).unwrap();
        for c in 0..3 {
            assert!((px[c] - 0.5).abs() < 0.05, "channel {c} drifted: {}", px[c]);
        }
        assert_eq!(px[3], 1.0);
    }
}
