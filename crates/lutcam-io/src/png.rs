//! PNG read/write.
//!
//! Lossless 8-bit RGBA; the CLI's format of choice for inspecting
//! pipeline output exactly.

use crate::error::{IoError, IoResult};
use crate::{to_f32, to_u8};
use lutcam_core::Frame;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Reads a PNG into an RGBA frame.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Frame> {
    let file = File::open(path.as_ref())?;
    let decoder = png::Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => buf,
        (png::ColorType::Rgb, png::BitDepth::Eight) => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            buf.iter().flat_map(|&v| [v, v, v, 255]).collect()
        }
        (color, depth) => {
            return Err(IoError::DecodeError(format!(
                "unsupported PNG layout: {color:?}/{depth:?}"
            )))
        }
    };

    Ok(Frame::from_rgba(info.width, info.height, to_f32(&rgba))?)
}

/// Writes a frame as 8-bit RGBA PNG.
pub fn write<P: AsRef<Path>>(path: P, frame: &Frame) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&to_u8(frame.pixels()))
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let frame = Frame::from_fn(8, 8, |x, y| {
            [x as f32 / 7.0, y as f32 / 7.0, 0.25, 1.0]
        })
        .unwrap();

        write(&path, &frame).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.height(), 8);
        for (a, b) in frame.pixels().iter().zip(loaded.pixels().iter()) {
            assert!((a - b).abs() < 1.0 / 255.0 + 1e-6);
        }
    }
}
