//! Adobe/Resolve `.cube` LUT parsing.
//!
//! The `.cube` format is a simple text-based 3D LUT format supported by
//! DaVinci Resolve, Adobe applications, and most grading tools.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0
//! DOMAIN_MAX 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Data lines are three whitespace-separated floats in the order the
//! blue axis varies slowest: entry `i` corresponds to grid cell
//! `(r, g, b)` with `i = r + g*N + b*N^2`.
//!
//! # Example
//!
//! ```rust,ignore
//! use lutcam_lut::cube;
//!
//! let lut = cube::read("grade.cube")?;
//! println!("{}^3 cube", lut.size());
//! ```

use crate::error::{CubeError, LutResult};
use crate::MAX_CUBE_SIZE;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A parsed, validated 3D LUT payload.
///
/// Holds the cube edge length `N` and a flat sequence of `N^3` RGB
/// triples (`N^3 * 3` components), every component normalized to
/// `[0, 1]` against the file's declared domain. Entries are kept in
/// file order (red fastest, blue slowest). Never mutated after a
/// successful parse; a re-parse replaces the value wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLut {
    title: Option<String>,
    size: usize,
    data: Vec<f32>,
}

impl CubeLut {
    /// The `TITLE` string, if the file declared one. Informational only.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Cube edge length `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat RGB components, length `N^3 * 3`.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of grid cells (`N^3`).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// RGB triple for cell `i` in file order.
    #[inline]
    pub fn triple(&self, i: usize) -> [f32; 3] {
        let d = i * 3;
        [self.data[d], self.data[d + 1], self.data[d + 2]]
    }

    /// Builds an identity LUT: every cell maps to its own grid color.
    ///
    /// Useful in tests and as a neutral reference; the live pipeline
    /// never applies one (the normal filter skips the color stage).
    pub fn identity(size: usize) -> LutResult<Self> {
        if size == 0 || size > MAX_CUBE_SIZE {
            return Err(CubeError::UnsupportedSize(size));
        }
        let step = if size > 1 {
            1.0 / (size - 1) as f32
        } else {
            0.0
        };
        let mut data = Vec::with_capacity(size * size * size * 3);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(r as f32 * step);
                    data.push(g as f32 * step);
                    data.push(b as f32 * step);
                }
            }
        }
        Ok(Self {
            title: None,
            size,
            data,
        })
    }
}

/// Reads and parses a `.cube` file from disk.
pub fn read<P: AsRef<Path>>(path: P) -> LutResult<CubeLut> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

/// Parses `.cube` file contents.
///
/// Directives are order-independent, so parsing runs in two passes:
/// the first collects `TITLE`, `DOMAIN_MIN`/`DOMAIN_MAX`, and
/// `LUT_3D_SIZE`; the second normalizes and collects the data lines.
pub fn parse_str(contents: &str) -> LutResult<CubeLut> {
    let mut title: Option<String> = None;
    let mut domain_min = 0.0f32;
    let mut domain_max = 1.0f32;
    let mut size: Option<usize> = None;

    for line in contents.lines() {
        let line = line.trim();

        if line.starts_with("TITLE") {
            // TITLE "Name" - everything between the first pair of quotes.
            let mut quoted = line.splitn(3, '"');
            quoted.next();
            if let Some(name) = quoted.next() {
                title = Some(name.to_string());
            }
        } else if line.starts_with("DOMAIN_MIN") {
            domain_min = parse_domain_value(line, 0.0);
        } else if line.starts_with("DOMAIN_MAX") {
            domain_max = parse_domain_value(line, 1.0);
        } else if line.starts_with("LUT_3D_SIZE") {
            size = Some(parse_size(line)?);
        }
    }

    let size = size.ok_or(CubeError::MissingSize)?;

    if !(domain_max > domain_min) {
        debug!(domain_min, domain_max, "degenerate domain, using defaults");
        domain_min = 0.0;
        domain_max = 1.0;
    }
    let domain_span = domain_max - domain_min;

    let mut data: Vec<f32> = Vec::with_capacity(size * size * size * 3);

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with("TITLE")
            || line.starts_with("DOMAIN_")
            || line.starts_with("LUT_")
        {
            continue;
        }

        // Data lines must carry exactly three parseable floats. Lines
        // that don't are skipped, not fatal: the trailing length check
        // still catches truncated files. Deliberate leniency carried
        // over from the shipped parser.
        let mut rgb = [0.0f32; 3];
        let mut ok = 0usize;
        for (i, token) in line.split_whitespace().enumerate() {
            if i >= 3 {
                ok = 0;
                break;
            }
            match token.parse::<f32>() {
                Ok(v) => {
                    rgb[i] = v;
                    ok += 1;
                }
                Err(_) => {
                    ok = 0;
                    break;
                }
            }
        }
        if ok != 3 {
            debug!(line, "skipping malformed data line");
            continue;
        }

        for v in rgb {
            data.push(((v - domain_min) / domain_span).clamp(0.0, 1.0));
        }
    }

    let expected = size * size * size * 3;
    if data.len() != expected {
        return Err(CubeError::SizeMismatch {
            expected,
            found: data.len(),
        });
    }

    Ok(CubeLut { title, size, data })
}

/// Parses the `LUT_3D_SIZE <int>` directive and range-checks it.
fn parse_size(line: &str) -> LutResult<usize> {
    let mut parts = line.split_whitespace();
    parts.next();
    let token = parts.next().ok_or(CubeError::MissingSize)?;
    let size: usize = token
        .parse()
        .map_err(|_| CubeError::InvalidSize(token.to_string()))?;
    if size == 0 || size > MAX_CUBE_SIZE {
        return Err(CubeError::UnsupportedSize(size));
    }
    Ok(size)
}

/// Parses a scalar `DOMAIN_MIN`/`DOMAIN_MAX` value, falling back to the
/// format default when the token is absent or unparseable.
fn parse_domain_value(line: &str, default: f32) -> f32 {
    line.split_whitespace()
        .nth(1)
        .and_then(|t| t.parse().ok())
        .unwrap_or_else(|| {
            debug!(line, default, "unparseable domain directive, using default");
            default
        })
}
