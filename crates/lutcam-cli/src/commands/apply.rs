//! Still-image grading command.
//!
//! Runs the same fixed chain as the live pipeline: cube, then mist,
//! then grain.

use crate::{ApplyArgs, Cli};
use anyhow::{bail, Context, Result};
use lutcam_lut::{cube, ColorCube, CubeLut};
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, info};

pub fn run(args: &ApplyArgs, cli: &Cli) -> Result<()> {
    if args.intensity < 0.0 {
        bail!("intensity must be >= 0, got {}", args.intensity);
    }

    let frame = lutcam_io::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (w, h) = (frame.width() as usize, frame.height() as usize);

    let lut = resolve_lut(args, cli)?;
    let mut pixels = frame.pixels().to_vec();

    if let Some(lut) = lut {
        let color_cube = ColorCube::build(&lut, args.intensity);
        debug!(size = color_cube.size(), intensity = args.intensity, "applying color cube");
        pixels = lutcam_ops::cube::apply(&pixels, w, h, &color_cube)?;
    }
    if let Some(mist) = args.mist {
        debug!(intensity = mist, "applying mist");
        pixels = lutcam_ops::mist::apply(&pixels, w, h, mist)?;
    }
    if let Some(grain) = args.grain {
        debug!(intensity = grain, "applying grain");
        pixels = lutcam_ops::grain::apply(&pixels, w, h, grain)?;
    }

    let out = frame.with_pixels(pixels)?;
    lutcam_io::write(&args.output, &out)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if cli.verbose {
        println!("wrote {}", args.output.display());
    }
    Ok(())
}

/// Resolves the LUT source: a registered filter id, an ad-hoc file, or
/// nothing (pass-through, effects only).
fn resolve_lut(args: &ApplyArgs, cli: &Cli) -> Result<Option<Arc<CubeLut>>> {
    if let Some(path) = &args.lut {
        let lut = cube::read(path)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        return Ok(Some(Arc::new(lut)));
    }
    if let Some(id) = &args.filter {
        let id = lutcam_filters::FilterId::parse(id);
        if id.is_normal() {
            return Ok(None);
        }
        let registry = crate::open_registry(cli)?;
        let Some(lut) = registry.cube_data(&id) else {
            bail!("unknown filter id: {id} (try `lutcam list`)");
        };
        return Ok(Some(lut));
    }
    Ok(None)
}
