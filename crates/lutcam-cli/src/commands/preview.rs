//! Offline session drive.
//!
//! Spawns a real frame session, feeds it the input image as a
//! synthetic frame stream, and writes every frame the display sink
//! received. Frame 0 always comes out raw (the first-frame fast path);
//! later frames carry the selected filter and effects.

use crate::{Cli, PreviewArgs};
use anyhow::{bail, Context, Result};
use lutcam_filters::FilterId;
use lutcam_pipeline::{CollectSink, SessionConfig, SessionHandle};
use std::sync::Arc;
use std::time::Duration;

pub fn run(args: &PreviewArgs, cli: &Cli) -> Result<()> {
    if args.frames == 0 {
        bail!("frame count must be at least 1");
    }
    if args.intensity < 0.0 {
        bail!("intensity must be >= 0, got {}", args.intensity);
    }

    let frame = lutcam_io::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let registry = Arc::new(crate::open_registry(cli)?);
    let sink = CollectSink::new();
    let session = SessionHandle::spawn(
        registry,
        Box::new(sink.clone()),
        SessionConfig {
            capture_dir: args.output.clone(),
            ..Default::default()
        },
    );

    if let Some(id) = &args.filter {
        session.set_filter(FilterId::parse(id), args.intensity)?;
    }
    if let Some(grain) = args.grain {
        session.set_grain(true, grain)?;
    }
    if let Some(mist) = args.mist {
        session.set_mist(true, mist)?;
    }

    let mut pushed = 0;
    while pushed < args.frames {
        if session.push_frame(frame.clone()) {
            pushed += 1;
        } else {
            // Queue full: the session is processing; behave like a
            // capture device and retry on the next tick.
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    // Wait for the worker to drain, then shut down.
    while sink.len() < args.frames {
        std::thread::sleep(Duration::from_millis(5));
    }
    drop(session);

    for (i, rendered) in sink.frames().iter().enumerate() {
        let path = args.output.join(format!("frame_{i:03}.png"));
        lutcam_io::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    println!("wrote {} frames to {}", sink.len(), args.output.display());
    Ok(())
}
