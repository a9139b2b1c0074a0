//! LUT inspection command.

use crate::InfoArgs;
use anyhow::{Context, Result};
use lutcam_lut::cube;

pub fn run(args: &InfoArgs, verbose: bool) -> Result<()> {
    let lut = cube::read(&args.lut)
        .with_context(|| format!("failed to parse {}", args.lut.display()))?;

    println!("file:    {}", args.lut.display());
    if let Some(title) = lut.title() {
        println!("title:   {title}");
    }
    println!("size:    {0}x{0}x{0}", lut.size());
    println!("entries: {}", lut.entry_count());

    if verbose {
        let first = lut.triple(0);
        let last = lut.triple(lut.entry_count() - 1);
        println!("black:   {:.4} {:.4} {:.4}", first[0], first[1], first[2]);
        println!("white:   {:.4} {:.4} {:.4}", last[0], last[1], last[2]);
    }
    Ok(())
}
