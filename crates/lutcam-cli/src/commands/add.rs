//! User filter installation command.

use crate::{AddArgs, Cli};
use anyhow::{Context, Result};

pub fn run(args: &AddArgs, cli: &Cli) -> Result<()> {
    let registry = crate::open_registry(cli)?;
    let descriptor = registry
        .add_user_filter(&args.file)
        .with_context(|| format!("failed to install {}", args.file.display()))?;
    println!("installed {} as {}", descriptor.name, descriptor.id);
    Ok(())
}
