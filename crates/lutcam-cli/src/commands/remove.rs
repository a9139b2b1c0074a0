//! User filter removal command.

use crate::{Cli, RemoveArgs};
use anyhow::{Context, Result};
use lutcam_filters::FilterId;

pub fn run(args: &RemoveArgs, cli: &Cli) -> Result<()> {
    let registry = crate::open_registry(cli)?;
    let id = FilterId::parse(&args.id);
    let removed = registry
        .remove_user_filter(&id)
        .with_context(|| format!("failed to remove {id}"))?;
    if removed {
        println!("removed {id}");
    } else {
        println!("{id} is not a removable user filter");
    }
    Ok(())
}
