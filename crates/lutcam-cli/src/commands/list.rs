//! Filter listing command.

use crate::{Cli, ListArgs};
use anyhow::Result;
use lutcam_filters::FilterKind;

pub fn run(args: &ListArgs, cli: &Cli) -> Result<()> {
    let registry = crate::open_registry(cli)?;
    let filters = registry.all_filters();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&filters)?);
        return Ok(());
    }

    println!("{:<24} {:<10} {:<8} NAME", "ID", "KIND", "CACHED");
    for filter in &filters {
        let kind = match filter.kind {
            FilterKind::BuiltIn => "built-in",
            FilterKind::User => "user",
        };
        let cached = if registry.cube_data(&filter.id).is_some() {
            "yes"
        } else {
            "-"
        };
        println!("{:<24} {:<10} {:<8} {}", filter.id, kind, cached, filter.name);
    }
    Ok(())
}
