//! lutcam - LUT filter management and still-image grading CLI
//!
//! The offline companion to the live pipeline: the same registry, the
//! same cube/mist/grain chain, driven over files instead of a camera.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lutcam_filters::{FilterRegistry, RegistryConfig};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "lutcam")]
#[command(author, version, about = "LUT filters, film grain and mist for stills")]
#[command(long_about = "
Manage .cube color filters and apply them to still images with the
same pipeline the live preview uses.

Examples:
  lutcam list                              # All filters, normal first
  lutcam list --json                       # Machine-readable listing
  lutcam info grade.cube                   # Inspect a LUT file
  lutcam add grade.cube                    # Install a user filter
  lutcam remove user:grade                 # Uninstall it
  lutcam apply in.jpg -o out.jpg -f builtin:film -i 0.8
  lutcam apply in.png -o out.png -l grade.cube --grain 0.15 --mist 0.5
  lutcam preview in.png -o frames/ -n 5 -f builtin:film
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory of bundled built-in .cube files
    #[arg(long, global = true, default_value = "filters")]
    builtin_dir: PathBuf,

    /// Managed directory for user-added filters (defaults to the
    /// platform data dir)
    #[arg(long, global = true)]
    filters_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all selectable filters
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Inspect a .cube file
    Info(InfoArgs),

    /// Install a .cube file as a user filter
    Add(AddArgs),

    /// Remove a user filter by id
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// Apply a filter and effects to a still image
    Apply(ApplyArgs),

    /// Drive the live session over a still image
    Preview(PreviewArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Emit the filter list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// LUT file to inspect
    lut: PathBuf,
}

#[derive(Args)]
struct AddArgs {
    /// Source .cube file to copy into managed storage
    file: PathBuf,
}

#[derive(Args)]
struct RemoveArgs {
    /// Filter id, e.g. `user:grade`
    id: String,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image (jpg/png)
    input: PathBuf,

    /// Output image (jpg/png)
    #[arg(short, long)]
    output: PathBuf,

    /// Registered filter id, e.g. `builtin:film`
    #[arg(short, long, conflicts_with = "lut")]
    filter: Option<String>,

    /// Ad-hoc LUT file, bypassing the registry
    #[arg(short, long)]
    lut: Option<PathBuf>,

    /// Filter intensity (>= 0; values above 1 over-drive the grade)
    #[arg(short, long, default_value = "1.0")]
    intensity: f32,

    /// Grain intensity (effect off when omitted)
    #[arg(long)]
    grain: Option<f32>,

    /// Mist intensity (effect off when omitted)
    #[arg(long)]
    mist: Option<f32>,
}

#[derive(Args)]
struct PreviewArgs {
    /// Input image used as the synthetic frame source
    input: PathBuf,

    /// Directory the rendered frames are written into
    #[arg(short, long)]
    output: PathBuf,

    /// Number of frames to push through the session
    #[arg(short = 'n', long, default_value = "4")]
    frames: usize,

    /// Registered filter id to select after the first frame
    #[arg(short, long)]
    filter: Option<String>,

    /// Filter intensity
    #[arg(short, long, default_value = "1.0")]
    intensity: f32,

    /// Grain intensity (effect off when omitted)
    #[arg(long)]
    grain: Option<f32>,

    /// Mist intensity (effect off when omitted)
    #[arg(long)]
    mist: Option<f32>,
}

/// Builds and loads the registry from the CLI's storage flags.
fn open_registry(cli: &Cli) -> Result<FilterRegistry> {
    let user_dir = cli.filters_dir.clone().unwrap_or_else(default_filters_dir);
    let registry = FilterRegistry::new(RegistryConfig {
        builtin_dir: cli.builtin_dir.clone(),
        user_dir,
    });
    registry.load_built_ins();
    registry
        .load_user_filters()
        .context("failed to scan user filter storage")?;
    Ok(registry)
}

fn default_filters_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lutcam")
        .join("filters")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &cli),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Add(args) => commands::add::run(args, &cli),
        Commands::Remove(args) => commands::remove::run(args, &cli),
        Commands::Apply(args) => commands::apply::run(args, &cli),
        Commands::Preview(args) => commands::preview::run(args, &cli),
    }
}
