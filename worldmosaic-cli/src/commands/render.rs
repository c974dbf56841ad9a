//! Render command - draw a region of a world save into one PNG.

use std::path::PathBuf;

use clap::Args;
use worldmosaic::app::{AppConfig, MosaicApp, RenderSummary};
use worldmosaic::config::{config_file_path, ConfigFile};
use worldmosaic::logging::{init_logging, LoggingConfig};

use crate::error::CliError;
use crate::progress::ChunkProgressBar;

/// Arguments of the render command. Unset options fall back to the config file.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// World save directory (contains region/)
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Chunks per side of the rendered square
    #[arg(long)]
    pub scale: Option<u32>,

    /// Chunk X of the top-left chunk
    #[arg(long, allow_negative_numbers = true)]
    pub min_x: Option<i32>,

    /// Chunk Z of the top-left chunk
    #[arg(long, allow_negative_numbers = true)]
    pub min_z: Option<i32>,

    /// Resource pack directory (contains blocks.json)
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Worker threads (0 = one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Fail if any chunk cannot be rendered
    #[arg(long)]
    pub strict: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short)]
    pub verbose: bool,
}

/// Merge CLI arguments over the config file. CLI takes precedence, then config.
fn apply_args(args: &RenderArgs, mut file: ConfigFile) -> ConfigFile {
    if let Some(world) = &args.world {
        file.world.path = world.clone();
    }
    if let Some(scale) = args.scale {
        file.render.scale = scale;
    }
    if let Some(min_x) = args.min_x {
        file.render.min_x = min_x;
    }
    if let Some(min_z) = args.min_z {
        file.render.min_z = min_z;
    }
    if let Some(resources) = &args.resources {
        file.resources.path = resources.clone();
    }
    if let Some(output) = &args.output {
        file.output.path = output.clone();
    }
    if let Some(threads) = args.threads {
        file.render.threads = threads;
    }
    if args.strict {
        file.render.strict = true;
    }
    if args.verbose {
        file.logging.level = "debug".to_string();
    }
    file
}

/// Run the render command.
pub fn run(args: RenderArgs) -> Result<(), CliError> {
    let config_path = args.config.clone().unwrap_or_else(config_file_path);
    let file = apply_args(&args, ConfigFile::load_from(&config_path)?);

    if file.render.scale == 0 {
        return Err(CliError::Config("--scale must be at least 1".to_string()));
    }

    let _log_guard = init_logging(&LoggingConfig {
        level: file.logging.level.clone(),
        directory: file.logging.directory.clone(),
    })?;

    let config = AppConfig::from_config_file(&file);

    println!("worldmosaic v{}", worldmosaic::VERSION);
    println!();
    println!("World:     {}", config.world.display());
    println!("Resources: {}", config.resource_pack.root().display());
    println!(
        "Region:    {}×{} chunks from ({}, {})",
        config.scale, config.scale, config.origin.x, config.origin.z
    );
    println!();

    let total = u64::from(config.scale) * u64::from(config.scale);
    let app = MosaicApp::prepare(config)?;

    let bar = ChunkProgressBar::new(total);
    let result = app.run(&bar);
    bar.finish();

    print_summary(&result?);
    Ok(())
}

fn print_summary(summary: &RenderSummary) {
    let stats = &summary.stats;
    println!("Render Summary");
    println!("──────────────");
    println!("Chunks:   {} total", stats.total);
    println!("Rendered: {}", stats.rendered);
    println!("Absent:   {}", stats.absent);
    println!("Skipped:  {}", stats.failed);
    println!("Time:     {:.2}s", stats.elapsed_secs);
    println!(
        "Output:   {} ({}×{} px, {} bytes)",
        summary.output.display(),
        summary.canvas_size,
        summary.canvas_size,
        summary.bytes_written
    );

    if !summary.skipped.is_empty() {
        println!();
        println!("Skipped chunks (left blank):");
        for (coord, reason) in &summary.skipped {
            println!("  {}: {}", coord, reason);
        }
    }
}
