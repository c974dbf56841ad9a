//! worldmosaic CLI - Command-line interface
//!
//! Renders a square region of a world save into one top-down PNG.

mod commands;
mod error;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::render::RenderArgs;

#[derive(Debug, Parser)]
#[command(name = "worldmosaic", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a region of a world into a PNG mosaic
    Render(RenderArgs),

    /// Write the default configuration file
    Init {
        /// Configuration file to create (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Init { config } => commands::init::run(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "worldmosaic",
            "render",
            "--world",
            "/saves/w",
            "--scale",
            "4",
            "--min-x",
            "-8",
            "--min-z",
            "3",
            "--strict",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.world, Some(PathBuf::from("/saves/w")));
                assert_eq!(args.scale, Some(4));
                assert_eq!(args.min_x, Some(-8));
                assert_eq!(args.min_z, Some(3));
                assert!(args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
