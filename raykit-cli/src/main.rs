//! raykit CLI - renders the ray tracing and mesh demos to PNG files

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{DeformArgs, MeshArgs, TraceArgs};
use raykit_trace::RenderMode;

#[derive(Parser)]
#[command(name = "raykit")]
#[command(about = "CPU ray tracing, mesh rendering and mesh fitting demos", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory the images and meshes are written to
    #[arg(long, global = true, default_value = "docs/images")]
    out: PathBuf,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flat colored ray projection from every camera position
    Projection(TraceArgs),
    /// Phong shaded ray tracing from every camera position
    Phong(TraceArgs),
    /// Rasterize a mesh with Phong shading
    Mesh(MeshArgs),
    /// Fit an icosphere to a target mesh
    Deform(DeformArgs),
    /// Run the projection, phong and mesh demos with their defaults
    All,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Projection(args) => {
            commands::ray_demo(&cli.out, RenderMode::Projection, &args)?;
        }
        Commands::Phong(args) => {
            commands::ray_demo(&cli.out, RenderMode::Phong, &args)?;
        }
        Commands::Mesh(args) => {
            commands::mesh_demo(&cli.out, &args)?;
        }
        Commands::Deform(args) => {
            commands::deform_demo(&cli.out, &args)?;
        }
        Commands::All => {
            commands::all_demos(&cli.out)?;
        }
    }

    Ok(())
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
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["raykit", "mesh", "--size", "64", "--out", "/tmp/x", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.out, PathBuf::from("/tmp/x"));
        match cli.command {
            Commands::Mesh(args) => assert_eq!(args.size, 64),
            _ => panic!("expected mesh command"),
        }
    }

    #[test]
    fn test_trace_flags_default_matches_all() {
        let cli = Cli::try_parse_from(["raykit", "phong"]).unwrap();
        match cli.command {
            Commands::Phong(args) => {
                let defaults = TraceArgs::default();
                assert_eq!(args.sheet, defaults.sheet);
                assert_eq!(args.scene, defaults.scene);
            }
            _ => panic!("expected phong command"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["raykit", "deform"]).unwrap();
        assert_eq!(cli.out, PathBuf::from("docs/images"));
        match cli.command {
            Commands::Deform(args) => {
                assert_eq!(args.level, 4);
                assert!(args.target.is_none());
                assert!(args.iterations.is_none());
            }
            _ => panic!("expected deform command"),
        }
    }
}
