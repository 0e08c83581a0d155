//! AutoRig CLI - Command-line driver for the humanoid rig pipeline
//!
//! This binary runs rig operations against an in-memory scene and reports
//! each step's outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use autorig_cli::commands;
use autorig_cli::commands::run::RunOptions;
use autorig_pipeline::Operation;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// AutoRig - Step-gated humanoid auto-rigging
#[derive(Parser)]
#[command(name = "autorig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rig operations in order against meshes loaded from JSON files
    Run {
        /// Operations to run (default: every stage from create_landmarks to test_deformation)
        #[arg(long = "step", value_name = "OPERATION")]
        steps: Vec<Operation>,

        /// Path to a rig configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Landmark positions applied after markers are created (JSON map)
        #[arg(short, long)]
        landmarks: Option<PathBuf>,

        /// Mesh file to add to the scene (JSON, repeatable)
        #[arg(long = "mesh-file", value_name = "PATH")]
        meshes: Vec<PathBuf>,

        /// Mesh to bind during weight painting
        #[arg(short, long)]
        mesh: Option<String>,

        /// Scene node to select before running (repeatable)
        #[arg(long)]
        select: Vec<String>,

        /// Keep running after a failed operation
        #[arg(long)]
        keep_going: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the landmark table
    Landmarks {
        /// Landmark positions to apply over the defaults (JSON map)
        #[arg(short, long)]
        landmarks: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run every landmark check and list all violations
    Check {
        /// Landmark positions to apply over the defaults (JSON map)
        #[arg(short, long)]
        landmarks: Option<PathBuf>,

        /// Path to a rig configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "info,autorig_pipeline=debug,autorig_scene=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Run {
            steps,
            config,
            landmarks,
            meshes,
            mesh,
            select,
            keep_going,
            json,
        } => {
            let options = RunOptions {
                steps,
                config,
                landmarks,
                meshes,
                mesh,
                select,
                keep_going,
            };
            commands::run::run(&options, json)
        }
        Commands::Landmarks { landmarks, json } => {
            commands::landmarks::run(landmarks.as_deref(), json)
        }
        Commands::Check {
            landmarks,
            config,
            json,
        } => commands::check::run(landmarks.as_deref(), config.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
