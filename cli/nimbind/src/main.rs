//! nimbind CLI — generates mobile bridge code from exported Nim procs.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimbind", version, about = "Nim mobile bridge binding generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bridge code for all enabled targets
    Generate {
        /// Path to the generator config (default: nimbind.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Report format (human, json)
        #[arg(long)]
        report: Option<String>,
    },
    /// Write a starter nimbind.toml
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, report } => commands::generate::run(
            &config.unwrap_or_else(|| PathBuf::from("nimbind.toml")),
            report.as_deref(),
        ),
        Commands::Init { dir } => {
            commands::init::run(&dir.unwrap_or_else(|| PathBuf::from(".")))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
