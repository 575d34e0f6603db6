use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod file_utils;
mod solve;
mod validate;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one day's driver/route assignment from a JSON snapshot
    Solve {
        /// Read the snapshot from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the raw JSON outcome instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check a JSON snapshot without solving it
    Validate {
        /// Read the snapshot from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve { input, json } => solve::run(input.as_deref(), json),
        Commands::Validate { input } => validate::run(input.as_deref()),
    }
}
