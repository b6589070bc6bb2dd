//! CLI entry and dispatch.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(version = "0.1.0")]
#[command(about = "Renders chat-message markdown to markup")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render markdown to markup
    Render {
        /// Input file (stdin when absent)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Emit JSON carrying the markup and the extracted math spans
        #[arg(long)]
        json: bool,
    },
    /// Print the math spans the shielding pass extracts, one per line
    Spans {
        /// Input file (stdin when absent)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // default to rendering stdin
    let Some(command) = cli.command else {
        return commands::render::run(None, false);
    };

    match command {
        Commands::Render { file, json } => commands::render::run(file.as_deref(), json),
        Commands::Spans { file } => commands::spans::run(file.as_deref()),
    }
}

/// Reads the whole input, from a file when given, from stdin otherwise.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}
