//! Folio CLI - Workshop content engine.
//!
//! Provides commands for:
//! - `pages`: Resolve and list the page sequence
//! - `render`: Render one page to HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PagesArgs, RenderArgs};
use output::Output;

/// Folio - Workshop content engine.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (debug logs for resolution and rendering).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and list the page sequence.
    Pages(PagesArgs),
    /// Render a page to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Pages(args) => args.execute(&output),
        Commands::Render(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
