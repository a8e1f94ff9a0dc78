//! pinc CLI - `PlantUML` autoinclude resolver.
//!
//! Provides commands for:
//! - `render`: Splice configured includes into diagram files
//! - `resolve`: Show the include paths that apply to a folder
//! - `check`: Report autoinclude markers and include-incompatible dialects

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs, ResolveArgs};
use output::Output;

/// pinc - `PlantUML` autoinclude resolver.
#[derive(Parser)]
#[command(name = "pinc", version, about)]
struct Cli {
    /// Enable verbose output (show resolution and cache logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add configured includes to diagram files.
    Render(RenderArgs),
    /// Print the include paths that apply to a folder.
    Resolve(ResolveArgs),
    /// Check diagrams for autoinclude markers and unsupported dialects.
    Check(CheckArgs),
}

/// --verbose enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
