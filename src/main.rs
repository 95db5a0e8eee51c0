//! Tripdeck - render server-driven travel layouts in the terminal
//!
//! Renders, validates and previews layout documents for the calendar, guide,
//! itinerary and booking screens of a trip planner.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tripdeck::cli::{
    CliResult, ConfigArgs, InspectArgs, PresetArgs, PreviewArgs, RenderArgs, ValidateArgs,
};

/// Tripdeck - server-driven layout renderer for travel itineraries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a layout file as text or JSON
    Render(RenderArgs),
    /// Validate a layout file
    Validate(ValidateArgs),
    /// Show a structural summary of a layout file
    Inspect(InspectArgs),
    /// Print or write a starter layout for a mode
    Preset(PresetArgs),
    /// Show or change configuration
    Config(ConfigArgs),
    /// Open an interactive preview
    Preview(PreviewArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Render(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Inspect(args) => args.execute(),
            Self::Preset(args) => args.execute(),
            Self::Config(args) => args.execute(),
            Self::Preview(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code.code());
    }
}
