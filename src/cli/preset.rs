//! Preset command: writes a starter layout for a mode.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::LayoutMode;
use crate::services::layouts::sanitize_filename;
use crate::services::{preset, LayoutService};

/// Print or write a starter layout
#[derive(Debug, Clone, Args)]
pub struct PresetArgs {
    /// Layout mode (calendar, guide, itinerary, booking)
    #[arg(short, long, value_name = "MODE")]
    pub mode: String,

    /// Write to this file instead of stdout (a directory gets a name from the title)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

impl PresetArgs {
    /// Execute the preset command
    pub fn execute(&self) -> CliResult<()> {
        let mode: LayoutMode = self
            .mode
            .parse()
            .map_err(|e| CliError::validation(format!("{e}")))?;
        let layout = preset(mode);

        let Some(output) = &self.output else {
            return print_json(&layout);
        };
        let output = if output.is_dir() {
            output.join(format!("{}.json", sanitize_filename(&layout.title)))
        } else {
            output.clone()
        };

        if output.exists() && !self.force {
            return Err(CliError::validation(format!(
                "{} already exists (use --force to overwrite)",
                output.display()
            )));
        }

        LayoutService::save(&layout, &output)
            .map_err(|e| CliError::io(format!("Failed to write preset: {e:#}")))?;
        println!("✓ Wrote {mode} preset to {}", output.display());
        Ok(())
    }
}
