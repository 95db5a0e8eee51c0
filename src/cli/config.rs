//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode, MAX_DEPTH_LIMIT};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Nesting bound used when rendering
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Workspace directory served by the web API
    #[arg(long, value_name = "DIR")]
    workspace: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    render: RenderOutput,
    ui: UiOutput,
    paths: PathsOutput,
}

#[derive(Serialize, Debug)]
struct RenderOutput {
    max_depth: usize,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    workspace: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&to_output(&config))
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.max_depth.is_none() && self.theme.is_none() && self.workspace.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --max-depth, --theme, or --workspace",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(max_depth) = self.max_depth {
            if max_depth == 0 || max_depth > MAX_DEPTH_LIMIT {
                return Err(CliError::validation(format!(
                    "--max-depth must be between 1 and {MAX_DEPTH_LIMIT}"
                )));
            }
            config.render.max_depth = max_depth;
        }

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = theme
                .parse::<ThemeMode>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(workspace) = &self.workspace {
            if !workspace.is_dir() {
                return Err(CliError::validation(format!(
                    "Workspace directory does not exist: {}",
                    workspace.display()
                )));
            }
            config.paths.workspace = Some(workspace.clone());
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        config_file: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        render: RenderOutput {
            max_depth: config.render.max_depth,
        },
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
        },
        paths: PathsOutput {
            workspace: config
                .paths
                .workspace
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Tripdeck Configuration");
    println!("======================");
    println!();

    println!("Render:");
    println!("  Max Depth: {}", config.render.max_depth);
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", config.ui.theme_mode.as_str());
    println!();

    println!("Paths:");
    match &config.paths.workspace {
        Some(workspace) => println!("  Workspace: {}", workspace.display()),
        None => println!("  Workspace: (current directory)"),
    }
}
