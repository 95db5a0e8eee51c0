//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::render::{RenderOptions, DEFAULT_MAX_DEPTH};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "TRIPDECK_CONFIG_DIR";

/// Hard ceiling for `render.max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Lowercase name as used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => anyhow::bail!("Invalid theme mode '{s}'. Must be 'auto', 'light', or 'dark'"),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding layout documents served by the web API
    pub workspace: Option<PathBuf>,
}

/// Rendering defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Deepest nesting level rendered before children are truncated
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/tripdeck/config.toml`
/// - macOS: `~/Library/Application Support/tripdeck/config.toml`
/// - Windows: `%APPDATA%\tripdeck\config.toml`
///
/// `TRIPDECK_CONFIG_DIR` replaces the platform directory when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Rendering defaults
    #[serde(default)]
    pub render: RenderConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("tripdeck");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `max_depth` is between 1 and [`MAX_DEPTH_LIMIT`]
    /// - workspace path, when set, is a directory
    pub fn validate(&self) -> Result<()> {
        if self.render.max_depth == 0 || self.render.max_depth > MAX_DEPTH_LIMIT {
            anyhow::bail!(
                "render.max_depth must be between 1 and {MAX_DEPTH_LIMIT}, got {}",
                self.render.max_depth
            );
        }

        if let Some(workspace) = &self.paths.workspace {
            if workspace.exists() && !workspace.is_dir() {
                anyhow::bail!(
                    "Workspace path is not a directory: {}",
                    workspace.display()
                );
            }
        }

        Ok(())
    }

    /// Render options derived from this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::with_max_depth(self.render.max_depth)
    }

    /// Workspace directory, falling back to the current directory.
    #[must_use]
    pub fn workspace_or_cwd(&self) -> PathBuf {
        self.paths
            .workspace
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
