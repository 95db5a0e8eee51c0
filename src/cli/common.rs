//! Shared CLI plumbing: error type, exit codes and input loading.

use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::models::{LayoutConfig, Payload};
use crate::services::LayoutService;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was read but failed a check
    ValidationError = 1,
    /// Input could not be read or output could not be written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code handed to `std::process::exit`.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code the process ends with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result of a CLI command.
pub type CliResult<T> = Result<T, CliError>;

/// Loads a layout document, mapping failures to an I/O error.
pub fn load_layout(path: &Path) -> CliResult<LayoutConfig> {
    LayoutService::load(path).map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))
}

/// Loads the optional data bag; missing means empty.
pub fn load_data(path: Option<&Path>) -> CliResult<Payload> {
    match path {
        Some(path) => LayoutService::load_data(path)
            .map_err(|e| CliError::io(format!("Failed to load data: {e:#}"))),
        None => Ok(Payload::new()),
    }
}

/// Loads the user configuration, falling back to defaults on error.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable configuration: {e:#}");
        Config::default()
    })
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_missing_layout_is_io_error() {
        let err = load_layout(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::IoError);
        assert!(err.to_string().contains("Failed to load layout"));
    }

    #[test]
    fn test_no_data_file_is_empty() {
        assert!(load_data(None).unwrap().is_empty());
    }
}
