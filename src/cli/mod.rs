//! CLI command handlers for tripdeck.
//!
//! This module provides headless, scriptable access to the render engine for
//! automation, testing, and layout authoring.

pub mod common;
pub mod config;
pub mod inspect;
pub mod preset;
pub mod preview;
pub mod render;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use preset::PresetArgs;
pub use preview::PreviewArgs;
pub use render::RenderArgs;
pub use validate::ValidateArgs;
