//! Service layer around the render engine.
//!
//! This module contains the workspace, validation and preset services shared
//! by the CLI, the preview and the web API.

pub mod layouts;
pub mod presets;
pub mod validator;

// Re-export commonly used types and functions
pub use layouts::{LayoutService, LayoutSummary};
pub use presets::preset;
pub use validator::{IssueKind, LayoutValidator, Severity, ValidationIssue, ValidationReport};
