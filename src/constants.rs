//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "Tripdeck";

/// Default port of the web server.
pub const DEFAULT_WEB_PORT: u16 = 3002;

/// File extensions accepted for layout documents.
pub const LAYOUT_EXTENSIONS: [&str; 2] = ["json", "json5"];
