//! Layout file I/O service.
//!
//! This module centralizes all layout document operations: loading `.json` and
//! `.json5` files, saving them atomically, and listing a workspace directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::LAYOUT_EXTENSIONS;
use crate::models::{LayoutConfig, LayoutMode, Payload};

/// Summary of a layout document in a workspace.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSummary {
    /// Filename relative to the workspace
    pub filename: String,
    /// Layout title
    pub title: String,
    /// Layout mode
    pub mode: LayoutMode,
    /// Number of sections at all depths
    pub sections: usize,
    /// Last modified timestamp (RFC 3339 format)
    pub modified: String,
}

/// Service for managing layout document I/O operations.
pub struct LayoutService;

impl LayoutService {
    /// Loads a layout from a `.json` or `.json5` file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use tripdeck::services::LayoutService;
    ///
    /// let layout = LayoutService::load(Path::new("paris.json"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<LayoutConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
        Self::parse(&content, is_json5(path))
            .with_context(|| format!("Failed to load layout from {}", path.display()))
    }

    /// Parses layout text; `json5` allows comments and trailing commas.
    pub fn parse(content: &str, json5: bool) -> Result<LayoutConfig> {
        if json5 {
            json5::from_str(content).context("Invalid JSON5 layout document")
        } else {
            serde_json::from_str(content).context("Invalid JSON layout document")
        }
    }

    /// Loads a render data bag (a JSON or JSON5 object).
    pub fn load_data(path: &Path) -> Result<Payload> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        let data = if is_json5(path) {
            json5::from_str(&content).context("Invalid JSON5 data document")
        } else {
            serde_json::from_str(&content).context("Invalid JSON data document")
        };
        data.with_context(|| format!("Data file must hold a JSON object: {}", path.display()))
    }

    /// Saves a layout as pretty-printed JSON.
    ///
    /// This performs an atomic write using a temp file + rename pattern so the
    /// file is never left half written.
    pub fn save(layout: &LayoutConfig, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(layout).context("Failed to serialize layout")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to save layout to {}", path.display()))?;

        info!(path = %path.display(), title = %layout.title, "Layout saved");
        Ok(())
    }

    /// Lists layout documents in a directory, newest first.
    ///
    /// Files that fail to parse are skipped.
    pub fn list(dir: &Path) -> Result<Vec<LayoutSummary>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read workspace directory: {}", dir.display()))?;

        let mut layouts = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !has_layout_extension(&path) {
                continue;
            }
            let Some(filename) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };

            match Self::load(&path) {
                Ok(layout) => {
                    let modified = entry
                        .metadata()
                        .and_then(|m| m.modified())
                        .map(|t| DateTime::<Utc>::from(t).to_rfc3339())
                        .unwrap_or_default();
                    layouts.push(LayoutSummary {
                        filename,
                        title: layout.title.clone(),
                        mode: layout.mode,
                        sections: layout.section_count(),
                        modified,
                    });
                }
                Err(e) => debug!(file = %filename, error = %e, "Skipping unparsable layout"),
            }
        }

        layouts.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.filename.cmp(&b.filename))
        });
        Ok(layouts)
    }

    /// Resolves a bare workspace filename, adding `.json` when no layout
    /// extension is present.
    pub fn resolve(dir: &Path, filename: &str) -> PathBuf {
        if has_layout_extension(Path::new(filename)) {
            dir.join(filename)
        } else {
            dir.join(format!("{filename}.json"))
        }
    }
}

fn is_json5(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"))
}

fn has_layout_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        LAYOUT_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Sanitizes a layout title for use as a filename.
///
/// Replaces problematic characters with underscores and converts to lowercase.
///
/// ```
/// # use tripdeck::services::layouts::sanitize_filename;
/// assert_eq!(sanitize_filename("Paris Trip"), "paris_trip");
/// assert_eq!(sanitize_filename("Day/Night:Plan"), "day_night_plan");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', ' '], "_").to_lowercase()
}
