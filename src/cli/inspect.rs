//! Inspect command: structural summary of a layout file.

use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::common::{load_layout, print_json, CliResult};
use crate::models::{LayoutConfig, LayoutSection};

/// Show a structural summary of a layout file
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to layout file (.json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary printed by `inspect`.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    /// Layout title
    pub title: String,
    /// Layout mode
    pub mode: String,
    /// Whether a settings block for the mode is present
    pub has_settings: bool,
    /// Sections at all depths
    pub section_count: usize,
    /// Deepest nesting level
    pub depth: usize,
    /// Inline content items at all depths
    pub item_count: usize,
    /// Section count per type (unknown types by their literal name)
    pub sections_by_type: BTreeMap<String, usize>,
    /// Layout action count per position
    pub actions_by_position: BTreeMap<String, usize>,
}

impl InspectReport {
    /// Builds the summary of a layout.
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        let mut sections_by_type = BTreeMap::new();
        let mut item_count = 0;
        count_sections(&layout.sections, &mut sections_by_type, &mut item_count);

        let mut actions_by_position = BTreeMap::new();
        for action in &layout.actions {
            *actions_by_position
                .entry(action.position.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            title: layout.title.clone(),
            mode: layout.mode.to_string(),
            has_settings: layout.settings().is_some(),
            section_count: layout.section_count(),
            depth: layout.depth(),
            item_count,
            sections_by_type,
            actions_by_position,
        }
    }
}

fn count_sections(sections: &[LayoutSection], by_type: &mut BTreeMap<String, usize>, items: &mut usize) {
    for section in sections {
        *by_type.entry(section.section_type.to_string()).or_insert(0) += 1;
        *items += section.items().len();
        count_sections(&section.children, by_type, items);
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;
        let report = InspectReport::from_layout(&layout);

        if self.json {
            return print_json(&report);
        }

        println!("Layout: {}", report.title);
        println!("Mode:   {}", report.mode);
        println!(
            "Settings: {}",
            if report.has_settings { "present" } else { "defaults" }
        );
        println!();
        println!("Sections: {} (depth {})", report.section_count, report.depth);
        for (section_type, count) in &report.sections_by_type {
            println!("  {section_type:<16} {count}");
        }
        println!("Items: {}", report.item_count);
        println!();
        println!("Actions:");
        if report.actions_by_position.is_empty() {
            println!("  (none)");
        }
        for (position, count) in &report.actions_by_position {
            println!("  {position:<16} {count}");
        }

        Ok(())
    }
}
