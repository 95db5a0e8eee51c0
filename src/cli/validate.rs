//! Validation command for layout files.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{load_config, load_layout, print_json, CliError, CliResult};
use crate::services::validator::{LayoutValidator, ValidationIssue};

/// Validate a layout file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to layout file (.json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;
        let options = load_config().render_options();
        let report = LayoutValidator::new(&layout, options).validate();

        if self.json {
            print_json(&report)?;
        } else {
            if report.is_valid() {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!("\nSummary:");
            println!("  Sections: {}", layout.section_count());
            println!("  Depth:    {} (limit {})", layout.depth(), options.max_depth);
            println!("  Errors:   {}", report.errors.len());
            println!("  Warnings: {}", report.warnings.len());

            if !report.errors.is_empty() || !report.warnings.is_empty() {
                println!("\nIssues:");
                for issue in &report.errors {
                    print_issue("  ✗", issue);
                }
                for issue in &report.warnings {
                    print_issue("  ⚠", issue);
                }
            }
        }

        if !report.is_valid() {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

fn print_issue(prefix: &str, issue: &ValidationIssue) {
    println!("{prefix} {issue}");
}
