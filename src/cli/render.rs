//! Render command: prints a layout as text or as a JSON render tree.

use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::cli::common::{load_config, load_data, load_layout, print_json, CliResult};
use crate::render::text::to_plain;
use crate::render::{LayoutRenderer, RenderOptions, RenderProps, RuleEvaluator, VisibilityContext};

/// Render a layout file
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to layout file (.json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Data bag shared by all sections (weather, alerts, map center)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Render the loading state
    #[arg(long)]
    pub loading: bool,

    /// Render the error state with this message
    #[arg(long, value_name = "MESSAGE")]
    pub error: Option<String>,

    /// Render for a signed-in viewer
    #[arg(long)]
    pub auth: bool,

    /// Custom visibility rules that evaluate to true (repeatable)
    ///
    /// Without this flag custom rules are not evaluated and their sections show.
    #[arg(long = "allow-rule", value_name = "RULE")]
    pub allow_rules: Vec<String>,

    /// Output the render tree as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the configured nesting bound
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

/// Custom rules granted on the command line.
#[derive(Debug, Default)]
pub struct RuleSet(HashSet<String>);

impl RuleSet {
    /// Builds a rule set from rule strings.
    pub fn new(rules: &[String]) -> Self {
        Self(rules.iter().map(|r| r.trim().to_string()).collect())
    }
}

impl RuleEvaluator for RuleSet {
    fn evaluate(&self, rule: &str) -> bool {
        self.0.contains(rule.trim())
    }
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;
        let data = load_data(self.data.as_deref())?;
        let config = load_config();

        let options = self
            .max_depth
            .map_or_else(|| config.render_options(), RenderOptions::with_max_depth);

        let rules = RuleSet::new(&self.allow_rules);
        let mut visibility = VisibilityContext::new(self.auth);
        if !self.allow_rules.is_empty() {
            visibility = visibility.with_evaluator(&rules);
        }

        let props = RenderProps::new(&data)
            .loading(self.loading)
            .error(self.error.as_deref())
            .visibility(visibility);
        let tree = LayoutRenderer::new(options).render(&layout, &props);

        if self.json {
            print_json(&tree)?;
        } else {
            for line in to_plain(&tree) {
                println!("{line}");
            }
        }

        Ok(())
    }
}
