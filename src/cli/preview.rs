//! Preview command: interactive terminal view of a rendered layout.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{load_config, load_data, load_layout, CliError, CliResult};
use crate::render::LayoutRenderer;
use crate::tui::{self, PreviewState, Theme};

/// Open an interactive preview of a layout file
#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Path to layout file (.json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Data bag shared by all sections
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Start as a signed-in viewer
    #[arg(long)]
    pub auth: bool,
}

impl PreviewArgs {
    /// Execute the preview command
    pub fn execute(&self) -> CliResult<()> {
        let layout = load_layout(&self.layout)?;
        let data = load_data(self.data.as_deref())?;
        let config = load_config();

        let mut state = PreviewState::new(
            layout,
            data,
            LayoutRenderer::new(config.render_options()),
            self.auth,
            Theme::from_mode(config.ui.theme_mode),
        )
        .with_source(self.layout.clone());

        let mut terminal =
            tui::setup_terminal().map_err(|e| CliError::io(format!("{e:#}")))?;
        let result = tui::run_preview(&mut state, &mut terminal);
        tui::restore_terminal(terminal).map_err(|e| CliError::io(format!("{e:#}")))?;
        result.map_err(|e| CliError::io(format!("Preview failed: {e:#}")))?;

        for action in &state.fired {
            println!("fired {}", action.action_id);
        }
        Ok(())
    }
}
