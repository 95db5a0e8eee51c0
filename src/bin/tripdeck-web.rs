//! Tripdeck Web Server Binary
//!
//! This binary starts the tripdeck web server that renders, validates and
//! stores layout documents over REST.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3002, uses ~/.config/tripdeck/layouts/)
//! tripdeck-web
//!
//! # Specify port and workspace
//! tripdeck-web --port 8080 --workspace ~/trip-layouts
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripdeck::config::Config;
use tripdeck::constants::DEFAULT_WEB_PORT;
use tripdeck::web;

/// Tripdeck Web Server - REST API for server-driven layouts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Workspace directory containing layout files.
    /// Defaults to `paths.workspace` from the config file, then to the
    /// platform-specific layouts directory (e.g. ~/.config/tripdeck/layouts/)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Gets the default layouts directory, creating it if it doesn't exist.
fn get_default_layouts_dir() -> anyhow::Result<PathBuf> {
    let layouts_dir = Config::config_dir()?.join("layouts");

    if !layouts_dir.exists() {
        std::fs::create_dir_all(&layouts_dir).with_context(|| {
            format!(
                "Failed to create layouts directory: {}",
                layouts_dir.display()
            )
        })?;
    }

    Ok(layouts_dir)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default configuration: {e:#}");
            Config::default()
        }
    };

    // Workspace root: --workspace, then paths.workspace, then config_dir/layouts
    let workspace_root = match args.workspace.or_else(|| config.paths.workspace.clone()) {
        Some(path) => path,
        None => get_default_layouts_dir()?,
    };

    info!("Workspace root: {}", workspace_root.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host or port")?;

    web::run_server(config, workspace_root, addr).await
}
