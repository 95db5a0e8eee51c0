//! Web API module for tripdeck.
//!
//! This module exposes the render engine and the layout workspace over REST,
//! so a host application can render layouts server-side or author them.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/render` - Render a posted layout to a render tree
//! - `POST /api/render/text` - Render a posted layout to text lines
//! - `GET /api/layouts` - List layout files in the workspace
//! - `GET /api/layouts/{filename}` - Load a layout file
//! - `PUT /api/layouts/{filename}` - Validate and save a layout file
//! - `GET /api/layouts/{filename}/validate` - Validation report
//! - `GET /api/layouts/{filename}/render` - Render a stored layout (`?authenticated=true`)
//! - `GET /api/presets/{mode}` - Starter layout for a mode
//! - `GET /api/config` - Effective render configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::{LayoutConfig, LayoutMode, Payload};
use crate::render::text::to_plain;
use crate::render::{LayoutRenderer, Node, RenderProps, VisibilityContext};
use crate::services::{preset, LayoutService, LayoutSummary, LayoutValidator, ValidationReport};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Working directory for layout files
    workspace_root: PathBuf,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config, workspace_root: PathBuf) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            workspace_root,
        })
    }

    /// Returns the workspace root directory.
    #[must_use]
    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    fn renderer(&self) -> LayoutRenderer {
        LayoutRenderer::new(self.config.render_options())
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
}

/// Layout list response.
#[derive(Debug, Serialize)]
pub struct LayoutListResponse {
    /// List of layout summaries.
    pub layouts: Vec<LayoutSummary>,
}

/// Render request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Layout to render.
    pub config: LayoutConfig,
    /// Shared data bag.
    #[serde(default)]
    pub data: Payload,
    /// Render the loading state.
    #[serde(default)]
    pub loading: bool,
    /// Render the error state with this message.
    #[serde(default)]
    pub error: Option<String>,
    /// Viewer is signed in.
    #[serde(default)]
    pub authenticated: bool,
}

impl RenderRequest {
    fn render(&self, renderer: &LayoutRenderer) -> Node {
        let props = RenderProps::new(&self.data)
            .loading(self.loading)
            .error(self.error.as_deref())
            .visibility(VisibilityContext::new(self.authenticated));
        renderer.render(&self.config, &props)
    }
}

/// Text rendering response.
#[derive(Debug, Serialize)]
pub struct TextResponse {
    /// Rendered lines without styling.
    pub lines: Vec<String>,
}

/// Query parameters for rendering a stored layout.
#[derive(Debug, Deserialize, Default)]
pub struct RenderQuery {
    /// Viewer is signed in.
    #[serde(default)]
    pub authenticated: bool,
}

/// Effective configuration response.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// Nesting bound used when rendering.
    pub max_depth: usize,
    /// Theme mode preference.
    pub theme: String,
    /// Workspace directory served by this instance.
    pub workspace: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Helpers
// ============================================================================

/// Validates a filename to prevent path traversal attacks.
///
/// Returns the sanitized filename or an error if the filename is invalid.
fn validate_filename(filename: &str) -> Result<&str, ApiError> {
    // Reject empty filenames
    if filename.is_empty() {
        return Err(ApiError::new("Filename cannot be empty"));
    }

    // Reject path traversal attempts
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::new(
            "Invalid filename: path traversal not allowed",
        ));
    }

    // Reject hidden files
    if filename.starts_with('.') {
        return Err(ApiError::new("Invalid filename: hidden files not allowed"));
    }

    Ok(filename)
}

/// Resolves a request filename inside the workspace.
fn workspace_path(state: &AppState, filename: &str) -> ApiResult<PathBuf> {
    let filename = validate_filename(filename).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    Ok(LayoutService::resolve(&state.workspace_root, filename))
}

/// Loads an existing workspace layout.
fn load_workspace_layout(state: &AppState, filename: &str) -> ApiResult<LayoutConfig> {
    let path = workspace_path(state, filename)?;

    if !path.exists() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Layout file not found: {filename}"))),
        ));
    }

    LayoutService::load(&path).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::with_details("Failed to load layout", format!("{e:#}"))),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/render - Render a posted layout.
async fn render_layout(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Json<Node> {
    Json(request.render(&state.renderer()))
}

/// POST /api/render/text - Render a posted layout to plain lines.
async fn render_layout_text(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Json<TextResponse> {
    let tree = request.render(&state.renderer());
    Json(TextResponse {
        lines: to_plain(&tree),
    })
}

/// GET /api/layouts - List all layout files in the workspace.
async fn list_layouts(State(state): State<AppState>) -> ApiResult<Json<LayoutListResponse>> {
    let layouts = LayoutService::list(&state.workspace_root).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to read workspace directory",
                format!("{e:#}"),
            )),
        )
    })?;

    Ok(Json(LayoutListResponse { layouts }))
}

/// GET /api/layouts/{filename} - Load a specific layout file.
async fn get_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<LayoutConfig>> {
    load_workspace_layout(&state, &filename).map(Json)
}

/// PUT /api/layouts/{filename} - Validate and save a layout file.
async fn save_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Json(layout): Json<LayoutConfig>,
) -> ApiResult<StatusCode> {
    let path = workspace_path(&state, &filename)?;

    let report = LayoutValidator::new(&layout, state.config.render_options()).validate();
    if !report.is_valid() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(
                "Invalid layout",
                report.format_message(),
            )),
        ));
    }

    LayoutService::save(&layout, &path).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Failed to save layout", format!("{e:#}"))),
        )
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/layouts/{filename}/validate - Validation report for a stored layout.
async fn validate_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<ValidationReport>> {
    let layout = load_workspace_layout(&state, &filename)?;
    let report = LayoutValidator::new(&layout, state.config.render_options()).validate();
    Ok(Json(report))
}

/// GET /api/layouts/{filename}/render - Render a stored layout.
async fn render_stored_layout(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(query): Query<RenderQuery>,
) -> ApiResult<Json<Node>> {
    let layout = load_workspace_layout(&state, &filename)?;
    let data = Payload::new();
    let props =
        RenderProps::new(&data).visibility(VisibilityContext::new(query.authenticated));
    Ok(Json(state.renderer().render(&layout, &props)))
}

/// GET /api/presets/{mode} - Starter layout for a mode.
async fn get_preset(Path(mode): Path<String>) -> ApiResult<Json<LayoutConfig>> {
    let mode: LayoutMode = mode.parse().map_err(|e: anyhow::Error| {
        (StatusCode::NOT_FOUND, Json(ApiError::new(e.to_string())))
    })?;
    Ok(Json(preset(mode)))
}

/// GET /api/config - Effective configuration.
async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        max_depth: state.config.render_options().max_depth,
        theme: state.config.ui.theme_mode.as_str().to_string(),
        workspace: state.workspace_root.display().to_string(),
    })
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run next to a local host app, so any origin may call it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Render endpoints
        .route("/api/render", post(render_layout))
        .route("/api/render/text", post(render_layout_text))
        // Layout endpoints
        .route("/api/layouts", get(list_layouts))
        .route("/api/layouts/{filename}", get(get_layout).put(save_layout))
        .route("/api/layouts/{filename}/validate", get(validate_layout))
        .route("/api/layouts/{filename}/render", get(render_stored_layout))
        // Presets and config
        .route("/api/presets/{mode}", get(get_preset))
        .route("/api/config", get(get_config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn run_server(
    config: Config,
    workspace_root: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(config, workspace_root)?;
    let app = create_router(state);

    info!("Starting {} web server on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
