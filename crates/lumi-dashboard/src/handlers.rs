//! HTTP request handlers for the dashboard service.
//!
//! Implements the flow-chart, statistics, status, agent and file endpoints
//! using axum, with the static dashboard assets as fallback.

use crate::config::{AgentConfig, DashboardConfig};
use crate::files::{read_agent_file, save_agent_file};
use crate::status::status_response;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use chrono::Local;
use lumi_extractor::{FlowchartReport, RuleExtractor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only configuration
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Wrap a configuration for sharing across handlers
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Workspace statistics response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Markdown files currently in the workspace
    pub files_in_workspace: usize,
    /// Workspace directory
    pub workspace_path: String,
    /// Always "online" while the service answers
    pub status: String,
}

/// Agent listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Configured agents
    pub agents: Vec<AgentConfig>,
    /// Port the service is bound to
    pub port: u16,
}

/// Query of `GET /api/file`
#[derive(Debug, Deserialize)]
pub struct FileQuery {
    /// Agent id (default: "main")
    #[serde(default = "default_agent")]
    pub agent: String,
    /// File alias (default: "Soul.md")
    #[serde(default = "default_file")]
    pub file: String,
}

/// Body of `POST /api/file`
#[derive(Debug, Deserialize)]
pub struct SaveFileRequest {
    /// Agent id (default: "main")
    #[serde(default = "default_agent")]
    pub agent: String,
    /// File alias (default: "Soul.md")
    #[serde(default = "default_file")]
    pub file: String,
    /// New file content
    #[serde(default)]
    pub content: String,
}

fn default_agent() -> String {
    "main".to_string()
}

fn default_file() -> String {
    "Soul.md".to_string()
}

/// File content response
#[derive(Debug, Serialize, Deserialize)]
pub struct FileResponse {
    /// File content
    pub content: String,
}

/// Acknowledgement response
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always "ok"
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Requested file is not exposed or cannot be read
    FileNotFound,
    /// Writing a file failed
    SaveFailed,
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::FileNotFound => (StatusCode::NOT_FOUND, "File not found".to_string()),
            AppError::SaveFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save file".to_string(),
            ),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("Blocking task failed: {}", e);
        AppError::InternalError("Request failed".to_string())
    }
}

/// GET /api/flowchart - Extract rules and render the diagram
///
/// Every request runs a fresh extraction over the whole workspace.
async fn get_flowchart(State(state): State<AppState>) -> Result<Json<FlowchartReport>, AppError> {
    let config = state.config.extractor_config();
    let report = tokio::task::spawn_blocking(move || RuleExtractor::new(config).report()).await?;

    info!(
        "Flow chart served: {} rules from {} files",
        report.summary.total(),
        report.files_scanned
    );

    Ok(Json(report))
}

/// GET /api/stats - Workspace statistics
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let config = state.config.extractor_config();
    let workspace_path = config.workspace.display().to_string();
    let files_in_workspace =
        tokio::task::spawn_blocking(move || RuleExtractor::new(config).count_documents()).await?;

    Ok(Json(StatsResponse {
        files_in_workspace,
        workspace_path,
        status: "online".to_string(),
    }))
}

/// GET /api/status - Current agent status
async fn get_status(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let path = state.config.status_path();
    let body = tokio::task::spawn_blocking(move || status_response(&path, Local::now())).await?;
    Ok(Json(body))
}

/// GET /api/dashboard - Agent listing
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        agents: state.config.agents.clone(),
        port: state.config.bind_port,
    })
}

/// GET /api/file - Read an agent file
async fn get_file(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<FileResponse>, AppError> {
    let config = Arc::clone(&state.config);
    let content =
        tokio::task::spawn_blocking(move || read_agent_file(&config, &query.agent, &query.file))
            .await?
            .map_err(|e| {
                warn!("File read refused: {}", e);
                AppError::FileNotFound
            })?;

    Ok(Json(FileResponse { content }))
}

/// POST /api/file - Overwrite an agent file
async fn save_file(
    State(state): State<AppState>,
    Json(request): Json<SaveFileRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let config = Arc::clone(&state.config);
    let SaveFileRequest {
        agent,
        file,
        content,
    } = request;
    let (agent, file) = tokio::task::spawn_blocking(move || {
        save_agent_file(&config, &agent, &file, &content).map(|()| (agent, file))
    })
    .await?
    .map_err(|e| {
        warn!("File save failed: {}", e);
        AppError::SaveFailed
    })?;

    info!("Saved {} for agent {}", file, agent);
    Ok(Json(OkResponse {
        status: "ok".to_string(),
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let assets = ServeDir::new(state.config.static_path());

    AxumRouter::new()
        .route("/api/flowchart", get(get_flowchart))
        .route("/api/stats", get(get_stats))
        .route("/api/status", get(get_status))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/file", get(get_file).post(save_file))
        .fallback_service(assets)
        .layer(cors)
        .with_state(state)
}
