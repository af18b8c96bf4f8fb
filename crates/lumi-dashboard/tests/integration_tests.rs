//! Integration tests for the dashboard service

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lumi_dashboard::{
    config::DashboardConfig,
    handlers::{create_router, AppState, DashboardResponse, ErrorResponse, StatsResponse},
};
use lumi_extractor::FlowchartReport;
use serde::de::DeserializeOwned;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

const HEARTBEAT: &str = "# Heartbeat\n\
    Daytime: 10:00-23:00 GMT.\n\
    If there are new Discord messages then process them first.\n";

const SOUL: &str = "# Soul\n\
    NEVER post without asking.\n\
    Ask first: sending emails.\n";

/// Workspace with two rule documents and a dashboard asset directory
fn create_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("HEARTBEAT.md"), HEARTBEAT).unwrap();
    fs::write(dir.path().join("SOUL.md"), SOUL).unwrap();
    fs::write(dir.path().join("notes.txt"), "not markdown").unwrap();

    let assets = dir.path().join("lumi-dashboard");
    fs::create_dir(&assets).unwrap();
    fs::write(assets.join("index.html"), "<h1>Lumi</h1>").unwrap();
    dir
}

fn create_app(dir: &TempDir) -> Router {
    create_router(AppState::new(DashboardConfig::for_workspace(dir.path())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_file(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/file")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_flowchart_endpoint() {
    let dir = create_workspace();
    let (status, report): (_, FlowchartReport) = get_json(create_app(&dir), "/api/flowchart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report.files_scanned, 2);
    assert!(report.diagram_text.starts_with("graph TD"));
    assert!(report.diagram_text.contains("DetermineMode{Determine Mode}"));
    assert!(report.diagram_text.contains("Critical0"));
    assert!(report.summary.time_rules >= 1);
    assert!(report.summary.permission_gates >= 1);
    assert!(report.critical_rules.len() <= 10);
}

#[tokio::test]
async fn test_flowchart_json_shape() {
    let dir = create_workspace();
    let (_, value): (_, serde_json::Value) = get_json(create_app(&dir), "/api/flowchart").await;

    assert!(value["mermaid"].is_string());
    assert_eq!(value["time_rules"][0]["type"], "time_rule");
    assert_eq!(value["time_rules"][0]["start"], "10:00");
    assert_eq!(value["time_rules"][0]["end"], "23:00");
    assert_eq!(value["time_rules"][0]["file"], "HEARTBEAT.md");
}

#[tokio::test]
async fn test_flowchart_missing_workspace() {
    let app = create_router(AppState::new(DashboardConfig::for_workspace(
        "/no/such/lumi/workspace",
    )));
    let (status, report): (_, FlowchartReport) = get_json(app, "/api/flowchart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report.files_scanned, 0);
    assert_eq!(report.summary.total(), 0);
    assert!(report.diagram_text.contains("Start([Start Heartbeat])"));
}

#[tokio::test]
async fn test_stats_endpoint() {
    let dir = create_workspace();
    let (status, stats): (_, StatsResponse) = get_json(create_app(&dir), "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats.files_in_workspace, 2);
    assert_eq!(stats.workspace_path, dir.path().display().to_string());
    assert_eq!(stats.status, "online");
}

#[tokio::test]
async fn test_status_endpoint_idle_then_file() {
    let dir = create_workspace();
    let (status, body): (_, serde_json::Value) = get_json(create_app(&dir), "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert!(body["timestamp"].is_string());

    fs::write(
        dir.path().join("lumi-dashboard").join("status.json"),
        r#"{"status": "busy", "message": "Overnight queue"}"#,
    )
    .unwrap();
    let (_, body): (_, serde_json::Value) = get_json(create_app(&dir), "/api/status").await;
    assert_eq!(body["status"], "busy");
    assert_eq!(body["message"], "Overnight queue");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_dashboard_endpoint() {
    let dir = create_workspace();
    let (status, dashboard): (_, DashboardResponse) =
        get_json(create_app(&dir), "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard.port, 3001);
    assert_eq!(dashboard.agents.len(), 3);
    assert_eq!(dashboard.agents[2].name, "coding");
    assert!(!dashboard.agents[2].online);
}

#[tokio::test]
async fn test_dashboard_hides_file_table() {
    let dir = create_workspace();
    let (_, value): (_, serde_json::Value) = get_json(create_app(&dir), "/api/dashboard").await;

    assert_eq!(value["agents"][0]["id"], "main");
    assert_eq!(value["agents"][0]["skills"], 12);
    assert!(value["agents"][0].get("files").is_none());
}

#[tokio::test]
async fn test_read_file_defaults_to_soul() {
    let dir = create_workspace();
    let (status, body): (_, serde_json::Value) = get_json(create_app(&dir), "/api/file").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], SOUL);
}

#[tokio::test]
async fn test_read_file_not_found() {
    let dir = create_workspace();

    for uri in [
        "/api/file?agent=ghost&file=Soul.md",
        "/api/file?agent=main&file=HEARTBEAT.md",
        "/api/file?agent=main&file=MEMORY.md",
    ] {
        let (status, body): (_, ErrorResponse) = get_json(create_app(&dir), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body.error, "File not found");
    }
}

#[tokio::test]
async fn test_save_file_then_read() {
    let dir = create_workspace();

    let (status, body) = send(
        create_app(&dir),
        post_file(r##"{"agent": "main", "file": "MEMORY.md", "content": "# Memory\n"}"##),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ack: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ack["status"], "ok");

    assert_eq!(
        fs::read_to_string(dir.path().join("MEMORY.md")).unwrap(),
        "# Memory\n"
    );
    let (_, body): (_, serde_json::Value) =
        get_json(create_app(&dir), "/api/file?file=MEMORY.md").await;
    assert_eq!(body["content"], "# Memory\n");
}

#[tokio::test]
async fn test_save_file_changes_flowchart() {
    let dir = create_workspace();

    let (status, _) = send(
        create_app(&dir),
        post_file(r#"{"content": "Nothing to see here."}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, report): (_, FlowchartReport) = get_json(create_app(&dir), "/api/flowchart").await;
    assert_eq!(report.summary.critical_rules, 0);
    assert!(!report.diagram_text.contains(":::critical"));
}

#[tokio::test]
async fn test_save_unknown_file_fails() {
    let dir = create_workspace();

    let (status, body) = send(
        create_app(&dir),
        post_file(r#"{"agent": "main", "file": "../escape.md", "content": "x"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "Failed to save file");
    assert!(!dir.path().join("../escape.md").exists());
}

#[tokio::test]
async fn test_static_fallback() {
    let dir = create_workspace();
    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(create_app(&dir), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Lumi</h1>");
}

#[tokio::test]
async fn test_cors_preflight() {
    let dir = create_workspace();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/file")
        .header("origin", "http://localhost:8080")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = create_app(&dir).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
