//! Integration tests for the ElectroPanel Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use electropanel::models::PanelProject;
use electropanel::web::{create_router, AppState};

mod fixtures;
use fixtures::*;

/// Creates a router around an empty in-memory panel.
fn create_test_app() -> Router {
    let state = AppState::new(PanelProject::new("Web Test").unwrap(), None)
        .expect("Failed to create app state");
    create_router(state)
}

/// Sends one request and returns status plus parsed JSON body (Null when empty).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ============================================================================
// Health and catalog
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_catalog_list_and_filter() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/api/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 63);

    let (status, json) = send(&app, "GET", "/api/catalog?group=rcd&search=100", None).await;
    assert_eq!(status, StatusCode::OK);
    let devices = json["devices"].as_array().unwrap();
    assert!(!devices.is_empty());
    assert!(devices.iter().all(|d| d["kind"] == "rcd"));
}

#[tokio::test]
async fn test_catalog_invalid_group() {
    let app = create_test_app();
    let (status, json) = send(&app, "GET", "/api/catalog?group=fuses", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid group");
}

#[tokio::test]
async fn test_catalog_device_lookup() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/api/catalog/cont-25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Contactor 25A");

    let (status, _) = send(&app, "GET", "/api/catalog/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Panel editing
// ============================================================================

#[tokio::test]
async fn test_add_remove_and_summary() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/api/panel/devices",
        Some(json!({ "catalog_id": "rcd-40-30" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let rcd_id = json["device"]["instance_id"].as_u64().unwrap();
    assert_eq!(json["device"]["position"], 0);

    let (_, json) = send(
        &app,
        "POST",
        "/api/panel/devices",
        Some(json!({ "catalog_id": "br-c16" })),
    )
    .await;
    assert_eq!(json["device"]["position"], 2);
    assert_eq!(json["summary"]["total_slots"], 3);
    assert_eq!(json["summary"]["total_current_amps"], 56);

    let (status, json) = send(&app, "DELETE", &format!("/api/panel/devices/{rcd_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);
    assert_eq!(json["summary"]["total_slots"], 1);

    // Removing twice is not an error
    let (status, json) = send(&app, "DELETE", &format!("/api/panel/devices/{rcd_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);

    let (_, json) = send(&app, "GET", "/api/panel", None).await;
    assert_eq!(json["devices"].as_array().unwrap().len(), 1);
    assert_eq!(json["devices"][0]["position"], 2);
}

#[tokio::test]
async fn test_add_unknown_device() {
    let app = create_test_app();
    let (status, json) = send(
        &app,
        "POST",
        "/api/panel/devices",
        Some(json!({ "catalog_id": "br-z1" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("br-z1"));
}

#[tokio::test]
async fn test_remove_malformed_id() {
    let app = create_test_app();
    let (status, _) = send(&app, "DELETE", "/api/panel/devices/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_selection_and_clear() {
    let app = create_test_app();
    let (_, json) = send(
        &app,
        "POST",
        "/api/panel/devices",
        Some(json!({ "catalog_id": "br-c10" })),
    )
    .await;
    let id = json["device"]["instance_id"].clone();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/panel/selection",
        Some(json!({ "instance_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, json) = send(&app, "GET", "/api/panel", None).await;
    assert_eq!(json["selected"], id);

    let (status, _) = send(&app, "DELETE", "/api/panel/devices", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, "GET", "/api/panel", None).await;
    assert!(json["devices"].as_array().unwrap().is_empty());
    assert!(json["selected"].is_null());
    assert_eq!(json["summary"]["enclosure"]["capacity"], 12);
}

#[tokio::test]
async fn test_bom_and_export() {
    let app = create_test_app();
    for id in ["br-c16", "br-c16", "rcd-40-30"] {
        send(
            &app,
            "POST",
            "/api/panel/devices",
            Some(json!({ "catalog_id": id })),
        )
        .await;
    }

    let (status, json) = send(&app, "GET", "/api/panel/bom", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lines"][0]["catalog_id"], "br-c16");
    assert_eq!(json["lines"][0]["quantity"], 2);

    let (status, json) = send(&app, "GET", "/api/panel/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["markdown"].as_str().unwrap().starts_with("# Web Test"));
    assert!(json["suggested_filename"]
        .as_str()
        .unwrap()
        .starts_with("web_test_spec_"));
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_save_without_file_conflicts() {
    let app = create_test_app();
    let (status, _) = send(&app, "POST", "/api/panel/save", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_open_and_save_panel_file() {
    let (path, _temp) = create_temp_panel_file(&["rcd-40-30"]);
    let app = create_router(AppState::open(path.clone()).unwrap());

    let (_, json) = send(&app, "GET", "/api/panel", None).await;
    assert_eq!(json["metadata"]["name"], "Test Panel");
    assert_eq!(json["devices"].as_array().unwrap().len(), 1);

    send(
        &app,
        "POST",
        "/api/panel/devices",
        Some(json!({ "catalog_id": "br-c20" })),
    )
    .await;
    let (status, _) = send(&app, "POST", "/api/panel/save", None).await;
    assert_eq!(status, StatusCode::OK);

    let project = load_panel_file(&path);
    assert_eq!(project.layout.len(), 2);
    assert_eq!(project.layout.devices()[1].device.id, "br-c20");
}

#[tokio::test]
async fn test_open_creates_file_on_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fresh.panel.json");
    let app = create_router(AppState::open(path.clone()).unwrap());

    let (status, _) = send(&app, "POST", "/api/panel/save", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(path.exists());
}
