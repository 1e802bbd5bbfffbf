//! Web API module for ElectroPanel.
//!
//! This module serves one in-memory panel over a JSON API so a browser
//! frontend can browse the catalog and edit the rail.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/catalog` - List catalog devices (optional ?search= and ?group=)
//! - `GET /api/catalog/{id}` - Get one catalog device
//! - `GET /api/panel` - Current panel with summary
//! - `POST /api/panel/devices` - Append a device
//! - `DELETE /api/panel/devices` - Remove all devices
//! - `DELETE /api/panel/devices/{instance_id}` - Remove one device
//! - `PUT /api/panel/selection` - Select a device or clear the selection
//! - `GET /api/panel/bom` - Bill of materials
//! - `GET /api/panel/export` - Markdown specification
//! - `POST /api/panel/save` - Write the panel back to its file

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::{Catalog, CatalogGroup};
use crate::export::{default_export_path, export_to_markdown};
use crate::models::{DeviceDefinition, InstanceId, PanelMetadata, PanelProject, PlacedDevice};
use crate::services::{bill_of_materials, BomLine, PanelService, PanelSummary};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
///
/// Every mutation of the panel happens while holding `project`, so
/// concurrent requests never observe a half-applied change.
#[derive(Clone)]
pub struct AppState {
    /// Device catalog (immutable after load)
    catalog: Arc<Catalog>,
    /// Panel being edited
    project: Arc<Mutex<PanelProject>>,
    /// File the panel was loaded from, if any
    panel_path: Option<PathBuf>,
}

impl AppState {
    /// Creates a new application state around `project`.
    pub fn new(project: PanelProject, panel_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let catalog = Catalog::load()?;
        Ok(Self {
            catalog: Arc::new(catalog),
            project: Arc::new(Mutex::new(project)),
            panel_path,
        })
    }

    /// Loads the panel at `path`, or starts an empty one if it does not exist yet.
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let catalog = Catalog::load()?;
        let project = if path.exists() {
            PanelService::load(&path, &catalog)?
        } else {
            PanelProject::new("Untitled Panel")?
        };
        Ok(Self {
            catalog: Arc::new(catalog),
            project: Arc::new(Mutex::new(project)),
            panel_path: Some(path),
        })
    }

    /// Returns the panel file path.
    #[must_use]
    pub fn panel_path(&self) -> Option<&PathBuf> {
        self.panel_path.as_ref()
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
    /// Application version.
    pub version: String,
}

/// Query parameters for catalog listing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive search text.
    pub search: Option<String>,
    /// Group id (all, breakers, rcd, rcbo, other).
    pub group: Option<String>,
}

/// Catalog list response.
#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    /// Matching devices in catalog order.
    pub devices: Vec<DeviceDefinition>,
    /// Number of matching devices.
    pub total: usize,
}

/// Full panel state.
#[derive(Debug, Serialize)]
pub struct PanelResponse {
    /// Panel metadata.
    pub metadata: PanelMetadata,
    /// Placed devices in rail order.
    pub devices: Vec<PlacedDevice>,
    /// Selected placement, if any.
    pub selected: Option<InstanceId>,
    /// Aggregates.
    pub summary: PanelSummary,
}

impl From<&PanelProject> for PanelResponse {
    fn from(project: &PanelProject) -> Self {
        Self {
            metadata: project.metadata.clone(),
            devices: project.layout.devices().to_vec(),
            selected: project.layout.selected(),
            summary: PanelSummary::from_layout(&project.layout),
        }
    }
}

/// Add device request.
#[derive(Debug, Deserialize)]
pub struct AddDeviceRequest {
    /// Catalog id of the device to append.
    pub catalog_id: String,
}

/// Add device response.
#[derive(Debug, Serialize)]
pub struct AddDeviceResponse {
    /// The new placement.
    pub device: PlacedDevice,
    /// Aggregates after the addition.
    pub summary: PanelSummary,
}

/// Remove device response.
#[derive(Debug, Serialize)]
pub struct RemoveDeviceResponse {
    /// Whether a placement with that id existed.
    pub removed: bool,
    /// Aggregates after the removal.
    pub summary: PanelSummary,
}

/// Selection update request. A null id clears the selection.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    /// Placement to select.
    pub instance_id: Option<InstanceId>,
}

/// Bill of materials response.
#[derive(Debug, Serialize)]
pub struct BomResponse {
    /// One line per catalog id.
    pub lines: Vec<BomLine>,
    /// Aggregates.
    pub summary: PanelSummary,
}

/// Export response with markdown content.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// The exported markdown content.
    pub markdown: String,
    /// Suggested filename for download.
    pub suggested_filename: String,
}

/// Save response.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    /// File written.
    pub path: String,
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
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/catalog - List catalog devices.
async fn list_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<CatalogListResponse>> {
    let group = match query.group.as_deref() {
        Some(group) => group.parse::<CatalogGroup>().map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details("Invalid group", e.to_string())),
            )
        })?,
        None => CatalogGroup::All,
    };
    let search = query.search.as_deref().unwrap_or("");

    let devices: Vec<DeviceDefinition> = state
        .catalog
        .browse(group, search)
        .into_iter()
        .cloned()
        .collect();
    let total = devices.len();

    Ok(Json(CatalogListResponse { devices, total }))
}

/// GET /api/catalog/{id} - Get one catalog device.
async fn get_catalog_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeviceDefinition>> {
    state.catalog.get(&id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Unknown catalog id: {id}"))),
        )
    })
}

/// GET /api/panel - Current panel.
async fn get_panel(State(state): State<AppState>) -> Json<PanelResponse> {
    let project = state.project.lock().await;
    Json(PanelResponse::from(&*project))
}

/// POST /api/panel/devices - Append a catalog device to the rail.
async fn add_device(
    State(state): State<AppState>,
    Json(request): Json<AddDeviceRequest>,
) -> ApiResult<(StatusCode, Json<AddDeviceResponse>)> {
    let definition = state.catalog.get(&request.catalog_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!(
                "Unknown catalog id: {}",
                request.catalog_id
            ))),
        )
    })?;

    let mut project = state.project.lock().await;
    let device = project.add_device(definition);
    info!(catalog_id = %request.catalog_id, instance_id = %device.instance_id, "device added");

    Ok((
        StatusCode::CREATED,
        Json(AddDeviceResponse {
            device,
            summary: PanelSummary::from_layout(&project.layout),
        }),
    ))
}

/// DELETE /api/panel/devices/{instance_id} - Remove one placement.
///
/// Removing an id that is not on the rail is not an error.
async fn remove_device(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> ApiResult<Json<RemoveDeviceResponse>> {
    let instance_id = instance_id.parse::<InstanceId>().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid instance id", e.to_string())),
        )
    })?;

    let mut project = state.project.lock().await;
    let removed = project.remove_device(instance_id);
    info!(%instance_id, removed, "device removal");

    Ok(Json(RemoveDeviceResponse {
        removed,
        summary: PanelSummary::from_layout(&project.layout),
    }))
}

/// DELETE /api/panel/devices - Remove every placement.
async fn clear_devices(State(state): State<AppState>) -> StatusCode {
    let mut project = state.project.lock().await;
    project.clear_all();
    info!("panel cleared");
    StatusCode::NO_CONTENT
}

/// PUT /api/panel/selection - Select a placement or clear the selection.
async fn set_selection(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> StatusCode {
    let mut project = state.project.lock().await;
    project.layout.select(request.instance_id);
    StatusCode::NO_CONTENT
}

/// GET /api/panel/bom - Bill of materials.
async fn get_bom(State(state): State<AppState>) -> Json<BomResponse> {
    let project = state.project.lock().await;
    Json(BomResponse {
        lines: bill_of_materials(&project.layout),
        summary: PanelSummary::from_layout(&project.layout),
    })
}

/// GET /api/panel/export - Markdown specification.
async fn export_panel(State(state): State<AppState>) -> Json<ExportResponse> {
    let project = state.project.lock().await;
    Json(ExportResponse {
        markdown: export_to_markdown(&project),
        suggested_filename: default_export_path(&project).to_string_lossy().to_string(),
    })
}

/// POST /api/panel/save - Write the panel to the file it was opened from.
async fn save_panel(State(state): State<AppState>) -> ApiResult<Json<SaveResponse>> {
    let Some(path) = state.panel_path.clone() else {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiError::new(
                "Server was started without a panel file; nothing to save to",
            )),
        ));
    };

    let mut project = state.project.lock().await;
    project.metadata.touch();
    PanelService::save(&project, &path).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Failed to save panel", format!("{e:#}"))),
        )
    })?;

    Ok(Json(SaveResponse {
        path: path.display().to_string(),
    }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS for a frontend served from another local port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/api/catalog", get(list_catalog))
        .route("/api/catalog/{id}", get(get_catalog_device))
        // Panel endpoints
        .route("/api/panel", get(get_panel))
        .route(
            "/api/panel/devices",
            post(add_device).delete(clear_devices),
        )
        .route(
            "/api/panel/devices/{instance_id}",
            axum::routing::delete(remove_device),
        )
        .route("/api/panel/selection", put(set_selection))
        .route("/api/panel/bom", get(get_bom))
        .route("/api/panel/export", get(export_panel))
        .route("/api/panel/save", post(save_panel))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the web server.
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting ElectroPanel web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_details_skipped_when_absent() {
        let json = serde_json::to_string(&ApiError::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);

        let json = serde_json::to_string(&ApiError::with_details("boom", "why")).unwrap();
        assert!(json.contains(r#""details":"why""#));
    }

    #[test]
    fn test_panel_response_from_project() {
        let state = AppState::new(PanelProject::new("Web").unwrap(), None).unwrap();
        let mut project = PanelProject::new("Web").unwrap();
        let placed = project.add_device(state.catalog.get("rcd-40-30").unwrap());
        project.layout.select(Some(placed.instance_id));

        let response = PanelResponse::from(&project);
        assert_eq!(response.devices.len(), 1);
        assert_eq!(response.selected, Some(placed.instance_id));
        assert_eq!(response.summary.total_slots, 2);
        assert_eq!(response.summary.total_current_amps, 40);
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("new.panel.json");
        let state = AppState::open(path.clone()).unwrap();
        assert_eq!(state.panel_path(), Some(&path));
    }
}
