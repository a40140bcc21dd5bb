// HTTP request handlers
use crate::application::grafana_gateway::{DashboardSearch, GatewayError};
use crate::application::log_service::LogFilter;
use crate::application::snapshot_workflow::WorkflowError;
use crate::domain::dashboard::{DashboardDetail, DashboardHit};
use crate::domain::logs::{LogDirection, LogLine};
use crate::domain::query::{PanelDataRequest, PanelDataResponse};
use crate::domain::snapshot::{SnapshotDetail, SnapshotRequest, SnapshotResponse, SnapshotSummary};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Error payload returned by every endpoint: `{"error": ..., "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: String) -> Self {
        Self {
            status,
            error,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(status = %self.status, "{}: {}", self.error, self.message);
        let body = Json(json!({ "error": self.error, "message": self.message }));
        (self.status, body).into_response()
    }
}

fn gateway_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::RemoteUnavailable(_) => StatusCode::BAD_GATEWAY,
        // Rejections keep the upstream status (404 stays a 404).
        GatewayError::RemoteRejected { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        GatewayError::RemoteFault { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::new(gateway_status(&err), "grafana request failed", err.to_string())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let (status, error) = match &err {
            WorkflowError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "missing required parameters")
            }
            WorkflowError::Stage { source, .. } => {
                (gateway_status(source), "dashboard snapshot failed")
            }
        };
        Self::new(status, error, err.to_string())
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<u32>,
}

/// Search dashboards, optionally filtered by text and tag
pub async fn search_dashboards(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DashboardHit>>, ApiError> {
    let search = DashboardSearch {
        query: params.query,
        tag: params.tag,
        limit: params.limit,
    };
    Ok(Json(state.dashboard_service.search(search).await?))
}

/// Fetch one dashboard with its meta
pub async fn get_dashboard(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardDetail>, ApiError> {
    Ok(Json(state.dashboard_service.dashboard_detail(&uid).await?))
}

/// Run a caller-built panel data query batch
pub async fn query_panel_data(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PanelDataRequest>,
) -> Result<Json<PanelDataResponse>, ApiError> {
    Ok(Json(state.dashboard_service.panel_data(request).await?))
}

/// Create a snapshot from a caller-supplied dashboard document
pub async fn create_snapshot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SnapshotRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    Ok(Json(state.snapshot_service.create(request).await?))
}

/// List all snapshots
pub async fn list_snapshots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SnapshotSummary>>, ApiError> {
    Ok(Json(state.snapshot_service.list().await?))
}

/// Fetch one stored snapshot
pub async fn get_snapshot(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotDetail>, ApiError> {
    Ok(Json(state.snapshot_service.detail(&key).await?))
}

/// Delete a snapshot via its delete key
pub async fn delete_snapshot(
    Path(delete_key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.snapshot_service.delete(&delete_key).await?;
    Ok(Json(json!({ "message": "Snapshot deleted successfully" })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshotBody {
    // Defaults let the workflow reject empty values with a 400 instead of
    // a deserialization error.
    #[serde(default)]
    pub dashboard_uid: String,
    #[serde(default)]
    pub snapshot_name: String,
    #[serde(default)]
    pub expires: i64,
}

/// Full workflow: fetch a dashboard, freeze its panel data, snapshot it
pub async fn create_dashboard_snapshot(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DashboardSnapshotBody>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let snapshot = state
        .snapshot_workflow
        .create_dashboard_snapshot(&body.dashboard_uid, &body.snapshot_name, body.expires)
        .await?;
    Ok(Json(snapshot))
}

#[derive(Deserialize)]
pub struct LogsParams {
    pub level: Option<String>,
    pub range: Option<String>,
    pub limit: Option<u32>,
    pub contains: Option<String>,
    pub direction: Option<String>,
}

/// Query application logs, newest first unless direction=forward
pub async fn query_logs(
    Query(params): Query<LogsParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LogLine>>, ApiError> {
    let defaults = LogFilter::default();
    let filter = LogFilter {
        level: params.level,
        range: params.range.unwrap_or(defaults.range),
        limit: params.limit.unwrap_or(defaults.limit),
        contains: params.contains,
        direction: params
            .direction
            .as_deref()
            .map(LogDirection::parse)
            .unwrap_or(defaults.direction),
    };
    Ok(Json(state.log_service.query_app_logs(&filter).await?))
}

#[derive(Deserialize)]
pub struct ErrorCountParams {
    pub range: Option<String>,
}

/// Count error-level log lines in a relative range
pub async fn count_error_logs(
    Query(params): Query<ErrorCountParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let range = params.range.unwrap_or_else(|| "1h".to_string());
    let count = state.log_service.error_count(&range).await?;
    Ok(Json(json!({ "count": count, "range": range })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::snapshot_workflow::WorkflowStage;

    #[test]
    fn validation_errors_are_bad_requests() {
        let api_error: ApiError =
            WorkflowError::Validation("snapshotName must not be empty".to_string()).into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejected_stage_errors_keep_the_upstream_status() {
        let api_error: ApiError = WorkflowError::Stage {
            stage: WorkflowStage::FetchDashboard,
            source: GatewayError::RemoteRejected {
                status: 404,
                message: "dashboard not found".to_string(),
            },
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert!(api_error.message.contains("fetch dashboard"));
    }

    #[test]
    fn unavailable_maps_to_bad_gateway() {
        let api_error: ApiError =
            GatewayError::RemoteUnavailable("connection refused".to_string()).into();
        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
    }
}
