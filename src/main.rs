// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::log_service::LogService;
use crate::application::snapshot_service::SnapshotService;
use crate::application::snapshot_workflow::SnapshotWorkflow;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_gateway::HttpGrafanaGateway;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    count_error_logs, create_dashboard_snapshot, create_snapshot, delete_snapshot, get_dashboard,
    get_snapshot, health_check, list_snapshots, query_logs, query_panel_data, search_dashboards,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_config()?;

    // Create the gateway (infrastructure layer)
    let gateway = Arc::new(HttpGrafanaGateway::new(&config.grafana)?);

    // Create services (application layer)
    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(gateway.clone()),
        snapshot_service: SnapshotService::new(gateway.clone()),
        snapshot_workflow: SnapshotWorkflow::new(gateway.clone()),
        log_service: LogService::new(gateway, config.logs.app_label),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboards", get(search_dashboards))
        .route("/api/dashboards/:uid", get(get_dashboard))
        .route("/api/ds/query", post(query_panel_data))
        .route("/api/snapshots", post(create_snapshot).get(list_snapshots))
        .route("/api/snapshots/:key", get(get_snapshot))
        .route("/api/snapshots-delete/:delete_key", get(delete_snapshot))
        .route("/api/dashboard-snapshot", post(create_dashboard_snapshot))
        .route("/api/logs", get(query_logs))
        .route("/api/logs/errors/count", get(count_error_logs))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen_addr.parse()?;
    tracing::info!("starting grafana-relay on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
