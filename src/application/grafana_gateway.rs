// Gateway trait for the remote Grafana HTTP API
use crate::domain::dashboard::{DashboardDetail, DashboardHit};
use crate::domain::logs::{LogQueryRequest, LogQueryResponse};
use crate::domain::query::{PanelDataRequest, PanelDataResponse};
use crate::domain::snapshot::{SnapshotDetail, SnapshotRequest, SnapshotResponse, SnapshotSummary};
use async_trait::async_trait;

/// Classified failure from a remote call. No retries happen anywhere;
/// every failure is surfaced to the caller as one of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("grafana unreachable: {0}")]
    RemoteUnavailable(String),
    /// The platform rejected the request (4xx): unknown uid, bad query.
    #[error("grafana rejected the request (status {status}): {message}")]
    RemoteRejected { status: u16, message: String },
    /// The platform failed (5xx), or returned a body we cannot decode.
    #[error("grafana server fault (status {status}): {message}")]
    RemoteFault { status: u16, message: String },
}

/// Filters accepted by the dashboard search endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSearch {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<u32>,
}

/// One method per remote endpoint consumed by this relay. Implementations
/// are stateless per call and share nothing but their transport.
#[async_trait]
pub trait GrafanaGateway: Send + Sync {
    async fn search_dashboards(
        &self,
        search: &DashboardSearch,
    ) -> Result<Vec<DashboardHit>, GatewayError>;

    async fn fetch_dashboard(&self, uid: &str) -> Result<DashboardDetail, GatewayError>;

    async fn fetch_panel_data(
        &self,
        request: &PanelDataRequest,
    ) -> Result<PanelDataResponse, GatewayError>;

    async fn create_snapshot(
        &self,
        request: &SnapshotRequest,
    ) -> Result<SnapshotResponse, GatewayError>;

    async fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, GatewayError>;

    async fn fetch_snapshot(&self, key: &str) -> Result<SnapshotDetail, GatewayError>;

    async fn delete_snapshot(&self, delete_key: &str) -> Result<(), GatewayError>;

    async fn query_logs(&self, request: &LogQueryRequest) -> Result<LogQueryResponse, GatewayError>;
}
