// Snapshot service - Lifecycle use cases over the gateway
use crate::application::grafana_gateway::{GatewayError, GrafanaGateway};
use crate::domain::snapshot::{SnapshotDetail, SnapshotRequest, SnapshotResponse, SnapshotSummary};
use std::sync::Arc;

#[derive(Clone)]
pub struct SnapshotService {
    gateway: Arc<dyn GrafanaGateway>,
}

impl SnapshotService {
    pub fn new(gateway: Arc<dyn GrafanaGateway>) -> Self {
        Self { gateway }
    }

    /// Create a snapshot from a caller-supplied dashboard document.
    pub async fn create(&self, request: SnapshotRequest) -> Result<SnapshotResponse, GatewayError> {
        self.gateway.create_snapshot(&request).await
    }

    pub async fn list(&self) -> Result<Vec<SnapshotSummary>, GatewayError> {
        self.gateway.list_snapshots().await
    }

    pub async fn detail(&self, key: &str) -> Result<SnapshotDetail, GatewayError> {
        self.gateway.fetch_snapshot(key).await
    }

    pub async fn delete(&self, delete_key: &str) -> Result<(), GatewayError> {
        self.gateway.delete_snapshot(delete_key).await
    }
}
