// Dashboard snapshot workflow orchestration
use crate::application::grafana_gateway::{GatewayError, GrafanaGateway};
use crate::application::panel_fetcher::fetch_all;
use crate::application::query_builder::build_query_plans;
use crate::application::snapshot_assembler::assemble;
use crate::domain::snapshot::SnapshotResponse;
use std::fmt;
use std::sync::Arc;

/// The workflow stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    FetchDashboard,
    BuildQueries,
    FetchPanelData,
    Assemble,
    CreateSnapshot,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::FetchDashboard => "fetch dashboard",
            WorkflowStage::BuildQueries => "build queries",
            WorkflowStage::FetchPanelData => "fetch panel data",
            WorkflowStage::Assemble => "assemble snapshot",
            WorkflowStage::CreateSnapshot => "create snapshot",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum WorkflowError {
    /// Rejected before any remote call was made.
    #[error("invalid snapshot request: {0}")]
    Validation(String),
    /// A stage failed; the remaining stages were not run.
    #[error("{stage} failed: {source}")]
    Stage {
        stage: WorkflowStage,
        #[source]
        source: GatewayError,
    },
}

/// Orchestrates the five-stage snapshot workflow. Stateless across
/// invocations: each call fetches everything fresh and retains nothing.
#[derive(Clone)]
pub struct SnapshotWorkflow {
    gateway: Arc<dyn GrafanaGateway>,
}

impl SnapshotWorkflow {
    pub fn new(gateway: Arc<dyn GrafanaGateway>) -> Self {
        Self { gateway }
    }

    /// Run the workflow exactly once: fetch the dashboard, derive per-panel
    /// queries, fetch live data for every panel in parallel, assemble the
    /// frozen document, and persist it as a snapshot.
    ///
    /// Any stage failure aborts the remaining stages; a snapshot embedding
    /// incomplete data is never created.
    pub async fn create_dashboard_snapshot(
        &self,
        dashboard_uid: &str,
        snapshot_name: &str,
        expires: i64,
    ) -> Result<SnapshotResponse, WorkflowError> {
        if dashboard_uid.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "dashboardUid must not be empty".to_string(),
            ));
        }
        if snapshot_name.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "snapshotName must not be empty".to_string(),
            ));
        }

        tracing::debug!(stage = %WorkflowStage::FetchDashboard, uid = dashboard_uid, "workflow stage");
        let detail = self
            .gateway
            .fetch_dashboard(dashboard_uid)
            .await
            .map_err(|source| WorkflowError::Stage {
                stage: WorkflowStage::FetchDashboard,
                source,
            })?;
        let dashboard = detail.dashboard;

        tracing::debug!(
            stage = %WorkflowStage::BuildQueries,
            panels = dashboard.panels.len(),
            "workflow stage"
        );
        let plans = build_query_plans(&dashboard.panels);

        tracing::debug!(stage = %WorkflowStage::FetchPanelData, "workflow stage");
        let results = fetch_all(self.gateway.as_ref(), &plans, &dashboard.time)
            .await
            .map_err(|source| WorkflowError::Stage {
                stage: WorkflowStage::FetchPanelData,
                source,
            })?;

        tracing::debug!(stage = %WorkflowStage::Assemble, "workflow stage");
        let request = assemble(dashboard, results, snapshot_name, expires);

        tracing::debug!(stage = %WorkflowStage::CreateSnapshot, "workflow stage");
        let response = self
            .gateway
            .create_snapshot(&request)
            .await
            .map_err(|source| WorkflowError::Stage {
                stage: WorkflowStage::CreateSnapshot,
                source,
            })?;

        tracing::debug!(key = %response.key, url = %response.url, "snapshot created");
        Ok(response)
    }
}
