// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::log_service::LogService;
use crate::application::snapshot_service::SnapshotService;
use crate::application::snapshot_workflow::SnapshotWorkflow;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub snapshot_service: SnapshotService,
    pub snapshot_workflow: SnapshotWorkflow,
    pub log_service: LogService,
}
