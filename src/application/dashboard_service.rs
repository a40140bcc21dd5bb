// Dashboard service - Use cases for search, detail and panel data
use crate::application::grafana_gateway::{DashboardSearch, GatewayError, GrafanaGateway};
use crate::domain::dashboard::{DashboardDetail, DashboardHit};
use crate::domain::query::{PanelDataRequest, PanelDataResponse};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn GrafanaGateway>,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn GrafanaGateway>) -> Self {
        Self { gateway }
    }

    pub async fn search(&self, search: DashboardSearch) -> Result<Vec<DashboardHit>, GatewayError> {
        self.gateway.search_dashboards(&search).await
    }

    pub async fn dashboard_detail(&self, uid: &str) -> Result<DashboardDetail, GatewayError> {
        self.gateway.fetch_dashboard(uid).await
    }

    /// Pass a caller-built query batch straight through to the platform.
    pub async fn panel_data(
        &self,
        request: PanelDataRequest,
    ) -> Result<PanelDataResponse, GatewayError> {
        self.gateway.fetch_panel_data(&request).await
    }
}
