// Grafana HTTP API adapter
use crate::application::grafana_gateway::{DashboardSearch, GatewayError, GrafanaGateway};
use crate::domain::dashboard::{DashboardDetail, DashboardHit};
use crate::domain::logs::{LogQueryRequest, LogQueryResponse};
use crate::domain::query::{PanelDataRequest, PanelDataResponse};
use crate::domain::snapshot::{SnapshotDetail, SnapshotRequest, SnapshotResponse, SnapshotSummary};
use crate::infrastructure::config::GrafanaSettings;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGrafanaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGrafanaGateway {
    pub fn new(settings: &GrafanaSettings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", settings.api_key))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::RemoteUnavailable(err.to_string())
}

/// Map a non-success status onto the failure taxonomy.
fn status_failure(status: StatusCode, message: String) -> Option<GatewayError> {
    if status.is_client_error() {
        return Some(GatewayError::RemoteRejected {
            status: status.as_u16(),
            message,
        });
    }
    if status.is_server_error() {
        return Some(GatewayError::RemoteFault {
            status: status.as_u16(),
            message,
        });
    }
    None
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(status_failure(status, message).unwrap_or(GatewayError::RemoteFault {
        status: status.as_u16(),
        message: String::new(),
    }))
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let response = check_status(response).await?;
    let status = response.status();
    response.json::<T>().await.map_err(|err| GatewayError::RemoteFault {
        status: status.as_u16(),
        message: format!("undecodable response body: {err}"),
    })
}

#[async_trait]
impl GrafanaGateway for HttpGrafanaGateway {
    async fn search_dashboards(
        &self,
        search: &DashboardSearch,
    ) -> Result<Vec<DashboardHit>, GatewayError> {
        let mut params: Vec<(&str, String)> = vec![("type", "dash-db".to_string())];
        if let Some(query) = &search.query {
            params.push(("query", query.clone()));
        }
        if let Some(tag) = &search.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(limit) = search.limit {
            params.push(("limit", limit.to_string()));
        }

        let response = self
            .client
            .get(self.url("/api/search"))
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }

    async fn fetch_dashboard(&self, uid: &str) -> Result<DashboardDetail, GatewayError> {
        let url = self.url(&format!("/api/dashboards/uid/{}", urlencoding::encode(uid)));
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        decode_response(response).await
    }

    async fn fetch_panel_data(
        &self,
        request: &PanelDataRequest,
    ) -> Result<PanelDataResponse, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/ds/query"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }

    async fn create_snapshot(
        &self,
        request: &SnapshotRequest,
    ) -> Result<SnapshotResponse, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/snapshots"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }

    async fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/snapshots"))
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }

    async fn fetch_snapshot(&self, key: &str) -> Result<SnapshotDetail, GatewayError> {
        let url = self.url(&format!("/api/snapshots/{}", urlencoding::encode(key)));
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        decode_response(response).await
    }

    async fn delete_snapshot(&self, delete_key: &str) -> Result<(), GatewayError> {
        // The platform deletes via GET on a capability URL.
        let url = self.url(&format!(
            "/api/snapshots-delete/{}",
            urlencoding::encode(delete_key)
        ));
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn query_logs(&self, request: &LogQueryRequest) -> Result<LogQueryResponse, GatewayError> {
        let params = [
            ("query", request.query.clone()),
            ("limit", request.limit.to_string()),
            ("start", request.start.to_string()),
            ("end", request.end.to_string()),
            ("direction", request.direction.as_str().to_string()),
        ];

        let response = self
            .client
            .get(self.url("/loki/api/v1/query_range"))
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;
        decode_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GrafanaSettings {
        GrafanaSettings {
            base_url: "http://grafana:3000/".to_string(),
            api_key: "secret".to_string(),
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let gateway = HttpGrafanaGateway::new(&settings()).unwrap();
        assert_eq!(gateway.url("/api/search"), "http://grafana:3000/api/search");
    }

    #[test]
    fn client_errors_map_to_rejected() {
        let error = status_failure(StatusCode::NOT_FOUND, "no such dashboard".to_string());
        assert!(matches!(
            error,
            Some(GatewayError::RemoteRejected { status: 404, .. })
        ));
    }

    #[test]
    fn server_errors_map_to_fault() {
        let error = status_failure(StatusCode::BAD_GATEWAY, String::new());
        assert!(matches!(
            error,
            Some(GatewayError::RemoteFault { status: 502, .. })
        ));
    }

    #[test]
    fn success_statuses_are_not_failures() {
        assert!(status_failure(StatusCode::OK, String::new()).is_none());
    }
}
