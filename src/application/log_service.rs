// Log service - Loki queries with message formatting
use crate::application::grafana_gateway::{GatewayError, GrafanaGateway};
use crate::domain::logs::{
    format_log_response, parse_relative_range, LogDirection, LogLine, LogQueryRequest,
};
use std::sync::Arc;

const ERROR_COUNT_LIMIT: u32 = 1000;

/// Filters accepted by the log endpoint. `range` is a relative expression
/// like "5m" / "1h" / "1d", resolved against the current clock.
#[derive(Debug, Clone)]
pub struct LogFilter {
    pub level: Option<String>,
    pub range: String,
    pub limit: u32,
    pub contains: Option<String>,
    pub direction: LogDirection,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            level: None,
            range: "1h".to_string(),
            limit: 100,
            contains: None,
            direction: LogDirection::Backward,
        }
    }
}

#[derive(Clone)]
pub struct LogService {
    gateway: Arc<dyn GrafanaGateway>,
    app_label: String,
}

impl LogService {
    pub fn new(gateway: Arc<dyn GrafanaGateway>, app_label: String) -> Self {
        Self { gateway, app_label }
    }

    /// Query application logs and format each line.
    pub async fn query_app_logs(&self, filter: &LogFilter) -> Result<Vec<LogLine>, GatewayError> {
        let end = chrono::Utc::now().timestamp();
        let start = end - parse_relative_range(&filter.range);

        let request = LogQueryRequest {
            query: self.build_selector(filter.level.as_deref(), filter.contains.as_deref()),
            start,
            end,
            limit: filter.limit,
            direction: filter.direction,
        };
        tracing::debug!(query = %request.query, limit = request.limit, "querying logs");

        let response = self.gateway.query_logs(&request).await?;
        Ok(format_log_response(&response))
    }

    /// Count error-level lines in the given range.
    pub async fn error_count(&self, range: &str) -> Result<usize, GatewayError> {
        let filter = LogFilter {
            level: Some("error".to_string()),
            range: range.to_string(),
            limit: ERROR_COUNT_LIMIT,
            ..Default::default()
        };
        Ok(self.query_app_logs(&filter).await?.len())
    }

    fn build_selector(&self, level: Option<&str>, contains: Option<&str>) -> String {
        let mut query = format!("{{app=\"{}\"}}", self.app_label);
        if let Some(level) = level {
            query.push_str(&format!(" |= \"{}\"", level.to_ascii_uppercase()));
        }
        if let Some(needle) = contains {
            query.push_str(&format!(" |= \"{needle}\""));
        }
        query
    }
}
