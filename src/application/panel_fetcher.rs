// Parallel panel data fetch stage
use crate::application::grafana_gateway::{GatewayError, GrafanaGateway};
use crate::domain::dashboard::TimeRange;
use crate::domain::query::{PanelDataRequest, PanelDataResponse, PanelQueryPlan};
use futures::future::try_join_all;

/// Fetch data for every panel plan concurrently, one request per panel.
///
/// `NoQuery` slots resolve to `None` without touching the gateway. The
/// first failing fetch aborts the stage and drops the in-flight siblings;
/// no partial result set ever escapes. Result order matches plan order,
/// whatever order the fetches complete in.
pub async fn fetch_all(
    gateway: &dyn GrafanaGateway,
    plans: &[PanelQueryPlan],
    range: &TimeRange,
) -> Result<Vec<Option<PanelDataResponse>>, GatewayError> {
    try_join_all(plans.iter().map(|plan| fetch_one(gateway, plan, range))).await
}

async fn fetch_one(
    gateway: &dyn GrafanaGateway,
    plan: &PanelQueryPlan,
    range: &TimeRange,
) -> Result<Option<PanelDataResponse>, GatewayError> {
    match plan {
        PanelQueryPlan::NoQuery => Ok(None),
        PanelQueryPlan::Queries(queries) => {
            let request = PanelDataRequest {
                queries: queries.clone(),
                range: range.clone(),
            };
            gateway.fetch_panel_data(&request).await.map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::grafana_gateway::testing::StubGateway;
    use crate::domain::dashboard::DataSourceRef;
    use crate::domain::query::PanelDataQuery;
    use std::collections::BTreeMap;

    fn range() -> TimeRange {
        TimeRange {
            from: "now-1h".to_string(),
            to: "now".to_string(),
            raw: None,
        }
    }

    fn plan(ref_id: &str) -> PanelQueryPlan {
        PanelQueryPlan::Queries(vec![PanelDataQuery {
            ref_id: ref_id.to_string(),
            datasource: DataSourceRef::default(),
            expr: "up".to_string(),
            instant: false,
            range: true,
        }])
    }

    fn response() -> PanelDataResponse {
        PanelDataResponse {
            results: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn fetches_every_plan_and_skips_no_query() {
        let gateway = StubGateway {
            panel_data: [
                ("A".to_string(), Ok(response())),
                ("C".to_string(), Ok(response())),
            ]
            .into(),
            ..Default::default()
        };

        let plans = [plan("A"), PanelQueryPlan::NoQuery, plan("C")];
        let results = fetch_all(&gateway, &plans, &range()).await.unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_some());
        assert!(results[1].is_none());
        assert!(results[2].is_some());
        // The no-query panel never reached the gateway.
        assert_eq!(gateway.panel_requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn every_request_carries_the_dashboard_range() {
        let gateway = StubGateway {
            panel_data: [("A".to_string(), Ok(response()))].into(),
            ..Default::default()
        };

        fetch_all(&gateway, &[plan("A")], &range()).await.unwrap();

        let requests = gateway.panel_requests.lock().unwrap();
        assert_eq!(requests[0].range, range());
    }

    #[tokio::test]
    async fn one_failing_panel_fails_the_stage() {
        let gateway = StubGateway {
            panel_data: [
                ("A".to_string(), Ok(response())),
                (
                    "B".to_string(),
                    Err(GatewayError::RemoteFault {
                        status: 500,
                        message: "query engine crashed".to_string(),
                    }),
                ),
            ]
            .into(),
            ..Default::default()
        };

        let result = fetch_all(&gateway, &[plan("A"), plan("B")], &range()).await;
        assert!(matches!(result, Err(GatewayError::RemoteFault { status: 500, .. })));
    }
}
