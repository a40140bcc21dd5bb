// Panel query derivation
use crate::domain::dashboard::Panel;
use crate::domain::query::{PanelDataQuery, PanelQueryPlan};

/// Derive the data-source queries needed to materialize each panel.
///
/// Pure and deterministic: one plan per panel, in panel order. Panels
/// without targets yield [`PanelQueryPlan::NoQuery`] and are never queried.
pub fn build_query_plans(panels: &[Panel]) -> Vec<PanelQueryPlan> {
    panels.iter().map(plan_for_panel).collect()
}

fn plan_for_panel(panel: &Panel) -> PanelQueryPlan {
    if !panel.has_targets() {
        return PanelQueryPlan::NoQuery;
    }
    let targets = panel.targets.as_deref().unwrap_or_default();

    // Panels without an explicit data source fall back to the default one.
    let datasource = panel.datasource.clone().unwrap_or_default();

    let queries = targets
        .iter()
        .map(|target| PanelDataQuery {
            ref_id: target.ref_id.clone(),
            datasource: datasource.clone(),
            expr: target.expr.clone(),
            instant: false,
            range: true,
        })
        .collect();

    PanelQueryPlan::Queries(queries)
}
