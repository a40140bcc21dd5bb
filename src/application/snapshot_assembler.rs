// Snapshot document assembly
use crate::domain::dashboard::Dashboard;
use crate::domain::query::PanelDataResponse;
use crate::domain::snapshot::SnapshotRequest;

/// Freeze a dashboard into a snapshot-creation request.
///
/// Panels are paired positionally with the fetch results, so the snapshot
/// keeps the original panel order; panels that had nothing to fetch pass
/// through untouched. The title is rewritten to mark the copy as a
/// snapshot; every other dashboard field carries through unchanged.
pub fn assemble(
    dashboard: Dashboard,
    results: Vec<Option<PanelDataResponse>>,
    name: &str,
    expires: i64,
) -> SnapshotRequest {
    debug_assert_eq!(dashboard.panels.len(), results.len());

    let Dashboard {
        id,
        uid,
        title,
        version,
        panels,
        time,
        tags,
        extra,
    } = dashboard;

    let panels = panels
        .into_iter()
        .zip(results)
        .map(|(mut panel, data)| {
            panel.snapshot_data = data;
            panel
        })
        .collect();

    SnapshotRequest {
        dashboard: Dashboard {
            id,
            uid,
            title: format!("{title} (Snapshot)"),
            version,
            panels,
            time,
            tags,
            extra,
        },
        name: name.to_string(),
        expires,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{Panel, TimeRange};
    use serde_json::Map;
    use std::collections::BTreeMap;

    fn panel(id: i64) -> Panel {
        Panel {
            id,
            kind: "timeseries".to_string(),
            title: format!("panel {id}"),
            datasource: None,
            targets: None,
            snapshot_data: None,
            extra: Map::new(),
        }
    }

    fn dashboard(panels: Vec<Panel>) -> Dashboard {
        Dashboard {
            id: Some(9),
            uid: "abc123".to_string(),
            title: "Orders".to_string(),
            version: 4,
            panels,
            time: TimeRange {
                from: "now-1h".to_string(),
                to: "now".to_string(),
                raw: None,
            },
            tags: vec!["shop".to_string()],
            extra: Map::new(),
        }
    }

    fn data() -> PanelDataResponse {
        PanelDataResponse {
            results: BTreeMap::new(),
        }
    }

    #[test]
    fn retitles_and_carries_fields_through() {
        let request = assemble(dashboard(vec![]), vec![], "weekly", 3600);

        assert_eq!(request.dashboard.title, "Orders (Snapshot)");
        assert_eq!(request.dashboard.uid, "abc123");
        assert_eq!(request.dashboard.id, Some(9));
        assert_eq!(request.dashboard.version, 4);
        assert_eq!(request.dashboard.tags, vec!["shop".to_string()]);
        assert_eq!(request.name, "weekly");
        assert_eq!(request.expires, 3600);
    }

    #[test]
    fn time_range_is_carried_verbatim() {
        let request = assemble(dashboard(vec![]), vec![], "weekly", 0);
        assert_eq!(request.dashboard.time.from, "now-1h");
        assert_eq!(request.dashboard.time.to, "now");
    }

    #[test]
    fn attaches_data_per_panel_preserving_order() {
        let request = assemble(
            dashboard(vec![panel(1), panel(2), panel(3)]),
            vec![Some(data()), None, Some(data())],
            "weekly",
            0,
        );

        let panels = &request.dashboard.panels;
        assert_eq!(panels.len(), 3);
        assert_eq!(
            panels.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(panels[0].snapshot_data.is_some());
        assert!(panels[1].snapshot_data.is_none());
        assert!(panels[2].snapshot_data.is_some());
    }

    #[test]
    fn panel_without_data_is_untouched() {
        let original = panel(2);
        let request = assemble(dashboard(vec![original.clone()]), vec![None], "weekly", 0);
        assert_eq!(request.dashboard.panels[0], original);
    }
}
