// Dashboard domain model
use crate::domain::query::PanelDataResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Time window shared by a dashboard and every query derived from it.
/// `from`/`to` may be absolute timestamps or relative expressions
/// ("now-1h"); they are never re-derived by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawTimeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTimeRange {
    pub from: String,
    pub to: String,
}

/// Data-source reference carried by panels and queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub uid: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for DataSourceRef {
    fn default() -> Self {
        Self {
            uid: "default".to_string(),
            kind: "prometheus".to_string(),
        }
    }
}

/// A single query expression attached to a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "refId")]
    pub ref_id: String,
    #[serde(default)]
    pub expr: String,
    #[serde(default, rename = "legendFormat", skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One visualization unit within a dashboard.
///
/// Fields this relay does not interpret (grid position, field config, ...)
/// land in `extra` and are carried through snapshots unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DataSourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Target>>,
    #[serde(default, rename = "snapshotData", skip_serializing_if = "Option::is_none")]
    pub snapshot_data: Option<PanelDataResponse>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Panel {
    /// A panel with no targets has no data to fetch.
    pub fn has_targets(&self) -> bool {
        self.targets.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// Full dashboard document as stored by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub panels: Vec<Panel>,
    pub time: TimeRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the dashboard-by-uid endpoint: the document plus meta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDetail {
    pub dashboard: Dashboard,
    #[serde(default)]
    pub meta: DashboardMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, rename = "folderTitle", skip_serializing_if = "Option::is_none")]
    pub folder_title: Option<String>,
    #[serde(default, rename = "folderUid", skip_serializing_if = "Option::is_none")]
    pub folder_uid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of the dashboard search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHit {
    pub id: i64,
    pub uid: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
