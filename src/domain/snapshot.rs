// Snapshot domain model
use crate::domain::dashboard::Dashboard;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the snapshot-creation endpoint. `expires` is in seconds,
/// 0 meaning never.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRequest {
    pub dashboard: Dashboard,
    pub name: String,
    #[serde(default)]
    pub expires: i64,
}

/// Shareable reference returned by the platform, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub key: String,
    pub delete_key: String,
    pub url: String,
    pub delete_url: String,
    pub id: i64,
}

/// One row of the snapshot listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub id: i64,
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub org_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub external: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored snapshot: frozen dashboard plus platform meta, which this
/// relay does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDetail {
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub dashboard: Dashboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_response_uses_wire_names() {
        let response: SnapshotResponse = serde_json::from_value(serde_json::json!({
            "key": "xyz",
            "deleteKey": "del-xyz",
            "url": "http://grafana/dashboard/snapshot/xyz",
            "deleteUrl": "http://grafana/api/snapshots-delete/del-xyz",
            "id": 42
        }))
        .unwrap();

        assert_eq!(response.key, "xyz");
        assert_eq!(response.delete_key, "del-xyz");
        assert_eq!(response.id, 42);
    }
}
