// Panel data query model
use crate::domain::dashboard::{DataSourceRef, TimeRange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One data-source query, derived from a panel target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDataQuery {
    #[serde(rename = "refId")]
    pub ref_id: String,
    pub datasource: DataSourceRef,
    pub expr: String,
    pub instant: bool,
    pub range: bool,
}

/// Per-panel query derivation result: either the panel has nothing to
/// fetch, or a non-empty set of queries in target order.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelQueryPlan {
    NoQuery,
    Queries(Vec<PanelDataQuery>),
}

/// Body of the data-query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDataRequest {
    pub queries: Vec<PanelDataQuery>,
    pub range: TimeRange,
}

/// Query results keyed by refId. A BTreeMap keeps the key order stable in
/// serialized snapshot documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDataResponse {
    pub results: BTreeMap<String, QueryResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub frames: Vec<DataFrame>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    pub schema: FrameSchema,
    pub data: FrameData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Columnar values, one inner vector per schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}
