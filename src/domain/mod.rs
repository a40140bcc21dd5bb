// Domain layer - Grafana data model
pub mod dashboard;
pub mod logs;
pub mod query;
pub mod snapshot;
