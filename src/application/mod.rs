// Application layer - Use cases and the remote gateway seam
pub mod dashboard_service;
pub mod grafana_gateway;
pub mod log_service;
pub mod panel_fetcher;
pub mod query_builder;
pub mod snapshot_assembler;
pub mod snapshot_service;
pub mod snapshot_workflow;
