use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub grafana: GrafanaSettings,
    #[serde(default)]
    pub logs: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrafanaSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// Value of the `app` label selecting the application's log streams.
    #[serde(default = "default_app_label")]
    pub app_label: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            app_label: default_app_label(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:4000".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_app_label() -> String {
    "target-api".to_string()
}

/// Load configuration from `config/relay.*` (optional) with `RELAY__*`
/// environment overrides, e.g. `RELAY__GRAFANA__API_KEY`.
pub fn load_config() -> anyhow::Result<RelayConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/relay").required(false))
        .add_source(
            config::Environment::with_prefix("RELAY")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[grafana]\napi_key = \"secret\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let relay: RelayConfig = settings.try_deserialize().unwrap();
        assert_eq!(relay.grafana.api_key, "secret");
        assert_eq!(relay.grafana.base_url, "http://localhost:3000");
        assert_eq!(relay.grafana.request_timeout_secs, 30);
        assert_eq!(relay.server.listen_addr, "0.0.0.0:4000");
        assert_eq!(relay.logs.app_label, "target-api");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[grafana]\nbase_url = \"http://grafana:3000\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        assert!(settings.try_deserialize::<RelayConfig>().is_err());
    }
}
