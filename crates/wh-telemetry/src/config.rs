//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and trace export.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for traces and logs
    pub service_name: String,

    /// Component identifier (01 oracle, 02 vault, 00 runtime)
    pub component_id: String,

    /// Whether spans are exported over OTLP
    pub otlp_enabled: bool,

    /// OpenTelemetry OTLP collector endpoint
    pub otlp_endpoint: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Network identifier (devnet, sepolia, mainnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "weakhands".to_string(),
            component_id: "00".to_string(),
            otlp_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: weakhands)
    /// - `WH_COMPONENT_ID`: Component ID (default: 00)
    /// - `WH_OTLP_ENABLED`: Export spans over OTLP (default: false)
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT`: Collector endpoint (default: http://localhost:4317)
    /// - `WH_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WH_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `WH_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `WH_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),

            component_id: lookup("WH_COMPONENT_ID").unwrap_or(defaults.component_id),

            otlp_enabled: lookup("WH_OTLP_ENABLED")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.otlp_enabled),

            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or(defaults.otlp_endpoint),

            log_level: lookup("WH_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("WH_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("WH_JSON_LOGS")
                .map(|v| is_truthy(&v))
                .unwrap_or(is_container),

            network: lookup("WH_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Create configuration for a specific component.
    pub fn for_component(component_id: &str, component_name: &str) -> Self {
        let mut config = Self::from_env();
        config.component_id = component_id.to_string();
        config.service_name = format!("wh-{}-{}", component_id, component_name);
        config
    }

    /// Get the full service name including component.
    pub fn full_service_name(&self) -> String {
        if self.component_id == "00" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.component_id)
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
