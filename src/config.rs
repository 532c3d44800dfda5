use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reporting service endpoint of the production dashboard
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbw0v5iCUWXB_tAokshSc-yJh4ml0a_HMVLtYHT9JrlquB0p8HqIyAQ6XzhfMvMFHqeI/exec";

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub dashboard: DashboardConfig,
}

/// Reporting service settings used by the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub discovery_action: String,
    pub statistics_action: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            discovery_action: "available-months".to_string(),
            statistics_action: "all-statistics".to_string(),
        }
    }
}

/// Orchestrator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub refresh_interval_seconds: u64,
    pub fallback_months: usize,
    pub notification_ttl_seconds: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: 120,
            fallback_months: 12,
            notification_ttl_seconds: 4,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let service = ServiceConfig::default();
        let dashboard = DashboardConfig::default();
        let config = Config::builder()
            .set_default("service.endpoint", service.endpoint)?
            .set_default("service.timeout_seconds", service.timeout_seconds)?
            .set_default("service.discovery_action", service.discovery_action)?
            .set_default("service.statistics_action", service.statistics_action)?
            .set_default(
                "dashboard.refresh_interval_seconds",
                dashboard.refresh_interval_seconds,
            )?
            .set_default("dashboard.fallback_months", dashboard.fallback_months as u64)?
            .set_default(
                "dashboard.notification_ttl_seconds",
                dashboard.notification_ttl_seconds,
            )?
            .add_source(file)
            // OUTAGE_SERVICE__ENDPOINT, OUTAGE_DASHBOARD__FALLBACK_MONTHS, ...
            .add_source(
                Environment::with_prefix("OUTAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        if app_config.service.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "service.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if app_config.dashboard.refresh_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "dashboard.refresh_interval_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }
}
