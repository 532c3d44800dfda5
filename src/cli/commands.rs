//! Subcommand implementations and the arguments they share

pub mod months;
pub mod report;
pub mod watch;

use crate::config::{AppConfig, ServiceConfig};
use crate::errors::{AppError, AppResult};
use crate::transport::Transport;
use crate::types::ReportingPeriod;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Reporting service overrides shared by every networked command
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reporting service endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

impl ServiceArgs {
    /// Load configuration and apply command-line overrides
    pub fn app_config(&self) -> AppResult<AppConfig> {
        let mut app_config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        self.apply(&mut app_config.service)?;
        Ok(app_config)
    }

    fn apply(&self, service: &mut ServiceConfig) -> AppResult<()> {
        if let Some(endpoint) = &self.endpoint {
            service.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(AppError::Config(
                    "--timeout-seconds must be greater than zero".to_string(),
                ));
            }
            service.timeout_seconds = timeout;
        }
        Ok(())
    }
}

/// HTTP-backed transport for the configured service
pub fn http_transport(service: ServiceConfig) -> AppResult<Transport> {
    info!("Using reporting service at {}", service.endpoint);
    Ok(Transport::http(service)?)
}

/// Parse a `--month` argument
pub fn parse_month(value: &str) -> Result<ReportingPeriod, String> {
    value
        .parse()
        .map_err(|_| format!("expected a month in YYYY-MM form, got {:?}", value))
}
