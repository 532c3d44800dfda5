use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Reporting service transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Reporting period that is not a valid `YYYY-MM` value
    #[error("Invalid reporting period: {0}")]
    InvalidPeriod(String),

    /// Dashboard task is no longer running
    #[error("Dashboard stopped: {0}")]
    DashboardStopped(String),
}

/// Transport error types
///
/// Every variant is recovered locally by substituting sample data; they only
/// surface from the transport and catalog APIs themselves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// No callback invocation arrived within the request bound
    #[error("Request timeout: {timeout_seconds}s for {action}")]
    Timeout {
        timeout_seconds: u64,
        action: String,
    },

    /// The injected script resource failed to load
    #[error("Script loading failed: {0}")]
    ScriptError(String),

    /// Callback payload was malformed or flagged as a failure
    #[error("Invalid response data: {0}")]
    InvalidPayload(String),
}

/// Month discovery error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Discovery succeeded but yielded no usable months
    #[error("No months data available")]
    NoData,
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
