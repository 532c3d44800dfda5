use crate::config::ServiceConfig;
use crate::errors::{TransportError, TransportResult};
use crate::transport::{
    build_request_url, CallbackTokens, HttpScriptHost, ScriptCleanup, ScriptHost, ScriptRegistry,
};
use crate::types::{ReportingPeriod, ServiceResponse};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Cross-origin request client for the reporting service.
///
/// Each call gets its own callback token, so overlapping calls never see each
/// other's payloads. Cleanup of the callback and script resource runs exactly
/// once per call whichever way it ends.
pub struct Transport {
    config: ServiceConfig,
    host: Arc<dyn ScriptHost>,
    registry: ScriptRegistry,
    tokens: CallbackTokens,
}

impl Transport {
    pub fn new(config: ServiceConfig, host: Arc<dyn ScriptHost>) -> Self {
        Self {
            config,
            host,
            registry: ScriptRegistry::new(),
            tokens: CallbackTokens::new(),
        }
    }

    /// Transport backed by [`HttpScriptHost`]
    pub fn http(config: ServiceConfig) -> TransportResult<Self> {
        Ok(Self::new(config, Arc::new(HttpScriptHost::new()?)))
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Perform one request and return the validated payload
    pub async fn fetch(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> TransportResult<ServiceResponse> {
        let token = self.tokens.next_token();
        let src = build_request_url(&self.config.endpoint, action, &token, params)?;
        debug!("Requesting {} via {}", action, token);

        let callback = self.registry.register(&token, src.clone());
        let mut cleanup = ScriptCleanup::new(self.registry.clone(), token.clone());

        let exchange = async {
            self.host.load(src, self.registry.clone()).await?;
            callback.await.map_err(|_| {
                TransportError::ScriptError(format!("Callback {} discarded before invocation", token))
            })
        };

        let outcome = timeout(Duration::from_secs(self.config.timeout_seconds), exchange).await;
        cleanup.run();

        let payload = match outcome {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "Request {} for {} timed out after {}s",
                    token, action, self.config.timeout_seconds
                );
                return Err(TransportError::Timeout {
                    timeout_seconds: self.config.timeout_seconds,
                    action: action.to_string(),
                });
            }
        };

        debug!("Callback {} received", token);
        validate_payload(payload)
    }

    /// Discovery request; returns the raw month list
    pub async fn fetch_months(&self) -> TransportResult<Vec<String>> {
        let action = self.config.discovery_action.clone();
        let response = self.fetch(&action, &[]).await?;
        Ok(response.months.unwrap_or_default())
    }

    /// Statistics request scoped to `period`; returns the raw report object
    pub async fn fetch_statistics(&self, period: &ReportingPeriod) -> TransportResult<Value> {
        let action = self.config.statistics_action.clone();
        let month = period.to_string();
        let response = self.fetch(&action, &[("month", &month)]).await?;
        let data = response.data.ok_or_else(|| {
            TransportError::InvalidPayload(format!("No data for {}", period))
        })?;
        info!("Live data received for {}", period);
        Ok(data)
    }
}

/// Accept a callback payload only when it carries `success: true`
pub fn validate_payload(payload: Value) -> TransportResult<ServiceResponse> {
    let response: ServiceResponse = serde_json::from_value(payload)
        .map_err(|e| TransportError::InvalidPayload(format!("Malformed payload: {}", e)))?;

    if !response.success {
        let reason = response
            .error
            .clone()
            .unwrap_or_else(|| "success flag missing".to_string());
        return Err(TransportError::InvalidPayload(reason));
    }

    Ok(response)
}
