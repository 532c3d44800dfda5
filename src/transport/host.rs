use crate::errors::{TransportError, TransportResult};
use crate::transport::request::parse_jsonp;
use crate::transport::ScriptRegistry;
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

/// Environment adapter that loads a script resource.
///
/// `load` resolves once the resource has loaded and run. Running it may invoke
/// a callback in `registry`, or may not, in which case the request times out.
/// A resource that cannot be loaded at all is a [`TransportError::ScriptError`].
#[async_trait]
pub trait ScriptHost: Send + Sync {
    async fn load(&self, src: Url, registry: ScriptRegistry) -> TransportResult<()>;
}

/// Loads scripts over HTTP and executes the JSONP invocation they contain
#[derive(Clone)]
pub struct HttpScriptHost {
    client: reqwest::Client,
}

impl HttpScriptHost {
    pub fn new() -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("outage-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TransportError::ScriptError(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Host using a preconfigured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScriptHost for HttpScriptHost {
    async fn load(&self, src: Url, registry: ScriptRegistry) -> TransportResult<()> {
        let response = self
            .client
            .get(src)
            .send()
            .await
            .map_err(|e| TransportError::ScriptError(e.to_string()))?
            .error_for_status()
            .map_err(|e| TransportError::ScriptError(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::ScriptError(e.to_string()))?;

        let (callback, payload) = parse_jsonp(&body).ok_or_else(|| {
            warn!("Script body is not a callback invocation ({} bytes)", body.len());
            TransportError::ScriptError("Response is not a callback invocation".to_string())
        })?;

        if !registry.invoke(&callback, payload) {
            debug!("Script invoked unregistered callback {}", callback);
        }
        Ok(())
    }
}
