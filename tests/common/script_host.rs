//! Scripted script host
//!
//! Stands in for the browser/HTTP environment: each loaded script either
//! invokes its callback with a canned payload after a delay, loads without
//! invoking anything, or fails to load.

use async_trait::async_trait;
use outage_dashboard::errors::{TransportError, TransportResult};
use outage_dashboard::transport::request::query_param;
use outage_dashboard::transport::{ScriptHost, ScriptRegistry};
use reqwest::Url;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const DISCOVERY_ACTION: &str = "available-months";

/// How a loaded script behaves
#[derive(Debug, Clone)]
pub enum Reply {
    /// Invoke the callback with `payload` once `delay` has elapsed
    Payload { delay: Duration, payload: Value },
    /// Load fine but never invoke the callback
    Silent,
    /// Fail to load the script resource
    LoadError,
}

impl Reply {
    pub fn now(payload: Value) -> Self {
        Reply::Payload {
            delay: Duration::ZERO,
            payload,
        }
    }

    pub fn after(secs: u64, payload: Value) -> Self {
        Reply::Payload {
            delay: Duration::from_secs(secs),
            payload,
        }
    }
}

pub struct ScriptedHost {
    discovery: Mutex<Reply>,
    statistics: Mutex<HashMap<String, Reply>>,
    fallback: Mutex<Reply>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedHost {
    /// Host where every script fails to load
    pub fn new() -> Self {
        Self {
            discovery: Mutex::new(Reply::LoadError),
            statistics: Mutex::new(HashMap::new()),
            fallback: Mutex::new(Reply::LoadError),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_discovery(self, reply: Reply) -> Self {
        *self.discovery.lock().unwrap() = reply;
        self
    }

    pub fn with_month(self, month: &str, reply: Reply) -> Self {
        self.set_month(month, reply);
        self
    }

    /// Reply for statistics requests whose month has no specific reply
    pub fn with_fallback(self, reply: Reply) -> Self {
        *self.fallback.lock().unwrap() = reply;
        self
    }

    pub fn set_month(&self, month: &str, reply: Reply) {
        self.statistics
            .lock()
            .unwrap()
            .insert(month.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// `month` parameter of every statistics request, in order
    pub fn statistics_requests(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter(|url| query_param(url, "action").as_deref() != Some(DISCOVERY_ACTION))
            .map(|url| query_param(url, "month").unwrap_or_default())
            .collect()
    }

    fn reply_for(&self, src: &Url) -> Reply {
        if query_param(src, "action").as_deref() == Some(DISCOVERY_ACTION) {
            return self.discovery.lock().unwrap().clone();
        }
        let month = query_param(src, "month").unwrap_or_default();
        self.statistics
            .lock()
            .unwrap()
            .get(&month)
            .cloned()
            .unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }
}

#[async_trait]
impl ScriptHost for ScriptedHost {
    async fn load(&self, src: Url, registry: ScriptRegistry) -> TransportResult<()> {
        self.requests.lock().unwrap().push(src.clone());
        let token = query_param(&src, "callback").expect("request carries a callback token");

        match self.reply_for(&src) {
            Reply::Payload { delay, payload } => {
                tokio::time::sleep(delay).await;
                registry.invoke(&token, payload);
                Ok(())
            }
            Reply::Silent => Ok(()),
            Reply::LoadError => Err(TransportError::ScriptError("404 Not Found".to_string())),
        }
    }
}
