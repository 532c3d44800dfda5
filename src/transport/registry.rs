use reqwest::Url;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

/// Callbacks registered by in-flight requests, together with the script
/// resources injected to trigger them.
///
/// Each token owns exactly one callback and one script entry; both are removed
/// together when the request that registered them finishes.
#[derive(Clone, Default)]
pub struct ScriptRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    callbacks: HashMap<String, oneshot::Sender<Value>>,
    scripts: HashMap<String, Url>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a one-shot callback for `token` and record its script resource
    pub fn register(&self, token: &str, src: Url) -> oneshot::Receiver<Value> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.lock();
        inner.callbacks.insert(token.to_string(), tx);
        inner.scripts.insert(token.to_string(), src);
        debug!("Registered callback {}", token);
        rx
    }

    /// Invoke the callback registered under `token`.
    ///
    /// Returns false when no callback is registered, i.e. the request already
    /// finished or never existed. A callback fires at most once.
    pub fn invoke(&self, token: &str, payload: Value) -> bool {
        let sender = self.lock().callbacks.remove(token);
        match sender {
            Some(tx) => tx.send(payload).is_ok(),
            None => {
                debug!("Callback {} is not registered, ignoring invocation", token);
                false
            }
        }
    }

    /// Remove the callback and script resource for `token`; safe to repeat
    pub fn remove(&self, token: &str) {
        let mut inner = self.lock();
        inner.callbacks.remove(token);
        if inner.scripts.remove(token).is_some() {
            debug!("Removed script resource for {}", token);
        }
    }

    pub fn is_registered(&self, token: &str) -> bool {
        self.lock().callbacks.contains_key(token)
    }

    pub fn pending_callbacks(&self) -> usize {
        self.lock().callbacks.len()
    }

    pub fn attached_scripts(&self) -> usize {
        self.lock().scripts.len()
    }

    /// Source URL of the script injected for `token`
    pub fn script_src(&self, token: &str) -> Option<Url> {
        self.lock().scripts.get(token).cloned()
    }
}

/// Removes a request's callback and script resource exactly once.
///
/// Runs on whichever exit path comes first: an explicit [`run`](Self::run) or
/// drop of the guard (including cancellation of the request future).
pub struct ScriptCleanup {
    registry: ScriptRegistry,
    token: Option<String>,
}

impl ScriptCleanup {
    pub fn new(registry: ScriptRegistry, token: String) -> Self {
        Self {
            registry,
            token: Some(token),
        }
    }

    pub fn run(&mut self) {
        if let Some(token) = self.token.take() {
            self.registry.remove(&token);
        }
    }

    pub fn is_done(&self) -> bool {
        self.token.is_none()
    }
}

impl Drop for ScriptCleanup {
    fn drop(&mut self) {
        self.run();
    }
}
