use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates callback identifiers that stay unique under rapid repeated calls.
///
/// Tokens combine the wall-clock millisecond with a monotonic sequence number,
/// so two requests issued within the same millisecond still differ.
#[derive(Debug, Default)]
pub struct CallbackTokens {
    sequence: AtomicU64,
}

impl CallbackTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next token, a valid script identifier of the form `callback_<millis>_<seq>`
    pub fn next_token(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!("callback_{}_{}", millis, seq)
    }
}
