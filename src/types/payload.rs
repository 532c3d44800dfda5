use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload delivered through the callback invocation.
///
/// `data` is left as raw JSON; the presentation adapter owns turning it into a
/// [`MonthlyReport`](super::MonthlyReport).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
