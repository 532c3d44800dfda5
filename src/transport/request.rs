use crate::errors::{TransportError, TransportResult};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use serde_json::Value;

lazy_static! {
    /// `name(<json>)` with an optional `/**/` prefix and trailing semicolon
    static ref JSONP_BODY: Regex =
        Regex::new(r"(?s)^\s*(?:/\*\*/\s*)?([A-Za-z_$][A-Za-z0-9_$]*)\s*\((.*)\)\s*;?\s*$")
            .expect("JSONP pattern is valid");
}

/// Build the script URL for one request.
///
/// Appends `action` and `callback`, then every caller parameter whose value is
/// non-empty, in the order given.
///
/// # Example
/// ```
/// use outage_dashboard::transport::build_request_url;
///
/// let url = build_request_url(
///     "https://service.test/exec",
///     "all-statistics",
///     "callback_1",
///     &[("month", "2024-03"), ("district", "")],
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://service.test/exec?action=all-statistics&callback=callback_1&month=2024-03"
/// );
/// ```
pub fn build_request_url(
    endpoint: &str,
    action: &str,
    token: &str,
    params: &[(&str, &str)],
) -> TransportResult<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        TransportError::ScriptError(format!("Invalid service endpoint {}: {}", endpoint, e))
    })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("action", action);
        query.append_pair("callback", token);
        for (key, value) in params {
            if key.is_empty() || value.trim().is_empty() {
                continue;
            }
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Split a JSONP script body into the invoked callback name and its argument
pub fn parse_jsonp(body: &str) -> Option<(String, Value)> {
    let captures = JSONP_BODY.captures(body)?;
    let name = captures.get(1)?.as_str().to_string();
    let argument = captures.get(2)?.as_str().trim();
    let payload = serde_json::from_str(argument).ok()?;
    Some((name, payload))
}

/// Value of query parameter `key` in `url`
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
