use anyhow::Result;
use outage_dashboard::errors::TransportError;
use outage_dashboard::transport::request::query_param;
use std::sync::Arc;
use std::time::Duration;

use crate::common::{
    months_payload, period, scripted_transport, statistics_payload, Reply, ScriptedHost,
};

/// Tests for the callback transport
///
/// Time is paused so the 10s bound elapses instantly.

#[tokio::test(start_paused = true)]
async fn test_silent_script_times_out_and_cleans_up() {
    let host = Arc::new(ScriptedHost::new().with_month("2024-05", Reply::Silent));
    let transport = scripted_transport(host.clone());

    let started = tokio::time::Instant::now();
    let err = transport.fetch_statistics(&period("2024-05")).await.unwrap_err();

    assert_eq!(
        err,
        TransportError::Timeout {
            timeout_seconds: 10,
            action: "all-statistics".to_string()
        }
    );
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert_eq!(transport.registry().pending_callbacks(), 0);
    assert_eq!(transport.registry().attached_scripts(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_late_callback_after_timeout_is_ignored() {
    let host = Arc::new(
        ScriptedHost::new().with_month("2024-05", Reply::after(11, statistics_payload("2024-05", 9))),
    );
    let transport = scripted_transport(host.clone());

    let err = transport.fetch_statistics(&period("2024-05")).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout { .. }));
    assert_eq!(transport.registry().pending_callbacks(), 0);
}

#[tokio::test]
async fn test_load_failure_is_script_error() {
    let host = Arc::new(ScriptedHost::new());
    let transport = scripted_transport(host);

    let err = transport.fetch_months().await.unwrap_err();
    assert!(matches!(err, TransportError::ScriptError(_)));
    assert_eq!(transport.registry().pending_callbacks(), 0);
    assert_eq!(transport.registry().attached_scripts(), 0);
}

#[tokio::test]
async fn test_failure_flag_is_invalid_payload() {
    let host = Arc::new(ScriptedHost::new().with_month(
        "2024-05",
        Reply::now(serde_json::json!({ "success": false, "error": "No sheet for 2024-05" })),
    ));
    let transport = scripted_transport(host);

    let err = transport.fetch_statistics(&period("2024-05")).await.unwrap_err();
    assert_eq!(err, TransportError::InvalidPayload("No sheet for 2024-05".to_string()));
    assert_eq!(transport.registry().pending_callbacks(), 0);
}

#[tokio::test]
async fn test_success_without_data_is_invalid_payload() {
    let host = Arc::new(
        ScriptedHost::new().with_month("2024-05", Reply::now(serde_json::json!({ "success": true }))),
    );
    let transport = scripted_transport(host);

    let err = transport.fetch_statistics(&period("2024-05")).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidPayload(_)));
}

#[tokio::test]
async fn test_request_carries_action_callback_and_month() -> Result<()> {
    let host = Arc::new(
        ScriptedHost::new()
            .with_discovery(Reply::now(months_payload(&["2024-05"])))
            .with_month("2024-05", Reply::now(statistics_payload("2024-05", 7))),
    );
    let transport = scripted_transport(host.clone());

    let months = transport.fetch_months().await?;
    assert_eq!(months, vec!["2024-05"]);
    let data = transport.fetch_statistics(&period("2024-05")).await?;
    assert_eq!(data["overview"]["totalOutageCount"], 7);

    let requests = host.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(query_param(&requests[0], "action").as_deref(), Some("available-months"));
    assert_eq!(query_param(&requests[0], "month"), None);
    assert_eq!(query_param(&requests[1], "action").as_deref(), Some("all-statistics"));
    assert_eq!(query_param(&requests[1], "month").as_deref(), Some("2024-05"));

    let first = query_param(&requests[0], "callback").unwrap();
    let second = query_param(&requests[1], "callback").unwrap();
    assert_ne!(first, second);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_requests_complete_independently() -> Result<()> {
    let host = Arc::new(
        ScriptedHost::new()
            .with_month("2024-05", Reply::after(3, statistics_payload("2024-05", 55)))
            .with_month("2024-06", Reply::after(1, statistics_payload("2024-06", 66))),
    );
    let transport = scripted_transport(host.clone());

    let may = period("2024-05");
    let june = period("2024-06");
    let (slow, fast) = futures::join!(
        transport.fetch_statistics(&may),
        transport.fetch_statistics(&june)
    );

    assert_eq!(slow?["overview"]["totalOutageCount"], 55);
    assert_eq!(fast?["overview"]["totalOutageCount"], 66);

    let tokens: Vec<String> = host
        .requests()
        .iter()
        .filter_map(|url| query_param(url, "callback"))
        .collect();
    assert_eq!(tokens.len(), 2);
    assert_ne!(tokens[0], tokens[1]);
    assert_eq!(transport.registry().pending_callbacks(), 0);
    assert_eq!(transport.registry().attached_scripts(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_request_cleans_up() {
    let host = Arc::new(ScriptedHost::new().with_month("2024-05", Reply::Silent));
    let transport = scripted_transport(host);

    let may = period("2024-05");
    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        transport.fetch_statistics(&may),
    )
    .await;

    // Outer deadline fired first and dropped the in-flight request
    assert!(outcome.is_err());
    assert_eq!(transport.registry().pending_callbacks(), 0);
    assert_eq!(transport.registry().attached_scripts(), 0);
}
