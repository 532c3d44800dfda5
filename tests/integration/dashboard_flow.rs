use anyhow::Result;
use outage_dashboard::orchestrator::{
    Dashboard, DashboardHandle, DashboardState, Notification, NotificationLevel,
};
use outage_dashboard::types::{DataSource, ReportingPeriod};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::common::{
    clock_in, months_payload, period, scripted_transport, statistics_payload,
    test_dashboard_config, Reply, ScriptedHost,
};

/// Dashboard pinned to June 2024 and served by `host`
fn start_dashboard(host: Arc<ScriptedHost>, initial: Option<ReportingPeriod>) -> DashboardHandle {
    let transport = scripted_transport(host);
    Dashboard::new(transport, Arc::new(clock_in("2024-06")), test_dashboard_config())
        .spawn(initial)
}

fn live_host() -> ScriptedHost {
    ScriptedHost::new().with_discovery(Reply::now(months_payload(&["2024-05", "2024-06"])))
}

async fn wait_displaying(handle: &DashboardHandle, month: &str) -> Result<()> {
    let target = period(month);
    handle
        .wait_for(|s| s.state == DashboardState::Displaying(target))
        .await?;
    Ok(())
}

fn drain_notifications(handle: &mut DashboardHandle) -> Vec<Notification> {
    std::iter::from_fn(|| handle.try_next_notification()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_startup_displays_live_current_month() -> Result<()> {
    let host = Arc::new(live_host().with_month("2024-06", Reply::now(statistics_payload("2024-06", 7))));
    let mut handle = start_dashboard(host.clone(), None);

    wait_displaying(&handle, "2024-06").await?;
    let snapshot = handle.snapshot();

    assert_eq!(snapshot.periods, vec![period("2024-06"), period("2024-05")]);
    assert_eq!(snapshot.catalog_source, Some(DataSource::Live));
    assert_eq!(snapshot.selected, Some(period("2024-06")));

    let displayed = snapshot.displayed.expect("report on display");
    assert_eq!(displayed.source, DataSource::Live);
    assert_eq!(displayed.report.overview.total_outage_count, 7);
    assert!(displayed.report.is_complete());
    assert_eq!(displayed.view().badge, "Live Data");

    let notifications = drain_notifications(&mut handle);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);
    assert_eq!(notifications[0].message, "Data loaded for June 2024");

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_service_uses_fallback_catalog_and_sample_data() -> Result<()> {
    let host = Arc::new(ScriptedHost::new());
    let mut handle = start_dashboard(host, None);

    wait_displaying(&handle, "2024-06").await?;
    let snapshot = handle.snapshot();

    assert_eq!(snapshot.catalog_source, Some(DataSource::Sample));
    assert_eq!(snapshot.periods.len(), 12);
    assert_eq!(snapshot.periods.first(), Some(&period("2024-06")));
    assert_eq!(snapshot.periods.last(), Some(&period("2023-07")));

    let displayed = snapshot.displayed.expect("report on display");
    assert_eq!(displayed.source, DataSource::Sample);
    assert_eq!(displayed.report.month, period("2024-06"));
    assert!(displayed.report.is_complete());
    assert_eq!(displayed.view().badge, "Demo Data");

    let notifications = drain_notifications(&mut handle);
    let levels: Vec<NotificationLevel> = notifications.iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![NotificationLevel::Info, NotificationLevel::Warning]);
    assert_eq!(notifications[1].message, "Sample data for June 2024");
    assert_eq!(notifications[1].source, Some(DataSource::Sample));

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_timeout_falls_back_to_sample() -> Result<()> {
    let host = Arc::new(live_host().with_month("2024-06", Reply::Silent));
    let handle = start_dashboard(host, None);

    let started = tokio::time::Instant::now();
    wait_displaying(&handle, "2024-06").await?;

    assert!(started.elapsed() >= Duration::from_secs(10));
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.catalog_source, Some(DataSource::Live));
    assert_eq!(snapshot.displayed.map(|d| d.source), Some(DataSource::Sample));

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_request_cannot_overwrite_newer_selection() -> Result<()> {
    let host = Arc::new(
        live_host()
            .with_month("2024-05", Reply::after(5, statistics_payload("2024-05", 55)))
            .with_month("2024-06", Reply::after(1, statistics_payload("2024-06", 66))),
    );
    let mut handle = start_dashboard(host.clone(), Some(period("2024-05")));
    handle.select_month(period("2024-06")).await?;

    wait_displaying(&handle, "2024-06").await?;
    // Let the May response arrive
    sleep(Duration::from_secs(10)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.state, DashboardState::Displaying(period("2024-06")));
    let displayed = snapshot.displayed.expect("report on display");
    assert_eq!(displayed.report.overview.total_outage_count, 66);
    let mut requested = host.statistics_requests();
    requested.sort();
    assert_eq!(requested, vec!["2024-05", "2024-06"]);

    let shown: Vec<Option<ReportingPeriod>> =
        drain_notifications(&mut handle).iter().map(|n| n.period).collect();
    assert_eq!(shown, vec![Some(period("2024-06"))]);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fast_earlier_request_is_discarded_after_switch() -> Result<()> {
    let host = Arc::new(
        live_host()
            .with_month("2024-05", Reply::after(1, statistics_payload("2024-05", 55)))
            .with_month("2024-06", Reply::after(5, statistics_payload("2024-06", 66))),
    );
    let mut handle = start_dashboard(host, Some(period("2024-05")));
    handle.select_month(period("2024-06")).await?;

    wait_displaying(&handle, "2024-06").await?;
    sleep(Duration::from_secs(10)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.displayed_period(), Some(period("2024-06")));
    assert_eq!(
        snapshot.displayed.map(|d| d.report.overview.total_outage_count),
        Some(66)
    );

    let shown: Vec<Option<ReportingPeriod>> =
        drain_notifications(&mut handle).iter().map(|n| n.period).collect();
    assert_eq!(shown, vec![Some(period("2024-06"))]);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_while_current_month_displayed() -> Result<()> {
    let host = Arc::new(live_host().with_fallback(Reply::now(statistics_payload("2024-06", 3))));
    let handle = start_dashboard(host.clone(), None);

    wait_displaying(&handle, "2024-06").await?;
    sleep(Duration::from_secs(250)).await;

    assert_eq!(host.statistics_requests(), vec!["2024-06"; 3]);
    assert_eq!(
        handle.snapshot().state,
        DashboardState::Displaying(period("2024-06"))
    );

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_no_auto_refresh_for_past_month() -> Result<()> {
    let host = Arc::new(live_host().with_fallback(Reply::now(statistics_payload("2024-05", 3))));
    let handle = start_dashboard(host.clone(), Some(period("2024-05")));

    wait_displaying(&handle, "2024-05").await?;
    sleep(Duration::from_secs(250)).await;

    assert_eq!(host.statistics_requests(), vec!["2024-05"]);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_month_outside_catalog_is_ignored() -> Result<()> {
    let host = Arc::new(live_host().with_fallback(Reply::now(statistics_payload("2024-06", 3))));
    let mut handle = start_dashboard(host.clone(), None);

    wait_displaying(&handle, "2024-06").await?;
    handle.select_month(period("2019-01")).await?;
    sleep(Duration::from_secs(1)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.selected, Some(period("2024-06")));
    assert_eq!(snapshot.state, DashboardState::Displaying(period("2024-06")));
    assert_eq!(host.statistics_requests(), vec!["2024-06"]);
    assert_eq!(drain_notifications(&mut handle).len(), 1);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reselecting_same_month_is_ignored() -> Result<()> {
    let host = Arc::new(live_host().with_fallback(Reply::now(statistics_payload("2024-06", 3))));
    let handle = start_dashboard(host.clone(), None);

    wait_displaying(&handle, "2024-06").await?;
    handle.select_month(period("2024-06")).await?;
    sleep(Duration::from_secs(1)).await;
    assert_eq!(host.statistics_requests().len(), 1);

    handle.refresh().await?;
    sleep(Duration::from_secs(1)).await;
    assert_eq!(host.statistics_requests().len(), 2);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unknown_initial_month_uses_default_selection() -> Result<()> {
    let host = Arc::new(live_host().with_fallback(Reply::now(statistics_payload("2024-06", 3))));
    let handle = start_dashboard(host.clone(), Some(period("2019-01")));

    wait_displaying(&handle, "2024-06").await?;
    assert_eq!(host.statistics_requests(), vec!["2024-06"]);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_reaches_stopped() -> Result<()> {
    let host = Arc::new(live_host().with_fallback(Reply::now(statistics_payload("2024-06", 3))));
    let handle = start_dashboard(host, None);
    let snapshots = handle.subscribe();

    wait_displaying(&handle, "2024-06").await?;
    handle.shutdown().await?;

    assert_eq!(snapshots.borrow().state, DashboardState::Stopped);
    Ok(())
}
