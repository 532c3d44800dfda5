use crate::catalog::load_catalog;
use crate::config::DashboardConfig;
use crate::errors::{AppError, AppResult, TransportResult};
use crate::orchestrator::state::{
    DashboardSnapshot, DashboardState, DisplayedReport, Notification,
};
use crate::presentation::{ensure_complete, normalize};
use crate::sample;
use crate::transport::Transport;
use crate::types::{DataSource, ReportingPeriod};
use crate::utils::time::Clock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// External triggers accepted by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    SelectMonth(ReportingPeriod),
    Refresh,
    Shutdown,
}

/// Outcome of one spawned fetch, tagged with the request that started it
#[derive(Debug)]
struct FetchCompletion {
    request_id: u64,
    period: ReportingPeriod,
    outcome: TransportResult<Value>,
}

/// Orchestrator configuration and collaborators, consumed by [`spawn`](Self::spawn)
pub struct Dashboard {
    transport: Arc<Transport>,
    clock: Arc<dyn Clock>,
    settings: DashboardConfig,
}

impl Dashboard {
    pub fn new(transport: Arc<Transport>, clock: Arc<dyn Clock>, settings: DashboardConfig) -> Self {
        Self {
            transport,
            clock,
            settings,
        }
    }

    /// Start the orchestrator task.
    ///
    /// `initial` replaces the default selection when the catalog contains it.
    pub fn spawn(self, initial: Option<ReportingPeriod>) -> DashboardHandle {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(DashboardSnapshot::default());
        let (notification_tx, notification_rx) = mpsc::unbounded_channel();

        let worker = DashboardWorker {
            transport: self.transport,
            clock: self.clock,
            settings: self.settings,
            snapshot: DashboardSnapshot::default(),
            snapshots: snapshot_tx,
            notifications: notification_tx,
            completions: completion_tx,
            next_request_id: 0,
            in_flight: None,
        };
        let task = tokio::spawn(worker.run(command_rx, completion_rx, initial));

        DashboardHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            notifications: notification_rx,
            task,
        }
    }
}

/// Caller side of a running orchestrator
pub struct DashboardHandle {
    commands: mpsc::Sender<DashboardCommand>,
    snapshots: watch::Receiver<DashboardSnapshot>,
    notifications: mpsc::UnboundedReceiver<Notification>,
    task: JoinHandle<()>,
}

impl DashboardHandle {
    async fn send(&self, command: DashboardCommand) -> AppResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::DashboardStopped("command channel closed".to_string()))
    }

    /// Switch the selected month; ignored when it is already selected
    pub async fn select_month(&self, period: ReportingPeriod) -> AppResult<()> {
        self.send(DashboardCommand::SelectMonth(period)).await
    }

    /// Re-fetch the selected month
    pub async fn refresh(&self) -> AppResult<()> {
        self.send(DashboardCommand::Refresh).await
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`
    pub async fn wait_for<F>(&self, mut predicate: F) -> AppResult<DashboardSnapshot>
    where
        F: FnMut(&DashboardSnapshot) -> bool,
    {
        let mut rx = self.snapshots.clone();
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&*snapshot) {
                    return Ok(snapshot.clone());
                }
            }
            rx.changed()
                .await
                .map_err(|_| AppError::DashboardStopped("snapshot channel closed".to_string()))?;
        }
    }

    pub async fn next_notification(&mut self) -> Option<Notification> {
        self.notifications.recv().await
    }

    pub fn try_next_notification(&mut self) -> Option<Notification> {
        self.notifications.try_recv().ok()
    }

    /// Stop the orchestrator and wait for its task to finish
    pub async fn shutdown(self) -> AppResult<()> {
        // A closed channel means the task is already gone
        let _ = self.commands.send(DashboardCommand::Shutdown).await;
        self.task
            .await
            .map_err(|e| AppError::DashboardStopped(format!("dashboard task failed: {}", e)))
    }
}

/// Task owning all orchestrator state
struct DashboardWorker {
    transport: Arc<Transport>,
    clock: Arc<dyn Clock>,
    settings: DashboardConfig,
    snapshot: DashboardSnapshot,
    snapshots: watch::Sender<DashboardSnapshot>,
    notifications: mpsc::UnboundedSender<Notification>,
    completions: mpsc::UnboundedSender<FetchCompletion>,
    next_request_id: u64,
    /// Only the completion carrying this id may update the display
    in_flight: Option<u64>,
}

impl DashboardWorker {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<DashboardCommand>,
        mut completions: mpsc::UnboundedReceiver<FetchCompletion>,
        initial: Option<ReportingPeriod>,
    ) {
        self.start(initial).await;

        let every = Duration::from_secs(self.settings.refresh_interval_seconds);
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(DashboardCommand::SelectMonth(period)) => self.select_month(period),
                    Some(DashboardCommand::Refresh) => self.refresh(),
                    Some(DashboardCommand::Shutdown) | None => break,
                },
                Some(completion) = completions.recv() => self.complete(completion),
                _ = ticker.tick() => self.auto_refresh(),
            }
        }

        self.transition(DashboardState::Stopped);
        info!("Dashboard stopped");
    }

    async fn start(&mut self, initial: Option<ReportingPeriod>) {
        info!("Initializing dashboard");
        self.transition(DashboardState::DiscoveringMonths);

        let current = self.clock.current_period();
        let catalog =
            load_catalog(&self.transport, current, self.settings.fallback_months).await;

        if catalog.source() == DataSource::Sample {
            self.notify(Notification::info(
                format!("Month list unavailable, showing the last {} months", catalog.len()),
                self.notification_ttl(),
            ));
        }

        let selected = match initial {
            Some(period) if catalog.contains(&period) => Some(period),
            Some(period) => {
                warn!("Requested month {} is not available, using default", period);
                catalog.default_selection(current)
            }
            None => catalog.default_selection(current),
        };

        // Fallback catalogs always hold at least one month
        let period = selected.unwrap_or(current);

        self.snapshot.periods = catalog.periods().to_vec();
        self.snapshot.catalog_source = Some(catalog.source());
        self.snapshot.selected = Some(period);
        self.transition(DashboardState::Ready);

        self.begin_fetch(period);
    }

    fn select_month(&mut self, period: ReportingPeriod) {
        if self.snapshot.selected == Some(period) {
            debug!("Month {} already selected", period);
            return;
        }
        if !self.snapshot.periods.contains(&period) {
            warn!("Month {} is not in the catalog, ignoring selection", period);
            return;
        }
        info!("Switching to month {}", period);
        self.snapshot.selected = Some(period);
        self.begin_fetch(period);
    }

    fn refresh(&mut self) {
        if let Some(period) = self.snapshot.selected {
            self.begin_fetch(period);
        }
    }

    /// Periodic tick: re-fetch only while the current month is on display
    fn auto_refresh(&mut self) {
        let current = self.clock.current_period();
        if self.snapshot.state == DashboardState::Displaying(current) {
            info!("Auto-refreshing data for {}", current);
            self.begin_fetch(current);
        } else {
            debug!("Auto-refresh skipped ({})", self.snapshot.state);
        }
    }

    fn begin_fetch(&mut self, period: ReportingPeriod) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(request_id);
        self.transition(DashboardState::FetchingMonth(period));
        info!("Loading data for month {}", period);

        let transport = Arc::clone(&self.transport);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = transport.fetch_statistics(&period).await;
            // Worker gone means the dashboard shut down
            let _ = completions.send(FetchCompletion {
                request_id,
                period,
                outcome,
            });
        });
    }

    fn complete(&mut self, completion: FetchCompletion) {
        if self.in_flight != Some(completion.request_id)
            || self.snapshot.selected != Some(completion.period)
        {
            debug!(
                "Discarding stale completion for {} (request {})",
                completion.period, completion.request_id
            );
            return;
        }
        self.in_flight = None;

        let period = completion.period;
        let displayed = match completion.outcome {
            Ok(data) => {
                info!("Live data loaded successfully for {}", period);
                DisplayedReport {
                    report: normalize(&data, period),
                    source: DataSource::Live,
                }
            }
            Err(e) => {
                warn!("Live data loading failed for {}: {}, using sample data", period, e);
                DisplayedReport {
                    report: ensure_complete(sample::generate(period)),
                    source: DataSource::Sample,
                }
            }
        };

        let notification = Notification::for_report(period, displayed.source, self.notification_ttl());
        self.snapshot.displayed = Some(displayed);
        self.snapshot.notification = Some(notification.clone());
        self.transition(DashboardState::Displaying(period));
        // Nobody listening is fine
        let _ = self.notifications.send(notification);
    }

    fn notify(&mut self, notification: Notification) {
        self.snapshot.notification = Some(notification.clone());
        let _ = self.notifications.send(notification);
    }

    fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.settings.notification_ttl_seconds)
    }

    fn transition(&mut self, state: DashboardState) {
        debug!("Dashboard state: {} -> {}", self.snapshot.state, state);
        self.snapshot.state = state;
        self.snapshots.send_replace(self.snapshot.clone());
    }
}
