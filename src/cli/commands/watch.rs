use super::{http_transport, parse_month, ServiceArgs};
use crate::errors::{AppError, AppResult};
use crate::orchestrator::{Dashboard, DashboardState};
use crate::presentation::{format_dashboard, format_notification, OutputFormat};
use crate::types::ReportingPeriod;
use crate::utils::time::SystemClock;
use clap::Args;
use std::sync::Arc;
use tracing::info;

/// Run the dashboard until interrupted, re-rendering on every display
#[derive(Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Month to show first (YYYY-MM); must be one of the available months
    #[arg(long, value_parser = parse_month)]
    pub month: Option<ReportingPeriod>,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl WatchCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = self.service.app_config()?;
        let format = OutputFormat::parse(&self.format);
        let transport = Arc::new(http_transport(app_config.service)?);

        let dashboard = Dashboard::new(transport, Arc::new(SystemClock), app_config.dashboard);
        let mut handle = dashboard.spawn(self.month);
        let mut snapshots = handle.subscribe();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Interrupted, shutting down");
                    break;
                }
                changed = snapshots.changed() => {
                    changed.map_err(|_| AppError::DashboardStopped("snapshot channel closed".to_string()))?;
                    let snapshot = snapshots.borrow_and_update().clone();
                    if let (DashboardState::Displaying(_), Some(displayed)) = (snapshot.state, &snapshot.displayed) {
                        print!("{}", format_dashboard(&displayed.view(), format)?);
                    }
                }
                Some(notification) = handle.next_notification() => {
                    eprintln!("{}", format_notification(&notification));
                }
            }
        }

        handle.shutdown().await
    }
}
