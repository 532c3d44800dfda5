use super::{http_transport, parse_month, ServiceArgs};
use crate::errors::AppResult;
use crate::orchestrator::{DisplayedReport, Notification};
use crate::presentation::{
    ensure_complete, format_dashboard, format_notification, normalize, OutputFormat,
};
use crate::sample;
use crate::types::{DataSource, ReportingPeriod};
use crate::utils::time::{Clock, SystemClock};
use clap::Args;
use std::time::Duration;
use tracing::warn;

/// Show statistics for one month, falling back to sample data
#[derive(Args)]
pub struct ReportCommand {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Month to show (YYYY-MM, defaults to the current month)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<ReportingPeriod>,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl ReportCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = self.service.app_config()?;
        let period = self.month.unwrap_or_else(|| SystemClock.current_period());
        let transport = http_transport(app_config.service)?;

        let displayed = match transport.fetch_statistics(&period).await {
            Ok(data) => DisplayedReport {
                report: normalize(&data, period),
                source: DataSource::Live,
            },
            Err(e) => {
                warn!("Live data loading failed for {}: {}", period, e);
                DisplayedReport {
                    report: ensure_complete(sample::generate(period)),
                    source: DataSource::Sample,
                }
            }
        };

        let notification = Notification::for_report(
            period,
            displayed.source,
            Duration::from_secs(app_config.dashboard.notification_ttl_seconds),
        );
        eprintln!("{}", format_notification(&notification));
        print!(
            "{}",
            format_dashboard(&displayed.view(), OutputFormat::parse(&self.format))?
        );
        Ok(())
    }
}

/// Show generated sample statistics for one month
#[derive(Args)]
pub struct SampleCommand {
    /// Month to label the sample with (YYYY-MM, defaults to the current month)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<ReportingPeriod>,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl SampleCommand {
    pub fn run(&self) -> AppResult<()> {
        let period = self.month.unwrap_or_else(|| SystemClock.current_period());
        let displayed = DisplayedReport {
            report: sample::generate(period),
            source: DataSource::Sample,
        };
        print!(
            "{}",
            format_dashboard(&displayed.view(), OutputFormat::parse(&self.format))?
        );
        Ok(())
    }
}
