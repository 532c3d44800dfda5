use crate::presentation::DashboardView;
use crate::types::{DataSource, MonthlyReport, ReportingPeriod};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Orchestrator lifecycle.
///
/// `Idle -> DiscoveringMonths -> Ready -> FetchingMonth -> Displaying`, then
/// alternating between the last two until `Stopped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardState {
    #[default]
    Idle,
    DiscoveringMonths,
    Ready,
    FetchingMonth(ReportingPeriod),
    Displaying(ReportingPeriod),
    Stopped,
}

impl fmt::Display for DashboardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardState::Idle => write!(f, "idle"),
            DashboardState::DiscoveringMonths => write!(f, "discovering months"),
            DashboardState::Ready => write!(f, "ready"),
            DashboardState::FetchingMonth(p) => write!(f, "fetching {}", p),
            DashboardState::Displaying(p) => write!(f, "displaying {}", p),
            DashboardState::Stopped => write!(f, "stopped"),
        }
    }
}

/// The report currently on screen and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedReport {
    pub report: MonthlyReport,
    pub source: DataSource,
}

impl DisplayedReport {
    pub fn period(&self) -> ReportingPeriod {
        self.report.month
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(&self.report, self.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Info,
}

/// Transient user-visible notice; a newer one replaces the previous one
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub source: Option<DataSource>,
    pub period: Option<ReportingPeriod>,
    pub ttl: Duration,
}

impl Notification {
    /// Provenance notice emitted whenever a report is displayed
    pub fn for_report(period: ReportingPeriod, source: DataSource, ttl: Duration) -> Self {
        let (level, message) = match source {
            DataSource::Live => (
                NotificationLevel::Success,
                format!("Data loaded for {}", period.label()),
            ),
            DataSource::Sample => (
                NotificationLevel::Warning,
                format!("Sample data for {}", period.label()),
            ),
        };
        Self {
            level,
            message,
            source: Some(source),
            period: Some(period),
            ttl,
        }
    }

    pub fn info(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            source: None,
            period: None,
            ttl,
        }
    }
}

/// Point-in-time copy of orchestrator state published to observers
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub state: DashboardState,
    pub periods: Vec<ReportingPeriod>,
    pub catalog_source: Option<DataSource>,
    pub selected: Option<ReportingPeriod>,
    pub displayed: Option<DisplayedReport>,
    pub notification: Option<Notification>,
}

impl DashboardSnapshot {
    pub fn displayed_period(&self) -> Option<ReportingPeriod> {
        self.displayed.as_ref().map(DisplayedReport::period)
    }
}
