//! Acquisition orchestrator
//!
//! Sequences month discovery, month selection, per-month fetches and the
//! fallback to sample data. Runs as a single task that owns the selected
//! period and the displayed report; callers talk to it through a
//! [`DashboardHandle`].

pub mod dashboard;
pub mod state;

pub use dashboard::{Dashboard, DashboardCommand, DashboardHandle};
pub use state::{
    DashboardSnapshot, DashboardState, DisplayedReport, Notification, NotificationLevel,
};
