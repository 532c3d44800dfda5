//! Time utilities for reporting periods
//!
//! The current calendar month drives both the default month selection and the
//! auto-refresh policy, so it is read through a [`Clock`] that tests can pin.

use crate::types::ReportingPeriod;
use chrono::{Local, NaiveDate};

/// Source of "today" for month selection
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Calendar month containing today
    fn current_period(&self) -> ReportingPeriod {
        ReportingPeriod::from_date(self.today())
    }
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The `count` months ending at `end`, newest first.
///
/// Strictly descending, no gaps, no duplicates.
///
/// # Examples
/// ```
/// use outage_dashboard::types::ReportingPeriod;
/// use outage_dashboard::utils::time::trailing_periods;
///
/// let end: ReportingPeriod = "2024-02".parse().unwrap();
/// let months: Vec<String> = trailing_periods(end, 3).iter().map(|p| p.to_string()).collect();
/// assert_eq!(months, vec!["2024-02", "2024-01", "2023-12"]);
/// ```
pub fn trailing_periods(end: ReportingPeriod, count: usize) -> Vec<ReportingPeriod> {
    let mut periods = Vec::with_capacity(count);
    let mut current = end;
    for _ in 0..count {
        periods.push(current);
        current = current.previous();
    }
    periods
}
