use super::{District, DistrictStatus, OutageCategory, ReportingPeriod};
use crate::utils::math::safe_average;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Statistics for a single outage category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageClassStat {
    pub frequency: u64,
    /// Hours
    pub duration: f64,
    pub frequency_percentage: f64,
    pub duration_percentage: f64,
}

/// Statistics for a single dzongkhag
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStat {
    pub total_outage_count: u64,
    /// Hours
    pub total_outage_duration: f64,
}

impl DistrictStat {
    /// Mean outage duration in hours (2 decimals), zero when no outages were recorded
    pub fn average_duration(&self) -> f64 {
        safe_average(self.total_outage_duration, self.total_outage_count)
    }

    pub fn status(&self) -> DistrictStatus {
        DistrictStatus::from_duration(self.total_outage_duration)
    }
}

/// Aggregate view over the reporting period.
///
/// Not reconciled against the per-category or per-district figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    pub total_outage_count: u64,
    pub total_outage_duration: f64,
    pub min_restoration_time: f64,
    pub max_restoration_time: f64,
}

/// Root aggregate for one reporting period.
///
/// Built fresh per fetch or per generation call and replaced wholesale on the
/// next month change or refresh; never mutated in place once displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub overview: OverviewSummary,
    pub outage_class: BTreeMap<OutageCategory, OutageClassStat>,
    pub dzongkhag_wise: BTreeMap<District, DistrictStat>,
    pub month: ReportingPeriod,
    pub timestamp: DateTime<Utc>,
}

impl MonthlyReport {
    /// Report with every category and district present and zero-valued
    pub fn empty(month: ReportingPeriod) -> Self {
        Self {
            overview: OverviewSummary::default(),
            outage_class: OutageCategory::ALL
                .into_iter()
                .map(|c| (c, OutageClassStat::default()))
                .collect(),
            dzongkhag_wise: District::ALL
                .into_iter()
                .map(|d| (d, DistrictStat::default()))
                .collect(),
            month,
            timestamp: Utc::now(),
        }
    }

    /// True when every category and every district has an entry
    pub fn is_complete(&self) -> bool {
        OutageCategory::ALL
            .iter()
            .all(|c| self.outage_class.contains_key(c))
            && District::ALL
                .iter()
                .all(|d| self.dzongkhag_wise.contains_key(d))
    }

    pub fn district_count_total(&self) -> u64 {
        self.dzongkhag_wise
            .values()
            .map(|s| s.total_outage_count)
            .sum()
    }

    pub fn district_duration_total(&self) -> f64 {
        self.dzongkhag_wise
            .values()
            .map(|s| s.total_outage_duration)
            .sum()
    }
}

/// Provenance of a displayed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fetched from the reporting service
    Live,
    /// Generated locally after a failure
    Sample,
}

impl DataSource {
    pub fn badge(&self) -> &'static str {
        match self {
            DataSource::Live => "Live Data",
            DataSource::Sample => "Demo Data",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => f.write_str("live"),
            DataSource::Sample => f.write_str("sample"),
        }
    }
}
