use crate::types::{DataSource, DistrictStatus, MonthlyReport, ReportingPeriod};
use crate::utils::math::round_to;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the rendering collaborators need for one displayed report.
///
/// Built from a report and its provenance; holds no references back into
/// orchestrator state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub period: ReportingPeriod,
    pub period_label: String,
    pub source: DataSource,
    pub badge: &'static str,
    pub generated_at: DateTime<Utc>,
    pub overview: OverviewView,
    pub outage_types: Vec<CategoryRow>,
    pub dzongkhags: Vec<DistrictRow>,
    pub outage_type_chart: BarChart,
    pub dzongkhag_chart: BarChart,
}

/// Summary cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub total_outages: u64,
    /// One decimal
    pub total_duration_hours: f64,
    /// Three decimals
    pub min_restoration_hours: f64,
    /// Three decimals
    pub max_restoration_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub code: char,
    pub name: &'static str,
    pub frequency: u64,
    pub duration_hours: f64,
    pub frequency_percentage: f64,
    pub duration_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictRow {
    pub name: &'static str,
    pub outage_count: u64,
    pub total_duration_hours: f64,
    pub average_duration_hours: f64,
    pub status: DistrictStatus,
}

/// Dual-axis bar chart series: counts on the left axis, hours on the right
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub durations: Vec<f64>,
}

impl DashboardView {
    pub fn build(report: &MonthlyReport, source: DataSource) -> Self {
        let overview = OverviewView {
            total_outages: report.overview.total_outage_count,
            total_duration_hours: round_to(report.overview.total_outage_duration, 1),
            min_restoration_hours: round_to(report.overview.min_restoration_time, 3),
            max_restoration_hours: round_to(report.overview.max_restoration_time, 3),
        };

        let outage_types: Vec<CategoryRow> = report
            .outage_class
            .iter()
            .map(|(category, stat)| CategoryRow {
                code: category.code(),
                name: category.display_name(),
                frequency: stat.frequency,
                duration_hours: round_to(stat.duration, 2),
                frequency_percentage: round_to(stat.frequency_percentage, 1),
                duration_percentage: round_to(stat.duration_percentage, 1),
            })
            .collect();

        let dzongkhags: Vec<DistrictRow> = report
            .dzongkhag_wise
            .iter()
            .map(|(district, stat)| DistrictRow {
                name: district.name(),
                outage_count: stat.total_outage_count,
                total_duration_hours: round_to(stat.total_outage_duration, 2),
                average_duration_hours: stat.average_duration(),
                status: stat.status(),
            })
            .collect();

        // Category axis carries codes only; the legend maps them to names
        let outage_type_chart = BarChart {
            labels: outage_types.iter().map(|r| r.code.to_string()).collect(),
            counts: outage_types.iter().map(|r| r.frequency).collect(),
            durations: outage_types.iter().map(|r| r.duration_hours).collect(),
        };

        let dzongkhag_chart = BarChart {
            labels: dzongkhags.iter().map(|r| r.name.to_string()).collect(),
            counts: dzongkhags.iter().map(|r| r.outage_count).collect(),
            durations: dzongkhags.iter().map(|r| r.total_duration_hours).collect(),
        };

        Self {
            period: report.month,
            period_label: report.month.label(),
            source,
            badge: source.badge(),
            generated_at: report.timestamp,
            overview,
            outage_types,
            dzongkhags,
            outage_type_chart,
            dzongkhag_chart,
        }
    }
}
