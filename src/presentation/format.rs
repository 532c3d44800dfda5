//! Console and JSON renderings
//!
//! Console output mirrors the dashboard layout: summary cards, the outage
//! type table with its code legend, then the dzongkhag table.

use super::view::DashboardView;
use crate::catalog::MonthCatalog;
use crate::errors::{AppError, AppResult};
use crate::orchestrator::{Notification, NotificationLevel};
use crate::types::ReportingPeriod;
use serde::Serialize;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    /// Parse output format string; anything unrecognised is console
    pub fn parse(format_str: &str) -> Self {
        match format_str.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
}

/// Format one displayed report
pub fn format_dashboard(view: &DashboardView, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(view),
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str(&format!(
                "\n⚡ Outage Statistics - {}  [{}]\n",
                view.period_label, view.badge
            ));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            output.push_str(&format!("Total Outages:         {}\n", view.overview.total_outages));
            output.push_str(&format!(
                "Total Duration:        {:.1}h\n",
                view.overview.total_duration_hours
            ));
            output.push_str(&format!(
                "Min Restoration Time:  {:.3}h\n",
                view.overview.min_restoration_hours
            ));
            output.push_str(&format!(
                "Max Restoration Time:  {:.3}h\n\n",
                view.overview.max_restoration_hours
            ));

            output.push_str("Outage Types:\n");
            output.push_str(&format!(
                "  {:<4} {:<26} {:>9} {:>12} {:>8} {:>8}\n",
                "Code", "Type", "Outages", "Duration", "Freq %", "Dur %"
            ));
            output.push_str(&format!(
                "  {:-<4} {:-<26} {:->9} {:->12} {:->8} {:->8}\n",
                "", "", "", "", "", ""
            ));
            for row in &view.outage_types {
                output.push_str(&format!(
                    "  {:<4} {:<26} {:>9} {:>11.2}h {:>7.1}% {:>7.1}%\n",
                    row.code,
                    row.name,
                    row.frequency,
                    row.duration_hours,
                    row.frequency_percentage,
                    row.duration_percentage
                ));
            }
            output.push('\n');

            output.push_str("Dzongkhags:\n");
            output.push_str(&format!(
                "  {:<18} {:>9} {:>12} {:>12} {:<8}\n",
                "Dzongkhag", "Outages", "Duration", "Avg", "Status"
            ));
            output.push_str(&format!(
                "  {:-<18} {:->9} {:->12} {:->12} {:-<8}\n",
                "", "", "", "", ""
            ));
            for row in &view.dzongkhags {
                output.push_str(&format!(
                    "  {:<18} {:>9} {:>11.2}h {:>11.2}h {:<8}\n",
                    row.name,
                    row.outage_count,
                    row.total_duration_hours,
                    row.average_duration_hours,
                    row.status.label()
                ));
            }
            output.push('\n');
            output.push_str(&format!(
                "Generated: {}\n",
                view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));

            Ok(output)
        }
    }
}

#[derive(Serialize)]
struct CatalogExport<'a> {
    source: &'static str,
    selected: Option<ReportingPeriod>,
    months: &'a [ReportingPeriod],
}

/// Format the selectable months, marking the default selection
pub fn format_catalog(
    catalog: &MonthCatalog,
    selected: Option<ReportingPeriod>,
    format: OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(&CatalogExport {
            source: catalog.source().badge(),
            selected,
            months: catalog.periods(),
        }),
        OutputFormat::Console => {
            let mut output = String::new();
            output.push_str(&format!(
                "\n📅 Available Months ({}) [{}]\n",
                catalog.len(),
                catalog.source().badge()
            ));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            for period in catalog.periods() {
                let marker = if Some(*period) == selected { "*" } else { " " };
                output.push_str(&format!(
                    "{} {:<8} {}\n",
                    marker,
                    period.to_string(),
                    period.label()
                ));
            }
            Ok(output)
        }
    }
}

/// Single-line rendering of a provenance notification
pub fn format_notification(notification: &Notification) -> String {
    let icon = match notification.level {
        NotificationLevel::Success => "✅",
        NotificationLevel::Warning => "⚠️",
        NotificationLevel::Info => "ℹ️",
    };
    format!("{} {}", icon, notification.message)
}
