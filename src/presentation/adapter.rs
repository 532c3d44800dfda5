use crate::types::{
    District, DistrictStat, MonthlyReport, OutageCategory, OutageClassStat, OverviewSummary,
    ReportingPeriod,
};
use crate::utils::math::non_negative;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

/// Normalise a live payload into the fixed report schema.
///
/// Accepts either the response envelope (`{ data: {...} }`) or the report
/// object itself. Missing, null or non-numeric figures become zero; every
/// category and district is present in the result. Keys that match no known
/// category or district are dropped. The result is always labelled with the
/// requested `period`.
pub fn normalize(payload: &Value, period: ReportingPeriod) -> MonthlyReport {
    let data = match payload.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    };

    let mut report = MonthlyReport::empty(period);

    if let Some(overview) = data.get("overview") {
        report.overview = OverviewSummary {
            total_outage_count: count(overview.get("totalOutageCount")),
            total_outage_duration: number(overview.get("totalOutageDuration")),
            min_restoration_time: number(overview.get("minRestorationTime")),
            max_restoration_time: number(overview.get("maxRestorationTime")),
        };
    }

    if let Some(classes) = data.get("outageClass").and_then(Value::as_object) {
        for (name, stats) in classes {
            match OutageCategory::from_display_name(name) {
                Some(category) => {
                    report.outage_class.insert(
                        category,
                        OutageClassStat {
                            frequency: count(stats.get("frequency")),
                            duration: number(stats.get("duration")),
                            frequency_percentage: number(stats.get("frequencyPercentage")),
                            duration_percentage: number(stats.get("durationPercentage")),
                        },
                    );
                }
                None => warn!("Dropping unknown outage category {:?}", name),
            }
        }
    }

    if let Some(districts) = data.get("dzongkhagWise").and_then(Value::as_object) {
        for (name, stats) in districts {
            match District::from_name(name) {
                Some(district) => {
                    report.dzongkhag_wise.insert(
                        district,
                        DistrictStat {
                            total_outage_count: count(stats.get("totalOutageCount")),
                            total_outage_duration: number(stats.get("totalOutageDuration")),
                        },
                    );
                }
                None => warn!("Dropping unknown dzongkhag {:?}", name),
            }
        }
    }

    if let Some(timestamp) = data
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    {
        report.timestamp = timestamp.with_timezone(&Utc);
    }

    if let Some(month) = data.get("month").and_then(Value::as_str) {
        if month != period.to_string() {
            debug!("Payload labelled {} shown as {}", month, period);
        }
    }

    report
}

/// Fill any missing category or district with zero-valued statistics
pub fn ensure_complete(mut report: MonthlyReport) -> MonthlyReport {
    for category in OutageCategory::ALL {
        report.outage_class.entry(category).or_default();
    }
    for district in District::ALL {
        report.dzongkhag_wise.entry(district).or_default();
    }
    report
}

/// Numeric figure, tolerating numeric strings; anything else is zero
fn number(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    non_negative(raw)
}

fn count(value: Option<&Value>) -> u64 {
    number(value).round() as u64
}
