//! Sample data generator
//!
//! Produces a plausible synthetic [`MonthlyReport`] whenever the reporting
//! service cannot supply one. Shape is fixed (all 20 districts, all 5
//! categories); values are random.

use crate::types::{
    District, DistrictStat, MonthlyReport, OutageCategory, OutageClassStat, OverviewSummary,
    ReportingPeriod,
};
use crate::utils::math::round2;
use chrono::Utc;
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Outages drawn per district
pub const OUTAGE_COUNT_RANGE: RangeInclusive<u64> = 3..=15;

/// Hours of outage drawn per district
pub const OUTAGE_DURATION_RANGE: RangeInclusive<f64> = 0.5..=8.5;

/// Fastest restoration reported for sample data (hours)
pub const SAMPLE_MIN_RESTORATION_HOURS: f64 = 0.017;

/// Slowest restoration reported for sample data (hours)
pub const SAMPLE_MAX_RESTORATION_HOURS: f64 = 4.25;

/// How one category's figures are carved out of the district totals
#[derive(Debug, Clone, Copy)]
pub struct CategoryShare {
    pub category: OutageCategory,
    pub frequency_fraction: f64,
    pub duration_fraction: f64,
    /// Reported as-is, not recomputed from the truncated frequency
    pub frequency_percentage: f64,
    /// Reported as-is, not recomputed from the rounded duration
    pub duration_percentage: f64,
}

pub const CATEGORY_SHARES: [CategoryShare; 5] = [
    CategoryShare {
        category: OutageCategory::Momentary,
        frequency_fraction: 0.40,
        duration_fraction: 0.05,
        frequency_percentage: 40.0,
        duration_percentage: 5.0,
    },
    CategoryShare {
        category: OutageCategory::SustainedFault,
        frequency_fraction: 0.25,
        duration_fraction: 0.25,
        frequency_percentage: 25.0,
        duration_percentage: 25.0,
    },
    CategoryShare {
        category: OutageCategory::GridFailure,
        frequency_fraction: 0.05,
        duration_fraction: 0.15,
        frequency_percentage: 5.0,
        duration_percentage: 15.0,
    },
    CategoryShare {
        category: OutageCategory::PlannedShutdown,
        frequency_fraction: 0.10,
        duration_fraction: 0.35,
        frequency_percentage: 10.0,
        duration_percentage: 35.0,
    },
    CategoryShare {
        category: OutageCategory::EmergencyShutdown,
        frequency_fraction: 0.20,
        duration_fraction: 0.20,
        frequency_percentage: 20.0,
        duration_percentage: 20.0,
    },
];

/// Generate a sample report for `period` using the thread-local RNG
pub fn generate(period: ReportingPeriod) -> MonthlyReport {
    generate_with_rng(period, &mut rand::thread_rng())
}

/// Generate a sample report for `period` from an explicit random source
pub fn generate_with_rng<R: Rng + ?Sized>(period: ReportingPeriod, rng: &mut R) -> MonthlyReport {
    let mut dzongkhag_wise = BTreeMap::new();
    let mut total_count: u64 = 0;
    let mut total_duration: f64 = 0.0;

    for district in District::ALL {
        let count = rng.gen_range(OUTAGE_COUNT_RANGE);
        let duration = round2(rng.gen_range(OUTAGE_DURATION_RANGE));

        dzongkhag_wise.insert(
            district,
            DistrictStat {
                total_outage_count: count,
                total_outage_duration: duration,
            },
        );
        total_count += count;
        total_duration += duration;
    }

    let outage_class = CATEGORY_SHARES
        .iter()
        .map(|share| {
            let stat = OutageClassStat {
                frequency: (total_count as f64 * share.frequency_fraction).floor() as u64,
                duration: round2(total_duration * share.duration_fraction),
                frequency_percentage: share.frequency_percentage,
                duration_percentage: share.duration_percentage,
            };
            (share.category, stat)
        })
        .collect();

    MonthlyReport {
        overview: OverviewSummary {
            total_outage_count: total_count,
            total_outage_duration: round2(total_duration),
            min_restoration_time: SAMPLE_MIN_RESTORATION_HOURS,
            max_restoration_time: SAMPLE_MAX_RESTORATION_HOURS,
        },
        outage_class,
        dzongkhag_wise,
        month: period,
        timestamp: Utc::now(),
    }
}
