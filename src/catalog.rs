//! Month catalog
//!
//! Discovers which reporting periods can be selected, newest first, and picks
//! the default selection. When discovery fails or returns nothing usable the
//! catalog is generated as a rolling window ending at the current month.

use crate::errors::CatalogError;
use crate::transport::Transport;
use crate::types::{DataSource, ReportingPeriod};
use crate::utils::time::trailing_periods;
use serde::Serialize;
use tracing::{info, warn};

/// Selectable reporting periods, strictly descending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCatalog {
    periods: Vec<ReportingPeriod>,
    source: DataSource,
}

impl MonthCatalog {
    /// Build a catalog from the service's month list.
    ///
    /// Entries that are not `YYYY-MM` values are skipped; duplicates collapse.
    pub fn from_months<S: AsRef<str>>(months: &[S]) -> Result<Self, CatalogError> {
        let mut periods: Vec<ReportingPeriod> = months
            .iter()
            .filter_map(|m| match m.as_ref().parse() {
                Ok(period) => Some(period),
                Err(_) => {
                    warn!("Ignoring unrecognised month value {:?}", m.as_ref());
                    None
                }
            })
            .collect();

        if periods.is_empty() {
            return Err(CatalogError::NoData);
        }

        periods.sort_unstable_by(|a, b| b.cmp(a));
        periods.dedup();

        Ok(Self {
            periods,
            source: DataSource::Live,
        })
    }

    /// Rolling window of `count` months ending at `current`
    pub fn fallback(current: ReportingPeriod, count: usize) -> Self {
        Self {
            periods: trailing_periods(current, count.max(1)),
            source: DataSource::Sample,
        }
    }

    pub fn periods(&self) -> &[ReportingPeriod] {
        &self.periods
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn contains(&self, period: &ReportingPeriod) -> bool {
        self.periods.contains(period)
    }

    pub fn newest(&self) -> Option<ReportingPeriod> {
        self.periods.first().copied()
    }

    /// Current month when the catalog has it, otherwise the newest period
    pub fn default_selection(&self, current: ReportingPeriod) -> Option<ReportingPeriod> {
        if self.contains(&current) {
            Some(current)
        } else {
            self.newest()
        }
    }
}

/// Ask the service for its months; fails with `NoData` on an empty list
pub async fn discover_months(transport: &Transport) -> Result<MonthCatalog, CatalogError> {
    let months = transport.fetch_months().await?;
    MonthCatalog::from_months(&months)
}

/// Discover months, falling back to a generated window on any failure
pub async fn load_catalog(
    transport: &Transport,
    current: ReportingPeriod,
    fallback_months: usize,
) -> MonthCatalog {
    match discover_months(transport).await {
        Ok(catalog) => {
            info!("Available months loaded: {} months", catalog.len());
            catalog
        }
        Err(e) => {
            warn!("Error loading months ({}), generating sample months", e);
            MonthCatalog::fallback(current, fallback_months)
        }
    }
}
