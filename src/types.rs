//! Dashboard type system
//!
//! - `period`: ReportingPeriod (`YYYY-MM` month identifier)
//! - `category`: the five fixed outage categories and their codes
//! - `district`: the twenty dzongkhags
//! - `report`: MonthlyReport and its per-category / per-district statistics
//! - `payload`: callback payload shape delivered by the reporting service

pub mod category;
pub mod district;
pub mod payload;
pub mod period;
pub mod report;

pub use category::OutageCategory;
pub use district::{District, DistrictStatus};
pub use payload::ServiceResponse;
pub use period::ReportingPeriod;
pub use report::{
    DataSource, DistrictStat, MonthlyReport, OutageClassStat, OverviewSummary,
};
