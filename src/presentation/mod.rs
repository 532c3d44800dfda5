//! Presentation boundary
//!
//! - **Adapter** - turns whatever payload arrives into a fully populated [`MonthlyReport`]
//! - **View** - the figures rendering collaborators consume (tables, bar-chart series)
//! - **Format** - console and JSON renderings of views, catalogs and notifications
//!
//! [`MonthlyReport`]: crate::types::MonthlyReport

pub mod adapter;
pub mod format;
pub mod view;

pub use adapter::{ensure_complete, normalize};
pub use format::{format_catalog, format_dashboard, format_notification, OutputFormat};
pub use view::{BarChart, CategoryRow, DashboardView, DistrictRow, OverviewView};
