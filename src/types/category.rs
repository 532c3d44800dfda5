//! Outage cause classification
//!
//! The reporting service keys its per-category statistics by display name;
//! the dashboard labels chart axes with the single-letter code instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fixed outage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutageCategory {
    #[serde(rename = "Momentary outage")]
    Momentary,
    #[serde(rename = "Sustained fault trip")]
    SustainedFault,
    #[serde(rename = "Grid failure outage")]
    GridFailure,
    #[serde(rename = "Planned shutdown outage")]
    PlannedShutdown,
    #[serde(rename = "Emergency shutdown outage")]
    EmergencyShutdown,
}

impl OutageCategory {
    /// All categories in display order
    pub const ALL: [OutageCategory; 5] = [
        OutageCategory::Momentary,
        OutageCategory::SustainedFault,
        OutageCategory::GridFailure,
        OutageCategory::PlannedShutdown,
        OutageCategory::EmergencyShutdown,
    ];

    /// Name used as the key in service payloads
    pub fn display_name(&self) -> &'static str {
        match self {
            OutageCategory::Momentary => "Momentary outage",
            OutageCategory::SustainedFault => "Sustained fault trip",
            OutageCategory::GridFailure => "Grid failure outage",
            OutageCategory::PlannedShutdown => "Planned shutdown outage",
            OutageCategory::EmergencyShutdown => "Emergency shutdown outage",
        }
    }

    /// Classification code shown on chart axes
    pub fn code(&self) -> char {
        match self {
            OutageCategory::Momentary => 'A',
            OutageCategory::SustainedFault => 'B',
            OutageCategory::GridFailure => 'C',
            OutageCategory::PlannedShutdown => 'D',
            OutageCategory::EmergencyShutdown => 'E',
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for OutageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
