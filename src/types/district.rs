use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration above which a district is flagged critical (hours)
pub const CRITICAL_DURATION_HOURS: f64 = 5.0;

/// Duration above which a district is flagged for attention (hours)
pub const WARNING_DURATION_HOURS: f64 = 2.0;

/// The twenty dzongkhags (first-level administrative districts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum District {
    Bumthang,
    Chukha,
    Dagana,
    Gasa,
    Haa,
    Lhuntse,
    Mongar,
    Paro,
    Pemagatshel,
    Punakha,
    #[serde(rename = "Samdrup Jongkhar")]
    SamdrupJongkhar,
    Samtse,
    Sarpang,
    Thimphu,
    Trashigang,
    Trashiyangtse,
    Trongsa,
    Tsirang,
    #[serde(rename = "Wangdue Phodrang")]
    WangduePhodrang,
    Zhemgang,
}

impl District {
    pub const ALL: [District; 20] = [
        District::Bumthang,
        District::Chukha,
        District::Dagana,
        District::Gasa,
        District::Haa,
        District::Lhuntse,
        District::Mongar,
        District::Paro,
        District::Pemagatshel,
        District::Punakha,
        District::SamdrupJongkhar,
        District::Samtse,
        District::Sarpang,
        District::Thimphu,
        District::Trashigang,
        District::Trashiyangtse,
        District::Trongsa,
        District::Tsirang,
        District::WangduePhodrang,
        District::Zhemgang,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            District::Bumthang => "Bumthang",
            District::Chukha => "Chukha",
            District::Dagana => "Dagana",
            District::Gasa => "Gasa",
            District::Haa => "Haa",
            District::Lhuntse => "Lhuntse",
            District::Mongar => "Mongar",
            District::Paro => "Paro",
            District::Pemagatshel => "Pemagatshel",
            District::Punakha => "Punakha",
            District::SamdrupJongkhar => "Samdrup Jongkhar",
            District::Samtse => "Samtse",
            District::Sarpang => "Sarpang",
            District::Thimphu => "Thimphu",
            District::Trashigang => "Trashigang",
            District::Trashiyangtse => "Trashiyangtse",
            District::Trongsa => "Trongsa",
            District::Tsirang => "Tsirang",
            District::WangduePhodrang => "Wangdue Phodrang",
            District::Zhemgang => "Zhemgang",
        }
    }

    /// Case- and whitespace-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(&wanted))
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity band derived from a district's total outage duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistrictStatus {
    Good,
    Warning,
    Critical,
}

impl DistrictStatus {
    pub fn from_duration(total_duration_hours: f64) -> Self {
        if total_duration_hours > CRITICAL_DURATION_HOURS {
            DistrictStatus::Critical
        } else if total_duration_hours > WARNING_DURATION_HOURS {
            DistrictStatus::Warning
        } else {
            DistrictStatus::Good
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistrictStatus::Good => "Good",
            DistrictStatus::Warning => "Warning",
            DistrictStatus::Critical => "Critical",
        }
    }
}
