// ── Selectable display periods ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The fixed enumeration of selectable time windows.
///
/// Parses from / renders to the short form (`1h`, `6h`, `12h`, `24h`,
/// `7d`); [`label()`](TimeRange::label) gives the display-period text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum TimeRange {
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    LastHour,
    #[strum(serialize = "6h")]
    #[serde(rename = "6h")]
    Last6Hours,
    #[strum(serialize = "12h")]
    #[serde(rename = "12h")]
    Last12Hours,
    #[strum(serialize = "24h")]
    #[serde(rename = "24h")]
    Last24Hours,
    #[strum(serialize = "7d")]
    #[serde(rename = "7d")]
    Last7Days,
}

impl TimeRange {
    /// Window length in whole hours (also the bucket count).
    pub fn hours(self) -> u64 {
        match self {
            Self::LastHour => 1,
            Self::Last6Hours => 6,
            Self::Last12Hours => 12,
            Self::Last24Hours => 24,
            Self::Last7Days => 168,
        }
    }

    /// Window length in seconds, as passed to the search endpoint.
    pub fn as_secs(self) -> u64 {
        self.hours() * 3600
    }

    /// Human-readable label as shown in period selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::LastHour => "Last 1 Hour",
            Self::Last6Hours => "Last 6 Hours",
            Self::Last12Hours => "Last 12 Hours",
            Self::Last24Hours => "Last 24 Hours",
            Self::Last7Days => "Last 7 Days",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::Last24Hours
    }
}
