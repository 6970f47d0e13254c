use crate::error::SeasonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base temperature a GDD accumulation is computed against. The data service
/// keys each threshold's dataset by its identifier ("gdd50", "gdd8650").
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum GddThreshold {
    /// Base 50°F.
    #[default]
    #[serde(rename = "gdd50")]
    Base50,
    /// Base 50°F with an 86°F upper cutoff.
    #[serde(rename = "gdd8650")]
    Base8650,
}

impl GddThreshold {
    pub const ALL: [GddThreshold; 2] = [GddThreshold::Base50, GddThreshold::Base8650];

    /// Payload key for this threshold.
    pub fn key(&self) -> &'static str {
        match self {
            GddThreshold::Base50 => "gdd50",
            GddThreshold::Base8650 => "gdd8650",
        }
    }

    /// Display label, e.g. "Base 50".
    pub fn label(&self) -> &'static str {
        match self {
            GddThreshold::Base50 => "Base 50",
            GddThreshold::Base8650 => "Base 8650",
        }
    }

    /// Chart title for cumulative accumulation at this threshold.
    pub fn chart_title(&self) -> String {
        format!("Cumulative {} Growing Degree Days", self.label())
    }
}

impl fmt::Display for GddThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GddThreshold {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        GddThreshold::ALL
            .into_iter()
            .find(|threshold| threshold.key() == key)
            .ok_or_else(|| SeasonError::UnknownThreshold(s.to_string()))
    }
}
