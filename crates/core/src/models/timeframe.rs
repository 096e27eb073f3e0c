use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Chart lookback window selectable on the coin and dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    /// Last 24 hours.
    #[default]
    Day,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
}

/// How chart axis ticks should be labelled for a timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickGranularity {
    TimeOfDay,
    Date,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Day, Timeframe::Week, Timeframe::Month];

    /// Number of days passed as `days=` to the market chart endpoint.
    pub fn lookback_days(&self) -> u32 {
        match self {
            Timeframe::Day => 1,
            Timeframe::Week => 7,
            Timeframe::Month => 30,
        }
    }

    /// Short label used on the timeframe buttons ("24h", "7d", "30d").
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Day => "24h",
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
        }
    }

    pub fn tick_granularity(&self) -> TickGranularity {
        match self {
            Timeframe::Day => TickGranularity::TimeOfDay,
            Timeframe::Week | Timeframe::Month => TickGranularity::Date,
        }
    }

    /// Bar size in minutes for the embedded trading chart widget.
    pub fn widget_resolution_minutes(&self) -> u32 {
        match self {
            Timeframe::Day => 15,
            Timeframe::Week => 60,
            Timeframe::Month => 240,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.label() == lower)
            .ok_or_else(|| CoreError::InvalidTimeframe(s.to_string()))
    }
}
