use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timeframe::Timeframe;

/// A single data point for line chart rendering.
///
/// The core generates these. The frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,

    /// X-axis tick text: time of day for 24h charts, a date otherwise
    pub label: String,

    pub price: f64,

    /// Tooltip text, e.g. "$142.07"
    pub price_label: String,
}

/// A full chart for one coin and timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub timeframe: Timeframe,
    pub points: Vec<ChartPoint>,

    /// Y-axis bounds, `None` for an empty series
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ChartSeries {
    /// An empty series is valid but has nothing to draw.
    pub fn is_renderable(&self) -> bool {
        !self.points.is_empty()
    }
}
