use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price data point (instant → price).
///
/// Series of these are kept ascending by `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Which way a price moved. Zero counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn of(percent: f64) -> Self {
        if percent >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Percent change over a window, always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub percent: f64,
}

impl PriceChange {
    /// Wrap a raw percentage; `None` when it is not a finite number.
    pub fn from_percent(percent: f64) -> Option<Self> {
        percent.is_finite().then_some(Self { percent })
    }

    /// `(last - first) / first * 100` over an ascending series.
    ///
    /// Fewer than two points, a zero starting price, or a non-finite result
    /// all yield `None` ("unknown").
    pub fn from_series(points: &[PricePoint]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let first = points.first()?.price;
        let last = points.last()?.price;
        if first == 0.0 {
            return None;
        }
        Self::from_percent((last - first) / first * 100.0)
    }

    pub fn trend(&self) -> Trend {
        Trend::of(self.percent)
    }

    pub fn magnitude(&self) -> f64 {
        self.percent.abs()
    }
}
