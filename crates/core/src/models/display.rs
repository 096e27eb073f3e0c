use serde::{Deserialize, Serialize};

use super::price::Trend;
use super::sort::SortSpec;

/// A percent change ready to show: unsigned magnitude plus an arrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentDisplay {
    Known { magnitude: String, trend: Trend },
    Unknown,
}

/// One formatted row of the market table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRow {
    /// Link target for the coin screen
    pub coin_id: String,
    pub rank: String,
    pub name: String,
    /// Uppercased ticker
    pub symbol: String,
    pub image_url: Option<String>,
    pub price: String,
    pub change_24h: PercentDisplay,
    pub market_cap: String,
    pub volume_24h: String,
}

/// The market list screen: rows in display order plus the active ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTable {
    pub sort: SortSpec,
    pub rows: Vec<MarketRow>,
}

/// One stat tile under the coin chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    /// Unit shown after the value (the ticker for supply)
    pub unit: Option<String>,
    /// `None` when the card has no change line
    pub change: Option<PercentDisplay>,
}
