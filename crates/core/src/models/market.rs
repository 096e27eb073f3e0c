use serde::{Deserialize, Serialize};

use super::price::{PriceChange, PricePoint};
use super::timeframe::Timeframe;

/// One row of the market list, as normalized from `/coins/markets`.
///
/// `None` in any numeric field means the upstream did not report it.
/// Records are never mutated after normalization; a refresh replaces the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// Upstream coin id (e.g., "bitcoin"), unique within a snapshot
    pub id: String,
    pub name: String,
    /// Ticker as reported upstream (lowercase, e.g., "btc")
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub volume_24h: Option<f64>,
    pub price_change_pct_24h: Option<f64>,
    pub image_url: Option<String>,
    /// Seven-day sparkline prices, oldest first. Empty when not requested.
    pub sparkline_7d: Vec<f64>,
}

/// Coin detail header and stats for the coin screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image_url: Option<String>,
    pub current_price: Option<f64>,
    pub price_change_pct_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_change_pct_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
}

/// Latest spot price with its 24h change, from `/simple/price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotQuote {
    pub coin_id: String,
    pub price: f64,
    pub change_pct_24h: Option<f64>,
}

/// Everything the coin screen shows: detail plus the chart for its timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinView {
    pub detail: CoinDetail,
    pub timeframe: Timeframe,
    /// Empty when the chart endpoint returned no usable points
    pub series: Vec<PricePoint>,
}

/// A price series with the figures derived from it, for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesView {
    pub coin_id: String,
    pub timeframe: Timeframe,
    /// Never empty
    pub points: Vec<PricePoint>,
    /// Price of the newest point
    pub current_price: f64,
    /// Change across the window; `None` when it can't be computed
    pub change: Option<PriceChange>,
}
