//! Wire shapes of the upstream market-data API.
//!
//! Every field the API is known to omit or null is optional here, so a sparse
//! payload still decodes. Turning these into display records is the job of
//! `services::normalizer`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of `GET /coins/markets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMarket {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<RawSparkline>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSparkline {
    #[serde(default)]
    pub price: Vec<Option<f64>>,
}

/// `GET /coins/{id}` with localization, tickers, community and developer data off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCoinDetail {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub market_data: Option<RawMarketData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Per-currency maps are keyed by lowercase currency code ("usd").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub total_volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
}

/// `GET /coins/{id}/market_chart`: each entry is `[timestamp_ms, price]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMarketChart {
    #[serde(default)]
    pub prices: Vec<(f64, Option<f64>)>,
}

/// `GET /simple/price`: `{ "<coin id>": { "usd": .., "usd_24h_change": .. } }`.
pub type RawSimplePrice = HashMap<String, HashMap<String, Option<f64>>>;
