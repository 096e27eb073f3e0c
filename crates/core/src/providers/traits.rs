use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::raw::{RawCoinDetail, RawMarket, RawMarketChart, RawSimplePrice};

/// Parameters of the market list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketsQuery {
    pub vs_currency: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            per_page: 100,
            page: 1,
            sparkline: true,
        }
    }
}

/// Trait abstraction for the upstream market-data API.
///
/// Implementations return the raw wire payloads; normalization happens in
/// `services::normalizer` so it stays pure and testable without a network.
/// Every error a call returns classifies as `ErrorKind::FetchFailed`.
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Top coins by market cap, one page.
    async fn get_markets(&self, query: &MarketsQuery) -> Result<Vec<RawMarket>, CoreError>;

    /// Detail record of a single coin.
    async fn get_coin(&self, coin_id: &str) -> Result<RawCoinDetail, CoreError>;

    /// Price history over the last `days` days.
    async fn get_market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<RawMarketChart, CoreError>;

    /// Spot price with 24h change.
    async fn get_simple_price(
        &self,
        coin_id: &str,
        vs_currency: &str,
    ) -> Result<RawSimplePrice, CoreError>;
}
