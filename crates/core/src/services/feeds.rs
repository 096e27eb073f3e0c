//! One [`SnapshotSource`] per dashboard screen.
//!
//! Each feed combines provider calls with the matching normalizer, so a
//! poller cycle is "fetch raw → normalize → publish".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::market::{CoinView, MarketRecord, SeriesView, SpotQuote};
use crate::models::price::PriceChange;
use crate::models::timeframe::Timeframe;
use crate::providers::traits::{MarketDataApi, MarketsQuery};
use crate::services::normalizer::{
    normalize_coin_detail, normalize_market_list, normalize_price_series, normalize_spot_quote,
};
use crate::services::poller::SnapshotSource;

/// Coin and chart window a coin-level screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinQuery {
    pub coin_id: String,
    pub timeframe: Timeframe,
}

impl CoinQuery {
    pub fn new(coin_id: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            coin_id: coin_id.into(),
            timeframe,
        }
    }
}

// ── Market list ─────────────────────────────────────────────────────

/// Top coins by market cap for the home table.
pub struct MarketListFeed {
    api: Arc<dyn MarketDataApi>,
}

impl MarketListFeed {
    pub fn new(api: Arc<dyn MarketDataApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SnapshotSource for MarketListFeed {
    type Params = MarketsQuery;
    type Output = Vec<MarketRecord>;

    fn name(&self) -> &str {
        "market-list"
    }

    async fn fetch(&self, params: &MarketsQuery) -> Result<Vec<MarketRecord>, CoreError> {
        let raw = self.api.get_markets(params).await?;
        Ok(normalize_market_list(&raw))
    }
}

// ── Coin detail ─────────────────────────────────────────────────────

/// Coin detail plus its chart. Both requests run concurrently and the cycle
/// fails if either does. An empty chart is a valid result.
pub struct CoinDetailFeed {
    api: Arc<dyn MarketDataApi>,
    vs_currency: String,
}

impl CoinDetailFeed {
    pub fn new(api: Arc<dyn MarketDataApi>, vs_currency: impl Into<String>) -> Self {
        Self {
            api,
            vs_currency: vs_currency.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource for CoinDetailFeed {
    type Params = CoinQuery;
    type Output = CoinView;

    fn name(&self) -> &str {
        "coin-detail"
    }

    async fn fetch(&self, params: &CoinQuery) -> Result<CoinView, CoreError> {
        let (detail, chart) = tokio::join!(
            self.api.get_coin(&params.coin_id),
            self.api.get_market_chart(
                &params.coin_id,
                &self.vs_currency,
                params.timeframe.lookback_days()
            ),
        );
        Ok(CoinView {
            detail: normalize_coin_detail(&detail?, &self.vs_currency),
            timeframe: params.timeframe,
            series: normalize_price_series(&chart?),
        })
    }
}

// ── Price dashboard ─────────────────────────────────────────────────

/// Price series with current price and window change.
///
/// The screen headlines the newest price, so a chart with no usable points
/// fails the cycle with `EmptySeries` and the last good snapshot stays up.
pub struct PriceSeriesFeed {
    api: Arc<dyn MarketDataApi>,
    vs_currency: String,
}

impl PriceSeriesFeed {
    pub fn new(api: Arc<dyn MarketDataApi>, vs_currency: impl Into<String>) -> Self {
        Self {
            api,
            vs_currency: vs_currency.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource for PriceSeriesFeed {
    type Params = CoinQuery;
    type Output = SeriesView;

    fn name(&self) -> &str {
        "price-series"
    }

    async fn fetch(&self, params: &CoinQuery) -> Result<SeriesView, CoreError> {
        let raw = self
            .api
            .get_market_chart(
                &params.coin_id,
                &self.vs_currency,
                params.timeframe.lookback_days(),
            )
            .await?;
        let points = normalize_price_series(&raw);

        let current_price = points
            .last()
            .map(|p| p.price)
            .ok_or_else(|| CoreError::EmptySeries {
                coin_id: params.coin_id.clone(),
            })?;

        Ok(SeriesView {
            coin_id: params.coin_id.clone(),
            timeframe: params.timeframe,
            change: PriceChange::from_series(&points),
            current_price,
            points,
        })
    }
}

// ── Spot quote ──────────────────────────────────────────────────────

/// Spot price and 24h change for the trading screen header.
pub struct SpotQuoteFeed {
    api: Arc<dyn MarketDataApi>,
    vs_currency: String,
}

impl SpotQuoteFeed {
    pub fn new(api: Arc<dyn MarketDataApi>, vs_currency: impl Into<String>) -> Self {
        Self {
            api,
            vs_currency: vs_currency.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource for SpotQuoteFeed {
    /// Coin id
    type Params = String;
    type Output = SpotQuote;

    fn name(&self) -> &str {
        "spot-quote"
    }

    async fn fetch(&self, coin_id: &String) -> Result<SpotQuote, CoreError> {
        let raw = self.api.get_simple_price(coin_id, &self.vs_currency).await?;
        normalize_spot_quote(&raw, coin_id, &self.vs_currency)
    }
}
