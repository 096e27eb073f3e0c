//! Maps raw API payloads into display records.
//!
//! Pure functions. Missing optional fields become `None`; nothing here panics
//! on a sparse payload.

use chrono::DateTime;
use std::collections::{HashMap, HashSet};

use crate::errors::CoreError;
use crate::models::market::{CoinDetail, MarketRecord, SpotQuote};
use crate::models::price::PricePoint;
use crate::models::raw::{RawCoinDetail, RawMarket, RawMarketChart, RawSimplePrice};

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn in_currency(map: &HashMap<String, Option<f64>>, currency: &str) -> Option<f64> {
    finite(map.get(currency).copied().flatten())
}

/// One record per distinct coin id, in upstream order.
///
/// A repeated id keeps its first occurrence, so ids stay unique.
pub fn normalize_market_list(raw: &[RawMarket]) -> Vec<MarketRecord> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.iter()
        .filter(|m| seen.insert(m.id.as_str()))
        .map(normalize_market)
        .collect()
}

fn normalize_market(raw: &RawMarket) -> MarketRecord {
    let sparkline_7d = raw
        .sparkline_in_7d
        .as_ref()
        .map(|s| s.price.iter().filter_map(|p| finite(*p)).collect())
        .unwrap_or_default();

    MarketRecord {
        id: raw.id.clone(),
        name: raw.name.clone().unwrap_or_else(|| raw.id.clone()),
        symbol: raw.symbol.clone().unwrap_or_default(),
        current_price: finite(raw.current_price),
        market_cap: finite(raw.market_cap),
        market_cap_rank: raw.market_cap_rank,
        volume_24h: finite(raw.total_volume),
        price_change_pct_24h: finite(raw.price_change_percentage_24h),
        image_url: raw.image.clone(),
        sparkline_7d,
    }
}

/// Detail record, with per-currency figures read for `vs_currency`.
pub fn normalize_coin_detail(raw: &RawCoinDetail, vs_currency: &str) -> CoinDetail {
    let currency = vs_currency.to_lowercase();
    let market = raw.market_data.as_ref();

    let image_url = raw.image.as_ref().and_then(|img| {
        img.large
            .clone()
            .or_else(|| img.small.clone())
            .or_else(|| img.thumb.clone())
    });

    CoinDetail {
        id: raw.id.clone(),
        name: raw.name.clone().unwrap_or_else(|| raw.id.clone()),
        symbol: raw.symbol.clone().unwrap_or_default(),
        image_url,
        current_price: market.and_then(|m| in_currency(&m.current_price, &currency)),
        price_change_pct_24h: finite(market.and_then(|m| m.price_change_percentage_24h)),
        market_cap: market.and_then(|m| in_currency(&m.market_cap, &currency)),
        market_cap_change_pct_24h: finite(market.and_then(|m| m.market_cap_change_percentage_24h)),
        volume_24h: market.and_then(|m| in_currency(&m.total_volume, &currency)),
        circulating_supply: finite(market.and_then(|m| m.circulating_supply)),
    }
}

/// Ascending price series. Entries with a null or non-finite price, or a
/// timestamp outside the representable range, are dropped.
pub fn normalize_price_series(raw: &RawMarketChart) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = raw
        .prices
        .iter()
        .filter_map(|(ts_ms, price)| {
            let price = finite(*price)?;
            if !ts_ms.is_finite() {
                return None;
            }
            let timestamp = DateTime::from_timestamp_millis(*ts_ms as i64)?;
            Some(PricePoint { timestamp, price })
        })
        .collect();
    // Upstream already sends ascending data; the stable sort is a no-op then.
    points.sort_by_key(|p| p.timestamp);
    points
}

/// Spot quote for `coin_id`. A payload without the coin or its price is an
/// API error: the request succeeded but answered a different question.
pub fn normalize_spot_quote(
    raw: &RawSimplePrice,
    coin_id: &str,
    vs_currency: &str,
) -> Result<SpotQuote, CoreError> {
    let currency = vs_currency.to_lowercase();
    let entry = raw.get(coin_id).ok_or_else(|| CoreError::Api {
        provider: "CoinGecko".into(),
        message: format!("No price entry for {coin_id}"),
    })?;

    let price = finite(entry.get(&currency).copied().flatten()).ok_or_else(|| CoreError::Api {
        provider: "CoinGecko".into(),
        message: format!("No {currency} price for {coin_id}"),
    })?;

    let change_key = format!("{currency}_24h_change");
    Ok(SpotQuote {
        coin_id: coin_id.to_string(),
        price,
        change_pct_24h: finite(entry.get(&change_key).copied().flatten()),
    })
}
