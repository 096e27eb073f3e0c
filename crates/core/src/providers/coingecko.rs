use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::traits::{MarketDataApi, MarketsQuery};
use crate::errors::{redact_query, CoreError};
use crate::models::raw::{RawCoinDetail, RawMarket, RawMarketChart, RawSimplePrice};
use crate::models::settings::Settings;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const PROVIDER: &str = "CoinGecko";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// CoinGecko v3 REST provider.
///
/// - **Free**: the public endpoints need no key; a demo key raises rate limits.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}`, `/coins/{id}/market_chart`,
///   `/simple/price`
///
/// Non-2xx responses become `CoreError::Status`, undecodable bodies
/// `CoreError::Deserialization`.
#[derive(Debug)]
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Provider against the public API with default settings.
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(15));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Provider configured from `Settings` (base url, timeout, api key).
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        // Reject a bad base url up front instead of on every request.
        parse_base(&settings.api_base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &settings.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| CoreError::InvalidConfig("api_key is not a valid header value".into()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .timeout(settings.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CoreError> {
        let shown = redact_query(url.as_str());
        tracing::debug!(provider = PROVIDER, url = %shown, "GET");

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Status {
                status: status.as_u16(),
                url: shown,
            });
        }

        resp.json().await.map_err(|e| {
            CoreError::Deserialization(format!("{PROVIDER} response from {shown}: {}", redact_query(&e.to_string())))
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── URL builders ────────────────────────────────────────────────────

fn parse_base(base_url: &str) -> Result<Url, CoreError> {
    let url = Url::parse(base_url)
        .map_err(|e| CoreError::InvalidConfig(format!("Invalid api_base_url {base_url}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CoreError::InvalidConfig(format!(
            "api_base_url {base_url} cannot be used as a base"
        )));
    }
    Ok(url)
}

fn endpoint(base_url: &str, segments: &[&str], query: &[(&str, String)]) -> Result<Url, CoreError> {
    let mut url = parse_base(base_url)?;
    url.path_segments_mut()
        .map_err(|_| CoreError::InvalidConfig(format!("api_base_url {base_url} cannot be used as a base")))?
        .pop_if_empty()
        .extend(segments);
    url.query_pairs_mut()
        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(url)
}

/// `GET /coins/markets?vs_currency=..&order=market_cap_desc&per_page=..&page=..&sparkline=..`
pub fn markets_url(base_url: &str, query: &MarketsQuery) -> Result<Url, CoreError> {
    endpoint(
        base_url,
        &["coins", "markets"],
        &[
            ("vs_currency", query.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", query.per_page.to_string()),
            ("page", query.page.to_string()),
            ("sparkline", query.sparkline.to_string()),
        ],
    )
}

/// `GET /coins/{id}` with localization, tickers, community and developer data off.
pub fn coin_url(base_url: &str, coin_id: &str) -> Result<Url, CoreError> {
    endpoint(
        base_url,
        &["coins", coin_id],
        &[
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
        ],
    )
}

/// `GET /coins/{id}/market_chart?vs_currency=..&days=..`
pub fn market_chart_url(
    base_url: &str,
    coin_id: &str,
    vs_currency: &str,
    days: u32,
) -> Result<Url, CoreError> {
    endpoint(
        base_url,
        &["coins", coin_id, "market_chart"],
        &[
            ("vs_currency", vs_currency.to_string()),
            ("days", days.to_string()),
        ],
    )
}

/// `GET /simple/price?ids=..&vs_currencies=..&include_24hr_change=true`
pub fn simple_price_url(base_url: &str, coin_id: &str, vs_currency: &str) -> Result<Url, CoreError> {
    endpoint(
        base_url,
        &["simple", "price"],
        &[
            ("ids", coin_id.to_string()),
            ("vs_currencies", vs_currency.to_string()),
            ("include_24hr_change", "true".to_string()),
        ],
    )
}

#[async_trait]
impl MarketDataApi for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_markets(&self, query: &MarketsQuery) -> Result<Vec<RawMarket>, CoreError> {
        let url = markets_url(&self.base_url, query)?;
        self.get_json(url).await
    }

    async fn get_coin(&self, coin_id: &str) -> Result<RawCoinDetail, CoreError> {
        let url = coin_url(&self.base_url, coin_id)?;
        self.get_json(url).await
    }

    async fn get_market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<RawMarketChart, CoreError> {
        let url = market_chart_url(&self.base_url, coin_id, vs_currency, days)?;
        self.get_json(url).await
    }

    async fn get_simple_price(
        &self,
        coin_id: &str,
        vs_currency: &str,
    ) -> Result<RawSimplePrice, CoreError> {
        let url = simple_price_url(&self.base_url, coin_id, vs_currency)?;
        self.get_json(url).await
    }
}
