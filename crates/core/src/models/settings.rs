use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

/// User-configurable settings for the dashboard core.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the market-data REST API, without trailing slash.
    pub api_base_url: String,

    /// Quote currency for every price (e.g., "usd").
    pub vs_currency: String,

    /// Seconds between polls of each screen.
    pub refresh_interval_secs: u64,

    /// Upper bound on a single HTTP request.
    pub request_timeout_secs: u64,

    /// Rows requested for the market list.
    pub markets_per_page: u32,

    /// Coin shown on the price dashboard and trading screens.
    pub dashboard_coin: String,

    /// Symbol handed to the embedded trading chart widget.
    pub trading_symbol: String,

    /// Optional demo API key, sent as a header rather than in the URL.
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.coingecko.com/api/v3".to_string(),
            vs_currency: "usd".to_string(),
            refresh_interval_secs: 60,
            request_timeout_secs: 15,
            markets_per_page: 100,
            dashboard_coin: "solana".to_string(),
            trading_symbol: "BINANCE:SOLUSD".to_string(),
            api_key: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::InvalidConfig("api_base_url must not be empty".into()));
        }
        if self.vs_currency.trim().is_empty() {
            return Err(CoreError::InvalidConfig("vs_currency must not be empty".into()));
        }
        if self.dashboard_coin.trim().is_empty() {
            return Err(CoreError::InvalidConfig("dashboard_coin must not be empty".into()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "refresh_interval_secs must be greater than zero".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.markets_per_page == 0 {
            return Err(CoreError::InvalidConfig(
                "markets_per_page must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
