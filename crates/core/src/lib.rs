pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use errors::CoreError;
use models::market::{CoinView, MarketRecord, SeriesView, SpotQuote};
use models::settings::Settings;
use models::timeframe::Timeframe;
use providers::coingecko::CoinGeckoProvider;
use providers::traits::{MarketDataApi, MarketsQuery};
use providers::widget::{ChartWidget, WidgetConfig};
use services::feeds::{CoinDetailFeed, CoinQuery, MarketListFeed, PriceSeriesFeed, SpotQuoteFeed};
use services::poller::{Poller, PollerOptions};
use services::trading_service::{TradingScreen, TradingSession};

/// Main entry point for the crypto dashboard core library.
///
/// Holds the settings and the market-data provider, and starts one
/// independent [`Poller`] per screen. Pollers share nothing but the provider.
#[must_use]
pub struct CryptoDashboard {
    settings: Settings,
    api: Arc<dyn MarketDataApi>,
}

impl std::fmt::Debug for CryptoDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDashboard")
            .field("provider", &self.api.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CryptoDashboard {
    /// Dashboard against the CoinGecko API described by `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let provider = CoinGeckoProvider::from_settings(&settings)?;
        Ok(Self {
            settings,
            api: Arc::new(provider),
        })
    }

    /// Dashboard with a custom provider (another API, a mock, a cache).
    pub fn with_api(settings: Settings, api: Arc<dyn MarketDataApi>) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self { settings, api })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn api(&self) -> Arc<dyn MarketDataApi> {
        Arc::clone(&self.api)
    }

    /// Poller options preset with the configured interval and request timeout.
    /// Attach callbacks before passing them to a `watch_*` method.
    pub fn poller_options<T>(&self) -> PollerOptions<T> {
        PollerOptions::new()
            .interval(self.settings.refresh_interval())
            .request_timeout(self.settings.request_timeout())
    }

    /// The market list query from settings: first page by market cap, with sparklines.
    pub fn markets_query(&self) -> MarketsQuery {
        MarketsQuery {
            vs_currency: self.settings.vs_currency.clone(),
            per_page: self.settings.markets_per_page,
            page: 1,
            sparkline: true,
        }
    }

    // ── Screens ─────────────────────────────────────────────────────

    /// Market list (home table).
    pub fn watch_markets(
        &self,
        options: PollerOptions<Vec<MarketRecord>>,
    ) -> Result<Poller<MarketListFeed>, CoreError> {
        let feed = Arc::new(MarketListFeed::new(self.api()));
        Poller::start(feed, self.markets_query(), options)
    }

    /// Coin detail screen. Change coin or timeframe later with
    /// `Poller::set_params` / `Poller::update_params`.
    pub fn watch_coin(
        &self,
        coin_id: &str,
        timeframe: Timeframe,
        options: PollerOptions<CoinView>,
    ) -> Result<Poller<CoinDetailFeed>, CoreError> {
        if coin_id.trim().is_empty() {
            return Err(CoreError::InvalidConfig("coin id must not be empty".into()));
        }
        let feed = Arc::new(CoinDetailFeed::new(self.api(), &self.settings.vs_currency));
        Poller::start(feed, CoinQuery::new(coin_id, timeframe), options)
    }

    /// Price dashboard for the configured dashboard coin.
    pub fn watch_price_dashboard(
        &self,
        timeframe: Timeframe,
        options: PollerOptions<SeriesView>,
    ) -> Result<Poller<PriceSeriesFeed>, CoreError> {
        let feed = Arc::new(PriceSeriesFeed::new(self.api(), &self.settings.vs_currency));
        Poller::start(
            feed,
            CoinQuery::new(self.settings.dashboard_coin.clone(), timeframe),
            options,
        )
    }

    /// Spot quote of the configured dashboard coin.
    pub fn watch_spot_quote(
        &self,
        options: PollerOptions<SpotQuote>,
    ) -> Result<Poller<SpotQuoteFeed>, CoreError> {
        let feed = Arc::new(SpotQuoteFeed::new(self.api(), &self.settings.vs_currency));
        Poller::start(feed, self.settings.dashboard_coin.clone(), options)
    }

    /// Trading screen: spot quote poller plus the embedded chart mounted into
    /// `container` with the configured trading symbol.
    ///
    /// If the chart fails to mount, the quote poller is stopped and the error returned.
    pub fn open_trading_view<W: ChartWidget>(
        &self,
        widget: W,
        container: &str,
        timeframe: Timeframe,
        options: PollerOptions<SpotQuote>,
    ) -> Result<TradingScreen<W>, CoreError> {
        let quote = self.watch_spot_quote(options)?;
        let config = WidgetConfig::new(self.settings.trading_symbol.clone(), timeframe);
        let chart = TradingSession::open(widget, container, config, timeframe)?;
        Ok(TradingScreen { quote, chart })
    }
}
