// ═══════════════════════════════════════════════════════════════════
// Provider Tests — CoinGecko URLs and construction, widget config
// ═══════════════════════════════════════════════════════════════════

use crypto_dashboard_core::errors::CoreError;
use crypto_dashboard_core::models::settings::Settings;
use crypto_dashboard_core::models::timeframe::Timeframe;
use crypto_dashboard_core::providers::coingecko::{
    coin_url, market_chart_url, markets_url, simple_price_url, CoinGeckoProvider,
    DEFAULT_BASE_URL,
};
use crypto_dashboard_core::providers::traits::{MarketDataApi, MarketsQuery};
use crypto_dashboard_core::providers::widget::{Resolution, Theme, WidgetConfig};

// ═══════════════════════════════════════════════════════════════════
// URL builders
// ═══════════════════════════════════════════════════════════════════

mod urls {
    use super::*;

    #[test]
    fn markets() {
        let url = markets_url(DEFAULT_BASE_URL, &MarketsQuery::default()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=100&page=1&sparkline=true"
        );
    }

    #[test]
    fn markets_custom_query() {
        let query = MarketsQuery {
            vs_currency: "eur".into(),
            per_page: 25,
            page: 3,
            sparkline: false,
        };
        let url = markets_url(DEFAULT_BASE_URL, &query).unwrap();
        assert_eq!(url.query(), Some("vs_currency=eur&order=market_cap_desc&per_page=25&page=3&sparkline=false"));
    }

    #[test]
    fn coin_detail() {
        let url = coin_url(DEFAULT_BASE_URL, "solana").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/solana?localization=false&tickers=false&community_data=false&developer_data=false"
        );
    }

    #[test]
    fn market_chart() {
        let url = market_chart_url(DEFAULT_BASE_URL, "bitcoin", "usd", Timeframe::Week.lookback_days())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=7"
        );
    }

    #[test]
    fn simple_price() {
        let url = simple_price_url(DEFAULT_BASE_URL, "solana", "usd").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd&include_24hr_change=true"
        );
    }

    #[test]
    fn trailing_slash_on_base() {
        let url = coin_url("http://localhost:8080/api/v3/", "solana").unwrap();
        assert_eq!(url.path(), "/api/v3/coins/solana");
    }

    #[test]
    fn coin_id_is_path_escaped() {
        let url = coin_url(DEFAULT_BASE_URL, "evil/../id").unwrap();
        assert_eq!(url.path(), "/api/v3/coins/evil%2F..%2Fid");
    }

    #[test]
    fn invalid_base() {
        let err = coin_url("not a url", "solana").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));

        let err = coin_url("mailto:someone@example.test", "solana").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// CoinGeckoProvider
// ═══════════════════════════════════════════════════════════════════

mod coingecko {
    use super::*;

    #[test]
    fn name() {
        let p = CoinGeckoProvider::new();
        assert_eq!(p.name(), "CoinGecko");
    }

    #[test]
    fn default_trait() {
        let p = CoinGeckoProvider::default();
        assert_eq!(p.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn from_default_settings() {
        let p = CoinGeckoProvider::from_settings(&Settings::default()).unwrap();
        assert_eq!(p.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn from_settings_custom_base() {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9000/api/v3".into(),
            api_key: Some("CG-demo-key".into()),
            ..Settings::default()
        };
        let p = CoinGeckoProvider::from_settings(&settings).unwrap();
        assert_eq!(p.base_url(), "http://127.0.0.1:9000/api/v3");
    }

    #[test]
    fn from_settings_rejects_bad_base_url() {
        let settings = Settings {
            api_base_url: "::::".into(),
            ..Settings::default()
        };
        let err = CoinGeckoProvider::from_settings(&settings).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn from_settings_rejects_bad_api_key() {
        let settings = Settings {
            api_key: Some("line\nbreak".into()),
            ..Settings::default()
        };
        let err = CoinGeckoProvider::from_settings(&settings).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
        // The key itself never shows up in the message
        assert!(!err.to_string().contains("line"));
    }

    #[test]
    fn from_settings_validates_first() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(CoinGeckoProvider::from_settings(&settings).is_err());
    }

    #[test]
    fn usable_as_trait_object() {
        let p: Box<dyn MarketDataApi> = Box::new(CoinGeckoProvider::new());
        assert_eq!(p.name(), "CoinGecko");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trading chart widget config
// ═══════════════════════════════════════════════════════════════════

mod widget_config {
    use super::*;

    #[test]
    fn resolution_per_timeframe() {
        assert_eq!(Resolution::for_timeframe(Timeframe::Day), Resolution(15));
        assert_eq!(Resolution::for_timeframe(Timeframe::Week), Resolution(60));
        assert_eq!(Resolution::for_timeframe(Timeframe::Month), Resolution(240));
        assert_eq!(Resolution(240).as_widget_value(), "240");
    }

    #[test]
    fn defaults() {
        let config = WidgetConfig::new("BINANCE:SOLUSD", Timeframe::Week);
        assert_eq!(config.symbol, "BINANCE:SOLUSD");
        assert_eq!(config.resolution, Resolution(60));
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.locale, "en");
        assert_eq!(config.timezone, "Etc/UTC");
        assert_eq!(
            config.studies,
            vec!["RSI@tv-basicstudies", "MASimple@tv-basicstudies"]
        );
        assert!(!config.enable_publishing);
        assert!(!config.allow_symbol_change);
    }

    #[test]
    fn builders() {
        let config = WidgetConfig::new("BINANCE:BTCUSD", Timeframe::Day)
            .with_theme(Theme::Dark)
            .with_timezone("Europe/Warsaw");
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.timezone, "Europe/Warsaw");
    }
}
