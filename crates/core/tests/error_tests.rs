// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, kinds, From impls
// ═══════════════════════════════════════════════════════════════════

use std::time::Duration;

use crypto_dashboard_core::errors::{CoreError, ErrorKind};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn network() {
        let err = CoreError::Network("connection reset".into());
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn status() {
        let err = CoreError::Status {
            status: 429,
            url: "https://api.coingecko.com/api/v3/coins/markets?<query redacted>".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 429 from https://api.coingecko.com/api/v3/coins/markets?<query redacted>"
        );
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "CoinGecko".into(),
            message: "No price entry for solana".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (CoinGecko): No price entry for solana"
        );
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("expected value at line 1".into());
        assert_eq!(
            err.to_string(),
            "Deserialization error: expected value at line 1"
        );
    }

    #[test]
    fn timeout() {
        let err = CoreError::Timeout(Duration::from_secs(15));
        assert_eq!(err.to_string(), "Request timed out after 15s");
    }

    #[test]
    fn empty_series() {
        let err = CoreError::EmptySeries {
            coin_id: "solana".into(),
        };
        assert_eq!(err.to_string(), "No usable price points for solana");
    }

    #[test]
    fn invalid_config() {
        let err = CoreError::InvalidConfig("vs_currency must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: vs_currency must not be empty"
        );
    }

    #[test]
    fn invalid_timeframe() {
        let err = CoreError::InvalidTimeframe("1y".into());
        assert_eq!(err.to_string(), "Unknown timeframe: 1y");
    }

    #[test]
    fn widget() {
        let err = CoreError::Widget("container #chart not found".into());
        assert_eq!(err.to_string(), "Chart widget error: container #chart not found");
    }
}

// ── Kind classification ─────────────────────────────────────────────

mod kind {
    use super::*;

    #[test]
    fn fetch_failures() {
        let errors = [
            CoreError::Network("x".into()),
            CoreError::Status {
                status: 500,
                url: String::new(),
            },
            CoreError::Api {
                provider: "CoinGecko".into(),
                message: "x".into(),
            },
            CoreError::Deserialization("x".into()),
            CoreError::Timeout(Duration::from_secs(1)),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::FetchFailed, "{err}");
        }
    }

    #[test]
    fn empty_series_has_its_own_kind() {
        let err = CoreError::EmptySeries {
            coin_id: "solana".into(),
        };
        assert_eq!(err.kind(), ErrorKind::EmptySeries);
    }

    #[test]
    fn config_errors() {
        assert_eq!(CoreError::InvalidConfig("x".into()).kind(), ErrorKind::Config);
        assert_eq!(CoreError::InvalidTimeframe("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn widget_error() {
        assert_eq!(CoreError::Widget("x".into()).kind(), ErrorKind::Widget);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::FetchFailed.to_string(), "FetchFailed");
        assert_eq!(ErrorKind::EmptySeries.to_string(), "EmptySeries");
        assert_eq!(ErrorKind::Config.to_string(), "Config");
        assert_eq!(ErrorKind::Widget.to_string(), "Widget");
    }

    #[test]
    fn kind_serializes_as_plain_string() {
        let json = serde_json::to_string(&ErrorKind::FetchFailed).unwrap();
        assert_eq!(json, "\"FetchFailed\"");
        let back: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorKind::FetchFailed);
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
    }

    #[test]
    fn question_mark_converts_serde_error() {
        fn parse(input: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(input)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(matches!(parse("[1, 2"), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn errors_are_debug() {
        let err = CoreError::Timeout(Duration::from_millis(1500));
        let debug = format!("{err:?}");
        assert!(debug.contains("Timeout"));
    }
}
