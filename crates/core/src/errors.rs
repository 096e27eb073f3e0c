use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the entire crypto-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("No usable price points for {coin_id}")]
    EmptySeries { coin_id: String },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown timeframe: {0}")]
    InvalidTimeframe(String),

    // ── Chart widget ────────────────────────────────────────────────
    #[error("Chart widget error: {0}")]
    Widget(String),
}

/// Coarse classification of a [`CoreError`], handed to poller error callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Network failure, non-2xx status, timeout or malformed payload.
    FetchFailed,
    /// The response was valid but held zero usable data points.
    EmptySeries,
    Config,
    Widget,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FetchFailed => write!(f, "FetchFailed"),
            ErrorKind::EmptySeries => write!(f, "EmptySeries"),
            ErrorKind::Config => write!(f, "Config"),
            ErrorKind::Widget => write!(f, "Widget"),
        }
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Network(_)
            | CoreError::Status { .. }
            | CoreError::Api { .. }
            | CoreError::Deserialization(_)
            | CoreError::Timeout(_) => ErrorKind::FetchFailed,
            CoreError::EmptySeries { .. } => ErrorKind::EmptySeries,
            CoreError::InvalidConfig(_) | CoreError::InvalidTimeframe(_) => ErrorKind::Config,
            CoreError::Widget(_) => ErrorKind::Widget,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

/// Strip the query string from anything that looks like a URL so API keys
/// and request parameters never end up in logs.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            let url = e
                .url()
                .map(|u| redact_query(u.as_str()))
                .unwrap_or_default();
            return CoreError::Status {
                status: status.as_u16(),
                url,
            };
        }
        if e.is_decode() {
            return CoreError::Deserialization(redact_query(&e.to_string()));
        }
        CoreError::Network(redact_query(&e.to_string()))
    }
}
