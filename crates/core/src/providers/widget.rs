use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::timeframe::Timeframe;

/// Bar size of the trading chart, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution(pub u32);

impl Resolution {
    pub fn for_timeframe(timeframe: Timeframe) -> Self {
        Resolution(timeframe.widget_resolution_minutes())
    }

    /// The widget's own string form ("15", "60", "240").
    pub fn as_widget_value(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Everything the embeddable trading chart is configured with on mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Exchange-qualified symbol, e.g. "BINANCE:SOLUSD"
    pub symbol: String,
    pub resolution: Resolution,
    pub theme: Theme,
    pub locale: String,
    /// IANA zone name; the host usually passes the viewer's zone
    pub timezone: String,
    /// Indicator studies drawn on top of the candles
    pub studies: Vec<String>,
    pub toolbar_bg: String,
    pub enable_publishing: bool,
    pub allow_symbol_change: bool,
    pub save_image: bool,
    pub hide_side_toolbar: bool,
}

impl WidgetConfig {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            resolution: Resolution::for_timeframe(timeframe),
            theme: Theme::Light,
            locale: "en".to_string(),
            timezone: "Etc/UTC".to_string(),
            studies: vec![
                "RSI@tv-basicstudies".to_string(),
                "MASimple@tv-basicstudies".to_string(),
            ],
            toolbar_bg: "#f1f3f6".to_string(),
            enable_publishing: false,
            allow_symbol_change: false,
            save_image: false,
            hide_side_toolbar: false,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }
}

/// Opaque third-party trading chart, hosted by the frontend.
///
/// The core never draws the chart; it only decides when to mount it, which
/// resolution to show and when to tear it down.
pub trait ChartWidget {
    type Handle;

    fn mount(&mut self, container: &str, config: &WidgetConfig) -> Result<Self::Handle, CoreError>;

    fn set_resolution(&mut self, handle: &mut Self::Handle, resolution: Resolution)
        -> Result<(), CoreError>;

    fn unmount(&mut self, handle: Self::Handle) -> Result<(), CoreError>;
}
