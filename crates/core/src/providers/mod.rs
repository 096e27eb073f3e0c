pub mod traits;
pub mod widget;

// API provider implementations
pub mod coingecko;
