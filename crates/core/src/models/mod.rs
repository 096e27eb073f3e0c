pub mod chart;
pub mod display;
pub mod market;
pub mod price;
pub mod raw;
pub mod settings;
pub mod snapshot;
pub mod sort;
pub mod timeframe;
