pub mod chart_service;
pub mod feeds;
pub mod formatter;
pub mod market_sort;
pub mod normalizer;
pub mod poller;
pub mod table_service;
pub mod trading_service;
