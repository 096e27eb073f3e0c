use crate::models::display::{MarketRow, MarketTable, StatCard};
use crate::models::market::{CoinDetail, MarketRecord};
use crate::models::sort::SortSpec;
use crate::services::formatter::{
    format_currency_or_unknown, format_market_cap_or_unknown, format_percent_change,
    format_rank, format_supply_or_unknown,
};
use crate::services::market_sort::{filter_records, sort_records};

/// Turns normalized records into formatted table rows and stat cards.
pub struct TableService;

impl TableService {
    pub fn new() -> Self {
        Self
    }

    /// The market table: filter by `query`, order by `sort`, format each row.
    /// `records` keeps its upstream order.
    pub fn build_market_table(
        &self,
        records: &[MarketRecord],
        sort: SortSpec,
        query: &str,
    ) -> MarketTable {
        let rows = sort_records(filter_records(records, query), sort)
            .into_iter()
            .map(|r| self.market_row(r))
            .collect();
        MarketTable { sort, rows }
    }

    pub fn market_row(&self, record: &MarketRecord) -> MarketRow {
        MarketRow {
            coin_id: record.id.clone(),
            rank: format_rank(record.market_cap_rank),
            name: record.name.clone(),
            symbol: record.symbol.to_uppercase(),
            image_url: record.image_url.clone(),
            price: format_currency_or_unknown(record.current_price),
            change_24h: format_percent_change(record.price_change_pct_24h),
            market_cap: format_market_cap_or_unknown(record.market_cap),
            volume_24h: format_market_cap_or_unknown(record.volume_24h),
        }
    }

    /// Stat tiles of the coin screen: market cap with its 24h change,
    /// 24h volume, and circulating supply in coin units.
    pub fn coin_stat_cards(&self, detail: &CoinDetail) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Market Cap".to_string(),
                value: format_market_cap_or_unknown(detail.market_cap),
                unit: None,
                change: Some(format_percent_change(detail.market_cap_change_pct_24h)),
            },
            StatCard {
                title: "24h Volume".to_string(),
                value: format_market_cap_or_unknown(detail.volume_24h),
                unit: None,
                change: None,
            },
            StatCard {
                title: "Circulating Supply".to_string(),
                value: format_supply_or_unknown(detail.circulating_supply),
                unit: Some(detail.symbol.to_uppercase()),
                change: None,
            },
        ]
    }
}

impl Default for TableService {
    fn default() -> Self {
        Self::new()
    }
}
