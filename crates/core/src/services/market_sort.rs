use std::cmp::Ordering;

use crate::models::market::MarketRecord;
use crate::models::sort::{SortDirection, SortKey, SortSpec};

fn numeric_key(record: &MarketRecord, key: SortKey) -> Option<f64> {
    match key {
        SortKey::Rank => record.market_cap_rank.map(f64::from),
        SortKey::Price => record.current_price,
        SortKey::Change24h => record.price_change_pct_24h,
        SortKey::MarketCap => record.market_cap,
        SortKey::Volume => record.volume_24h,
        SortKey::Name => None,
    }
}

/// Unknowns go last whichever way the column is ordered.
fn compare_optional(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.total_cmp(&y),
            SortDirection::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ordered view over `records` for the table. The records themselves are
/// left untouched; pass a slice or an already filtered view.
///
/// Names compare case-insensitively; numbers compare numerically. The sort is
/// stable, so ties keep upstream (market cap) order.
pub fn sort_records<'a>(
    records: impl IntoIterator<Item = &'a MarketRecord>,
    spec: SortSpec,
) -> Vec<&'a MarketRecord> {
    let mut view: Vec<&MarketRecord> = records.into_iter().collect();

    if spec.key == SortKey::Name {
        // Lowercase once per record rather than once per comparison.
        let mut keyed: Vec<(String, &MarketRecord)> =
            view.into_iter().map(|r| (r.name.to_lowercase(), r)).collect();
        keyed.sort_by(|(a, _), (b, _)| match spec.direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        });
        return keyed.into_iter().map(|(_, r)| r).collect();
    }

    view.sort_by(|a, b| {
        compare_optional(
            numeric_key(a, spec.key),
            numeric_key(b, spec.key),
            spec.direction,
        )
    });
    view
}

/// Records whose name, symbol or id contains `query`, ignoring case.
/// An empty or blank query keeps everything.
pub fn filter_records<'a>(records: &'a [MarketRecord], query: &str) -> Vec<&'a MarketRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.symbol.to_lowercase().contains(&needle)
                || r.id.to_lowercase().contains(&needle)
        })
        .collect()
}
