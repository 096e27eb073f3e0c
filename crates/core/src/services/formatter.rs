//! Human-readable currency and percentage strings.
//!
//! All functions are pure. Values that can't be shown (missing or non-finite)
//! render as [`UNKNOWN`].

use crate::models::display::PercentDisplay;
use crate::models::price::Trend;

/// Placeholder for a value the upstream did not report.
pub const UNKNOWN: &str = "N/A";

/// Insert `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Full currency amount with separators and exactly two decimals: `"$1,234.50"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return UNKNOWN.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Compact amount for market caps and volumes.
///
/// Thresholds are checked largest first: `$2.30T`, `$1.50B`, `$12.00M`.
/// Below a million the plain amount is shown: `$999.00`.
pub fn format_market_cap(value: f64) -> String {
    if !value.is_finite() {
        return UNKNOWN.to_string();
    }
    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${value:.2}")
    }
}

/// Unsigned magnitude with two decimals; the sign travels in the trend.
pub fn format_percent_change(percent: Option<f64>) -> PercentDisplay {
    match percent {
        Some(p) if p.is_finite() => PercentDisplay::Known {
            magnitude: format!("{:.2}%", p.abs()),
            trend: Trend::of(p),
        },
        _ => PercentDisplay::Unknown,
    }
}

/// Whole units with separators: `"123,456,789"`.
pub fn format_supply(value: f64) -> String {
    if !value.is_finite() {
        return UNKNOWN.to_string();
    }
    let rounded = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rounded))
}

/// Chart axis and tooltip price: `"$142.07"`.
pub fn format_price_label(value: f64) -> String {
    if !value.is_finite() {
        return UNKNOWN.to_string();
    }
    format!("${value:.2}")
}

pub fn format_currency_or_unknown(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn format_market_cap_or_unknown(value: Option<f64>) -> String {
    value.map(format_market_cap).unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn format_supply_or_unknown(value: Option<f64>) -> String {
    value.map(format_supply).unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn format_rank(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| UNKNOWN.to_string())
}
