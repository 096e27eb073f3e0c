use crate::models::chart::{ChartPoint, ChartSeries};
use crate::models::price::PricePoint;
use crate::models::timeframe::{TickGranularity, Timeframe};
use crate::services::formatter::format_price_label;

const TIME_OF_DAY_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Generates chart-ready series from normalized price points.
///
/// The core computes all labels and bounds; the frontend only renders.
/// Labels are rendered in UTC; localizing them is the frontend's call.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build a line chart for `timeframe` from an ascending series.
    ///
    /// An empty input gives an empty, non-renderable series rather than an error.
    pub fn build_series(&self, points: &[PricePoint], timeframe: Timeframe) -> ChartSeries {
        let format = match timeframe.tick_granularity() {
            TickGranularity::TimeOfDay => TIME_OF_DAY_FORMAT,
            TickGranularity::Date => DATE_FORMAT,
        };

        let chart_points: Vec<ChartPoint> = points
            .iter()
            .map(|p| ChartPoint {
                timestamp: p.timestamp,
                label: p.timestamp.format(format).to_string(),
                price: p.price,
                price_label: format_price_label(p.price),
            })
            .collect();

        let min_price = points.iter().map(|p| p.price).reduce(f64::min);
        let max_price = points.iter().map(|p| p.price).reduce(f64::max);

        ChartSeries {
            timeframe,
            points: chart_points,
            min_price,
            max_price,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
