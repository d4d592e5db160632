//! Reference odds loader over the market's price history.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::DateTime;
use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::MarketContext;

use super::csv::{fields, Header};

/// Last observed YES price for one day, as quoted odds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePoint {
    pub day_offset: i64,
    pub price_odds: Decimal,
}

/// Load `polymarket_prices.csv` (`timestamp, price, outcome_label`) into a
/// day-indexed odds series.
///
/// Keeps rows with a nonempty outcome label, maps timestamps onto the
/// market's own day convention, drops days after close, and keeps the last
/// observed price per day. A missing file is an empty series, not an error.
pub fn load_reference_odds(path: &Path, context: &MarketContext) -> Vec<ReferencePoint> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };

    let mut lines = content.lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header = Header::parse(header_line);
    let (Some(ts_col), Some(price_col), Some(label_col)) = (
        header.index_of("timestamp"),
        header.index_of("price"),
        header.index_of("outcome_label"),
    ) else {
        warn!(path = %path.display(), "price history is missing required columns");
        return Vec::new();
    };

    // Later rows overwrite earlier ones, leaving the end-of-day price.
    let mut last_per_day: BTreeMap<i64, Decimal> = BTreeMap::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let parts = fields(line);
        let label = parts.get(label_col).copied().unwrap_or("");
        if label.is_empty() {
            continue;
        }
        let Some(timestamp) = parts
            .get(ts_col)
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
        else {
            continue;
        };
        let Some(price) = parts.get(price_col).and_then(|v| v.parse::<Decimal>().ok()) else {
            continue;
        };

        let day_offset = context.day_offset(timestamp.date_naive());
        if day_offset > 0 {
            continue;
        }
        last_per_day.insert(day_offset, price);
    }

    last_per_day
        .into_iter()
        .map(|(day_offset, price_odds)| ReferencePoint {
            day_offset,
            price_odds,
        })
        .collect()
}
