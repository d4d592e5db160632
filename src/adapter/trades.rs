//! Trade table reader.

use std::path::Path;

use crate::domain::RawTrade;
use crate::error::MarketError;

use super::csv::{field_at, fields, Header};

const REQUIRED_COLUMNS: [&str; 7] = [
    "timestamp",
    "maker",
    "taker",
    "nonusdc_side",
    "maker_direction",
    "taker_direction",
    "token_amount",
];

/// Read one market's `<market_id>_trades.csv` into raw rows.
///
/// Validates the header and materializes every data line; field validation
/// is the normalizer's job so that bad rows become per-row diagnostics
/// instead of a dead market. An unreadable or empty file is a
/// [`MarketError`] that skips the market.
pub fn read_trades(path: &Path, market: &str) -> Result<Vec<RawTrade>, MarketError> {
    let content = std::fs::read_to_string(path).map_err(|source| MarketError::ReadTrades {
        market: market.to_string(),
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = content.lines();
    let Some(header_line) = lines.next() else {
        return Err(MarketError::EmptyTradeLog {
            market: market.to_string(),
            path: path.to_path_buf(),
        });
    };
    let header = Header::parse(header_line);
    for column in REQUIRED_COLUMNS {
        if header.index_of(column).is_none() {
            return Err(MarketError::MissingColumn {
                market: market.to_string(),
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let timestamp = header.index_of("timestamp");
    let maker = header.index_of("maker");
    let taker = header.index_of("taker");
    let token = header.index_of("nonusdc_side");
    let maker_side = header.index_of("maker_direction");
    let taker_side = header.index_of("taker_direction");
    let quantity = header.index_of("token_amount");
    let usd_amount = header.index_of("usd_amount");

    let mut rows = Vec::new();
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts = fields(line);
        rows.push(RawTrade {
            row: offset + 2,
            timestamp: field_at(&parts, timestamp).to_string(),
            maker: field_at(&parts, maker).to_string(),
            taker: field_at(&parts, taker).to_string(),
            token: field_at(&parts, token).to_string(),
            maker_side: field_at(&parts, maker_side).to_string(),
            taker_side: field_at(&parts, taker_side).to_string(),
            quantity: field_at(&parts, quantity).to_string(),
            usd_amount: field_at(&parts, usd_amount).to_string(),
        });
    }

    if rows.is_empty() {
        return Err(MarketError::EmptyTradeLog {
            market: market.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}
