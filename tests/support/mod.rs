#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oddsflow::domain::{LedgerEntry, Outcome, RawTrade, Side, UserId};

pub const TRADES_HEADER: &str =
    "timestamp,maker,taker,nonusdc_side,maker_direction,taker_direction,token_amount,usd_amount";

/// Build a ledger entry at a given day offset; the timestamp only needs to
/// be a plausible instant within that day.
pub fn ledger_entry(user: &str, outcome: Outcome, side: Side, quantity: Decimal, day_offset: i64) -> LedgerEntry {
    let date = NaiveDate::from_ymd_opt(2024, 11, 5)
        .unwrap()
        .checked_add_signed(chrono::Duration::days(day_offset))
        .unwrap();
    LedgerEntry {
        user: UserId::new(user),
        outcome,
        side,
        quantity,
        timestamp: date.and_hms_opt(12, 0, 0).unwrap().and_utc(),
        day_offset,
    }
}

/// Build a raw trade row the way the trade-table reader would.
pub fn raw_trade(
    row: usize,
    timestamp: &str,
    maker: &str,
    taker: &str,
    token: &str,
    maker_side: &str,
    taker_side: &str,
    quantity: &str,
    usd_amount: &str,
) -> RawTrade {
    RawTrade {
        row,
        timestamp: timestamp.into(),
        maker: maker.into(),
        taker: taker.into(),
        token: token.into(),
        maker_side: maker_side.into(),
        taker_side: taker_side.into(),
        quantity: quantity.into(),
        usd_amount: usd_amount.into(),
    }
}

/// Write a `<market>_trades.csv` fixture under `<root>/<event>/`.
pub fn write_market_fixture(root: &Path, event: &str, market: &str, data_lines: &[&str]) -> PathBuf {
    let dir = root.join(event);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{market}_trades.csv"));
    let mut content = String::from(TRADES_HEADER);
    content.push('\n');
    for line in data_lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}
