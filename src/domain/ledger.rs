//! Trade normalization: raw rows to per-counterparty ledger entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::RowError;

use super::{LedgerEntry, MarketContext, Outcome, OutcomeMap, RawTrade, Side, UserId};
use super::trade::parse_timestamp;

/// A rejected row together with the reason, for per-row reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    pub row: usize,
    pub error: RowError,
}

/// Result of normalizing one market's trade table.
#[derive(Debug)]
pub struct NormalizedTrades {
    /// Two entries per accepted trade, one per counterparty.
    pub entries: Vec<LedgerEntry>,
    /// One diagnostic per rejected row.
    pub rejected: Vec<RowDiagnostic>,
    /// Calendar context derived from the accepted rows; `None` when nothing
    /// resolved.
    pub context: Option<MarketContext>,
}

struct ParsedTrade {
    timestamp: DateTime<Utc>,
    outcome: Outcome,
    quantity: Decimal,
    maker: UserId,
    maker_side: Side,
    taker: UserId,
    taker_side: Side,
}

/// Normalize a market's trade rows into ledger entries.
///
/// Each accepted trade yields one entry per counterparty, with the side
/// taken from that counterparty's own direction field. A row with any
/// unresolvable required field is rejected as a unit and reported in
/// `rejected`; it never aborts the market. The closing date is the latest
/// calendar date among accepted rows, so `day_offset` is always `<= 0`.
pub fn normalize_trades(rows: &[RawTrade], outcomes: &OutcomeMap) -> NormalizedTrades {
    let mut parsed = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for raw in rows {
        match parse_row(raw, outcomes) {
            Ok(trade) => parsed.push(trade),
            Err(error) => rejected.push(RowDiagnostic {
                row: raw.row,
                error,
            }),
        }
    }

    let context = parsed
        .iter()
        .map(|t| t.timestamp.date_naive())
        .max()
        .map(MarketContext::new);

    let mut entries = Vec::with_capacity(parsed.len() * 2);
    if let Some(ctx) = context {
        for trade in parsed {
            let day_offset = ctx.day_offset(trade.timestamp.date_naive());
            entries.push(LedgerEntry {
                user: trade.maker,
                outcome: trade.outcome,
                side: trade.maker_side,
                quantity: trade.quantity,
                timestamp: trade.timestamp,
                day_offset,
            });
            entries.push(LedgerEntry {
                user: trade.taker,
                outcome: trade.outcome,
                side: trade.taker_side,
                quantity: trade.quantity,
                timestamp: trade.timestamp,
                day_offset,
            });
        }
    }

    NormalizedTrades {
        entries,
        rejected,
        context,
    }
}

fn parse_row(raw: &RawTrade, outcomes: &OutcomeMap) -> Result<ParsedTrade, RowError> {
    let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| RowError::BadTimestamp {
        value: raw.timestamp.trim().to_string(),
    })?;

    let outcome = outcomes
        .resolve(&raw.token)
        .ok_or_else(|| RowError::UnknownToken {
            value: raw.token.trim().to_string(),
        })?;

    let quantity: Decimal = raw
        .quantity
        .trim()
        .parse()
        .ok()
        .filter(|q: &Decimal| !q.is_sign_negative())
        .ok_or_else(|| RowError::BadQuantity {
            value: raw.quantity.trim().to_string(),
        })?;

    let maker = participant(&raw.maker, "maker")?;
    let maker_side = side(&raw.maker_side, "maker")?;
    let taker = participant(&raw.taker, "taker")?;
    let taker_side = side(&raw.taker_side, "taker")?;

    Ok(ParsedTrade {
        timestamp,
        outcome,
        quantity,
        maker,
        maker_side,
        taker,
        taker_side,
    })
}

fn participant(value: &str, role: &'static str) -> Result<UserId, RowError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RowError::MissingParticipant { role });
    }
    Ok(UserId::new(value))
}

fn side(value: &str, role: &'static str) -> Result<Side, RowError> {
    Side::parse(value).ok_or_else(|| RowError::BadSide {
        role,
        value: value.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ts: &str, maker: &str, taker: &str, token: &str, ms: &str, ts_side: &str, qty: &str) -> RawTrade {
        RawTrade {
            row: 2,
            timestamp: ts.into(),
            maker: maker.into(),
            taker: taker.into(),
            token: token.into(),
            maker_side: ms.into(),
            taker_side: ts_side.into(),
            quantity: qty.into(),
            usd_amount: String::new(),
        }
    }

    #[test]
    fn each_trade_yields_one_entry_per_counterparty() {
        let rows = vec![row(
            "2024-11-03 10:00:00",
            "alice",
            "bob",
            "token1",
            "BUY",
            "SELL",
            "100",
        )];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());

        assert_eq!(normalized.entries.len(), 2);
        assert!(normalized.rejected.is_empty());

        let maker = &normalized.entries[0];
        assert_eq!(maker.user, UserId::new("alice"));
        assert_eq!(maker.side, Side::Buy);
        assert_eq!(maker.outcome, Outcome::Yes);

        let taker = &normalized.entries[1];
        assert_eq!(taker.user, UserId::new("bob"));
        assert_eq!(taker.side, Side::Sell);
    }

    #[test]
    fn closing_date_is_latest_trade_date() {
        let rows = vec![
            row("2024-11-01 09:00:00", "a", "b", "token1", "BUY", "SELL", "5"),
            row("2024-11-04 09:00:00", "a", "b", "token2", "SELL", "BUY", "5"),
        ];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());
        let ctx = normalized.context.unwrap();

        assert_eq!(
            ctx.closing_date(),
            chrono::NaiveDate::from_ymd_opt(2024, 11, 4).unwrap()
        );
        assert_eq!(normalized.entries[0].day_offset, -3);
        assert_eq!(normalized.entries[2].day_offset, 0);
    }

    #[test]
    fn missing_participant_rejects_the_whole_row() {
        let rows = vec![row("2024-11-01", "", "bob", "token1", "BUY", "SELL", "5")];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());

        assert!(normalized.entries.is_empty());
        assert_eq!(normalized.rejected.len(), 1);
        assert_eq!(
            normalized.rejected[0].error,
            RowError::MissingParticipant { role: "maker" }
        );
    }

    #[test]
    fn negative_quantity_is_rejected_not_coerced() {
        let rows = vec![row("2024-11-01", "a", "b", "token1", "BUY", "SELL", "-3")];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());

        assert!(normalized.entries.is_empty());
        assert!(matches!(
            normalized.rejected[0].error,
            RowError::BadQuantity { .. }
        ));
    }

    #[test]
    fn zero_quantity_rows_are_kept() {
        let rows = vec![row("2024-11-01", "a", "b", "token1", "BUY", "SELL", "0")];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());
        assert_eq!(normalized.entries.len(), 2);
    }

    #[test]
    fn unknown_token_and_bad_side_are_reported() {
        let rows = vec![
            row("2024-11-01", "a", "b", "usdc", "BUY", "SELL", "5"),
            row("2024-11-01", "a", "b", "token1", "HODL", "SELL", "5"),
        ];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());

        assert_eq!(normalized.rejected.len(), 2);
        assert!(matches!(
            normalized.rejected[0].error,
            RowError::UnknownToken { .. }
        ));
        assert!(matches!(
            normalized.rejected[1].error,
            RowError::BadSide { role: "maker", .. }
        ));
    }

    #[test]
    fn bad_rows_do_not_shift_the_closing_date() {
        let rows = vec![
            row("2024-11-01 09:00:00", "a", "b", "token1", "BUY", "SELL", "5"),
            // Later date but unparseable quantity: must not become day zero.
            row("2024-11-09 09:00:00", "a", "b", "token1", "BUY", "SELL", "lots"),
        ];
        let normalized = normalize_trades(&rows, &OutcomeMap::default());

        let ctx = normalized.context.unwrap();
        assert_eq!(
            ctx.closing_date(),
            chrono::NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
        );
    }

    #[test]
    fn empty_input_has_no_context() {
        let normalized = normalize_trades(&[], &OutcomeMap::default());
        assert!(normalized.context.is_none());
        assert!(normalized.entries.is_empty());
    }
}
