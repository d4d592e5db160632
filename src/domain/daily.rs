//! Daily per-user, per-token buy/sell totals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{LedgerEntry, Outcome, UserId};

/// Net daily token flow for one `(user, outcome, day)` combination.
///
/// Only combinations with at least one ledger entry materialize; there is no
/// calendar expansion at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyDelta {
    pub user: UserId,
    pub outcome: Outcome,
    pub day_offset: i64,
    pub daily_buy: Decimal,
    pub daily_sell: Decimal,
    /// Latest trade timestamp of the day, kept for deterministic ordering.
    pub last_traded_at: DateTime<Utc>,
}

impl DailyDelta {
    /// Signed net flow for the day.
    pub fn net(&self) -> Decimal {
        self.daily_buy - self.daily_sell
    }
}

/// Collapse ledger entries into one row per `(user, outcome, day_offset)`.
///
/// Output is sorted by that key, so downstream running sums can be computed
/// in a single pass.
pub fn build_daily_series(entries: &[LedgerEntry]) -> Vec<DailyDelta> {
    let mut groups: BTreeMap<(UserId, Outcome, i64), (Decimal, Decimal, DateTime<Utc>)> =
        BTreeMap::new();

    for entry in entries {
        let key = (entry.user.clone(), entry.outcome, entry.day_offset);
        let slot = groups
            .entry(key)
            .or_insert((Decimal::ZERO, Decimal::ZERO, entry.timestamp));
        if entry.side.is_buy() {
            slot.0 += entry.quantity;
        } else {
            slot.1 += entry.quantity;
        }
        if entry.timestamp > slot.2 {
            slot.2 = entry.timestamp;
        }
    }

    groups
        .into_iter()
        .map(
            |((user, outcome, day_offset), (daily_buy, daily_sell, last_traded_at))| DailyDelta {
                user,
                outcome,
                day_offset,
                daily_buy,
                daily_sell,
                last_traded_at,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::Side;

    fn entry(user: &str, outcome: Outcome, side: Side, qty: Decimal, day: i64, hour: u32) -> LedgerEntry {
        LedgerEntry {
            user: UserId::new(user),
            outcome,
            side,
            quantity: qty,
            timestamp: chrono::NaiveDate::from_ymd_opt(2024, 11, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap()
                .and_utc(),
            day_offset: day,
        }
    }

    #[test]
    fn buys_and_sells_accumulate_separately() {
        let entries = vec![
            entry("alice", Outcome::Yes, Side::Buy, dec!(30), -2, 9),
            entry("alice", Outcome::Yes, Side::Buy, dec!(20), -2, 10),
            entry("alice", Outcome::Yes, Side::Sell, dec!(15), -2, 11),
        ];

        let series = build_daily_series(&entries);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].daily_buy, dec!(50));
        assert_eq!(series[0].daily_sell, dec!(15));
        assert_eq!(series[0].net(), dec!(35));
    }

    #[test]
    fn distinct_days_and_outcomes_stay_separate() {
        let entries = vec![
            entry("alice", Outcome::Yes, Side::Buy, dec!(10), -3, 9),
            entry("alice", Outcome::No, Side::Buy, dec!(10), -3, 9),
            entry("alice", Outcome::Yes, Side::Buy, dec!(10), -1, 9),
        ];

        let series = build_daily_series(&entries);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn output_is_sorted_by_user_outcome_day() {
        let entries = vec![
            entry("bob", Outcome::Yes, Side::Buy, dec!(1), 0, 9),
            entry("alice", Outcome::Yes, Side::Buy, dec!(1), -1, 9),
            entry("alice", Outcome::Yes, Side::Buy, dec!(1), -4, 9),
        ];

        let series = build_daily_series(&entries);
        let keys: Vec<_> = series
            .iter()
            .map(|d| (d.user.as_str().to_string(), d.day_offset))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("alice".to_string(), -4),
                ("alice".to_string(), -1),
                ("bob".to_string(), 0)
            ]
        );
    }

    #[test]
    fn latest_timestamp_of_the_day_is_retained() {
        let entries = vec![
            entry("alice", Outcome::Yes, Side::Buy, dec!(1), -2, 14),
            entry("alice", Outcome::Yes, Side::Sell, dec!(1), -2, 9),
        ];

        let series = build_daily_series(&entries);
        assert_eq!(series[0].last_traded_at.format("%H").to_string(), "14");
    }
}
