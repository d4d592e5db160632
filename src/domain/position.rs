//! Signed cumulative positions with forward carry.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{DailyDelta, Outcome, UserId};

/// Signed cumulative position of one user on one day, both outcome tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRow {
    pub user: UserId,
    pub day_offset: i64,
    pub yes_position: Decimal,
    pub no_position: Decimal,
}

/// Accumulate daily net flows into per-day signed positions.
///
/// For each `(user, outcome)` the cumulative value at day `d` is the running
/// sum of `net` over all days `<= d`. Each user gets one row for every day
/// from their first active day through day 0, so positions carry across
/// inactive days up to the market close.
///
/// Carry rule: a cumulative value of exactly zero is treated the same as "no
/// trade today" and is forward-filled by the prior nonzero cumulative value.
/// Closing a position back to zero is therefore indistinguishable from going
/// quiet. Downstream aggregation counts carried users as active, and tests
/// pin this behavior; changing it changes every published odds series.
pub fn accumulate_positions(daily: &[DailyDelta]) -> Vec<PositionRow> {
    // Cumulative values at each user's active days, per outcome.
    let mut active: BTreeMap<UserId, BTreeMap<i64, [Option<Decimal>; 2]>> = BTreeMap::new();

    let mut current: Option<(&UserId, Outcome)> = None;
    let mut running = Decimal::ZERO;
    for delta in daily {
        // `daily` is sorted by (user, outcome, day), so the running sum
        // resets exactly at each (user, outcome) boundary.
        if current != Some((&delta.user, delta.outcome)) {
            current = Some((&delta.user, delta.outcome));
            running = Decimal::ZERO;
        }
        running += delta.net();
        let slot = active
            .entry(delta.user.clone())
            .or_default()
            .entry(delta.day_offset)
            .or_insert([None, None]);
        slot[token_index(delta.outcome)] = Some(running);
    }

    let mut rows = Vec::new();
    for (user, days) in active {
        let Some(first_day) = days.keys().next().copied() else {
            continue;
        };
        let mut last_yes = Decimal::ZERO;
        let mut last_no = Decimal::ZERO;
        for day_offset in first_day..=0 {
            let cums = days.get(&day_offset);
            let yes_position = carry(cums.and_then(|c| c[token_index(Outcome::Yes)]), &mut last_yes);
            let no_position = carry(cums.and_then(|c| c[token_index(Outcome::No)]), &mut last_no);
            rows.push(PositionRow {
                user: user.clone(),
                day_offset,
                yes_position,
                no_position,
            });
        }
    }
    rows
}

fn token_index(outcome: Outcome) -> usize {
    match outcome {
        Outcome::Yes => 0,
        Outcome::No => 1,
    }
}

fn carry(cumulative: Option<Decimal>, last_nonzero: &mut Decimal) -> Decimal {
    match cumulative {
        Some(value) if !value.is_zero() => {
            *last_nonzero = value;
            value
        }
        _ => *last_nonzero,
    }
}
