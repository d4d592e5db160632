//! Trader cohorts and the assignment table.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{RawTrade, UserId};

/// A named group of users over which exposure is aggregated.
///
/// Variant order matches the output sort order of the segment labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cohort {
    /// Synthetic cohort holding every user; always computed.
    All,
    Large,
    Medium,
    Small,
}

impl Cohort {
    /// Segment label used in output tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Cohort::All => "all_users",
            Cohort::Large => "large",
            Cohort::Medium => "medium",
            Cohort::Small => "small",
        }
    }

    /// The externally assignable cohorts, in output order.
    pub const DECLARED: [Cohort; 3] = [Cohort::Large, Cohort::Medium, Cohort::Small];
}

impl std::fmt::Display for Cohort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a user's total traded value into a declared cohort.
pub fn classify_total_value(value: Decimal) -> Cohort {
    if value >= dec!(1_000_000) {
        Cohort::Large
    } else if value >= dec!(10_000) {
        Cohort::Medium
    } else {
        Cohort::Small
    }
}

/// User-to-cohort assignment table.
///
/// Keys are case-folded once at insertion; [`CohortAssignments::assign`] is
/// the single resolution point for lookups.
#[derive(Debug, Clone, Default)]
pub struct CohortAssignments {
    map: HashMap<String, Cohort>,
}

impl CohortAssignments {
    /// Create an empty table (only the All cohort will aggregate).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Record a user's cohort. The key is matched case-insensitively.
    pub fn insert(&mut self, user_id: &str, cohort: Cohort) {
        self.map.insert(user_id.to_ascii_lowercase(), cohort);
    }

    /// Resolve a user to a declared cohort, or `None` when unassigned.
    pub fn assign(&self, user: &UserId) -> Option<Cohort> {
        self.map.get(&user.folded()).copied()
    }

    /// Build assignments from `(user_id, total_value)` pairs using the
    /// standard thresholds.
    pub fn from_total_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut assignments = Self::new();
        for (user_id, value) in values {
            assignments.insert(user_id.as_ref(), classify_total_value(value));
        }
        assignments
    }

    /// Derive a per-market assignment from summed traded USD volume.
    ///
    /// Both counterparties of each trade accrue its `usd_amount`; rows with
    /// an unparseable amount contribute nothing.
    pub fn derive_from_trades(rows: &[RawTrade]) -> Self {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for row in rows {
            let Ok(usd) = row.usd_amount.trim().parse::<Decimal>() else {
                continue;
            };
            for participant in [row.maker.trim(), row.taker.trim()] {
                if participant.is_empty() {
                    continue;
                }
                *totals
                    .entry(participant.to_ascii_lowercase())
                    .or_insert(Decimal::ZERO) += usd;
            }
        }
        Self::from_total_values(totals)
    }
}
