//! Trade-level input types and the per-market day convention.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use super::{TokenId, UserId};

/// Trade direction as recorded per counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Parse a direction field. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn is_buy(self) -> bool {
        matches!(self, Side::Buy)
    }
}

/// Logical outcome of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Yes => "YES",
            Outcome::No => "NO",
        }
    }
}

/// Fixed 1:1 mapping from a market's two instrument tokens to YES/NO.
#[derive(Debug, Clone)]
pub struct OutcomeMap {
    yes_token: TokenId,
    no_token: TokenId,
}

impl OutcomeMap {
    /// Create a mapping from explicit token identifiers.
    pub fn new(yes_token: TokenId, no_token: TokenId) -> Self {
        Self {
            yes_token,
            no_token,
        }
    }

    /// Resolve a raw token field to an outcome, if it names either token.
    pub fn resolve(&self, token: &str) -> Option<Outcome> {
        let token = token.trim();
        if token == self.yes_token.as_str() {
            Some(Outcome::Yes)
        } else if token == self.no_token.as_str() {
            Some(Outcome::No)
        } else {
            None
        }
    }
}

impl Default for OutcomeMap {
    /// The conventional trade-log encoding: `token1` is YES, `token2` is NO.
    fn default() -> Self {
        Self::new(TokenId::new("token1"), TokenId::new("token2"))
    }
}

/// One unvalidated row of a market's trade table.
///
/// Fields hold the raw text from the file; validation happens in the
/// normalizer so that bad rows surface as diagnostics rather than read
/// errors.
#[derive(Debug, Clone, Default)]
pub struct RawTrade {
    /// 1-based line number in the source file, for diagnostics.
    pub row: usize,
    pub timestamp: String,
    pub maker: String,
    pub taker: String,
    pub token: String,
    pub maker_side: String,
    pub taker_side: String,
    pub quantity: String,
    pub usd_amount: String,
}

/// One counterparty's leg of a trade, resolved against the market calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub user: UserId,
    pub outcome: Outcome,
    pub side: Side,
    pub quantity: Decimal,
    pub timestamp: DateTime<Utc>,
    pub day_offset: i64,
}

/// Per-market calendar context.
///
/// The closing date is the latest calendar date appearing anywhere in the
/// market's own trade log; every stage receives it explicitly instead of
/// recomputing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketContext {
    closing_date: NaiveDate,
}

impl MarketContext {
    pub fn new(closing_date: NaiveDate) -> Self {
        Self { closing_date }
    }

    pub fn closing_date(&self) -> NaiveDate {
        self.closing_date
    }

    /// Day index of `date` relative to the closing date, zero or negative
    /// for any date in the log.
    pub fn day_offset(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.closing_date).num_days()
    }
}

/// Parse a trade-log timestamp.
///
/// Accepts unix seconds, RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(secs) = value.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
