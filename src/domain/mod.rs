//! The position-accounting and odds-aggregation engine.

mod aggregate;
mod cohort;
mod daily;
mod exposure;
mod ids;
mod ledger;
mod pipeline;
mod position;
mod trade;

pub use aggregate::{aggregate_by_day_and_cohort, odds, CohortOddsPoint};
pub use cohort::{classify_total_value, Cohort, CohortAssignments};
pub use daily::{build_daily_series, DailyDelta};
pub use exposure::{resolve_exposure, resolve_exposures, ExposureRow};
pub use ids::{MarketId, TokenId, UserId};
pub use ledger::{normalize_trades, NormalizedTrades, RowDiagnostic};
pub use pipeline::{compute_market_odds, MarketOdds};
pub use position::{accumulate_positions, PositionRow};
pub use trade::{LedgerEntry, MarketContext, Outcome, OutcomeMap, RawTrade, Side};
