//! Per-market composition of the engine stages.

use crate::error::MarketError;

use super::{
    accumulate_positions, aggregate_by_day_and_cohort, build_daily_series, normalize_trades,
    resolve_exposures, CohortAssignments, CohortOddsPoint, MarketContext, MarketId, OutcomeMap,
    RawTrade, RowDiagnostic,
};

/// Complete engine output for one market.
#[derive(Debug)]
pub struct MarketOdds {
    pub market: MarketId,
    pub context: MarketContext,
    /// Odds table sorted by `(day_offset, cohort)`.
    pub points: Vec<CohortOddsPoint>,
    /// Rows the normalizer rejected, for reporting.
    pub rejected: Vec<RowDiagnostic>,
}

/// Run stages 1-5 for one market.
///
/// When `external` assignments are empty, an equivalent per-market table is
/// derived from the trade log's USD volume, so declared cohorts always
/// aggregate. A market where no row resolves into a ledger entry is a
/// [`MarketError::NoLedgerEntries`]; the caller skips it and moves on.
pub fn compute_market_odds(
    market: MarketId,
    rows: &[RawTrade],
    outcomes: &OutcomeMap,
    external: &CohortAssignments,
) -> Result<MarketOdds, MarketError> {
    let normalized = normalize_trades(rows, outcomes);
    let Some(context) = normalized.context else {
        return Err(MarketError::NoLedgerEntries {
            market: market.to_string(),
        });
    };

    let assignments = if external.is_empty() {
        CohortAssignments::derive_from_trades(rows)
    } else {
        external.clone()
    };

    let daily = build_daily_series(&normalized.entries);
    let positions = accumulate_positions(&daily);
    let exposures = resolve_exposures(&positions);
    let points = aggregate_by_day_and_cohort(&exposures, &assignments);

    Ok(MarketOdds {
        market,
        context,
        points,
        rejected: normalized.rejected,
    })
}
