//! Handler for the `show` command.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::{load_cohort_assignments, load_reference_odds, read_trades};
use crate::domain::{compute_market_odds, Cohort, CohortOddsPoint, MarketId, OutcomeMap};
use crate::error::Result;

use super::command::ShowArgs;
use super::{load_config, output};

#[derive(Tabled)]
struct OddsRow {
    #[tabled(rename = "day")]
    day_offset: i64,
    #[tabled(rename = "agg_yes")]
    agg_yes: Decimal,
    #[tabled(rename = "agg_no")]
    agg_no: Decimal,
    #[tabled(rename = "odds")]
    odds: Decimal,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "day")]
    day_offset: i64,
    #[tabled(rename = "engine odds")]
    engine: String,
    #[tabled(rename = "price odds")]
    price: String,
}

/// Execute the show command.
pub fn execute(args: &ShowArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(dir) = &args.data_dir {
        config.data.trades_dir = dir.clone();
    }
    if let Some(path) = &args.cohorts {
        config.data.cohorts_file = Some(path.clone());
    }

    let event_dir = config.data.trades_dir.join(&args.event);
    let trades_path = event_dir.join(format!("{}_trades.csv", args.market));
    let prices_path = event_dir.join("polymarket_prices.csv");

    let rows = read_trades(&trades_path, &args.market)?;
    let assignments = load_cohort_assignments(&config.cohorts_file());
    let odds = compute_market_odds(
        MarketId::new(&args.market),
        &rows,
        &OutcomeMap::default(),
        &assignments,
    )?;
    let reference = load_reference_odds(&prices_path, &odds.context);

    let cohort: Cohort = args.cohort.into();
    let points: Vec<&CohortOddsPoint> =
        odds.points.iter().filter(|p| p.cohort == cohort).collect();

    if output::is_json() {
        output::json_output(json!({
            "event": args.event,
            "market": args.market,
            "closing_date": odds.context.closing_date().to_string(),
            "cohort": cohort.as_str(),
            "rejected_rows": odds.rejected.len(),
            "points": points
                .iter()
                .map(|p| json!({
                    "day_offset": p.day_offset,
                    "agg_yes": p.agg_yes.to_string(),
                    "agg_no": p.agg_no.to_string(),
                    "odds": p.odds.to_string(),
                }))
                .collect::<Vec<_>>(),
            "price_odds": reference
                .iter()
                .map(|r| json!({
                    "day_offset": r.day_offset,
                    "price": r.price_odds.to_string(),
                }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Market", format!("{}/{}", args.event, args.market));
    output::field("Closing date", odds.context.closing_date());
    output::field("Cohort", cohort.as_str());
    if !odds.rejected.is_empty() {
        output::warning(&format!("{} trade rows rejected", odds.rejected.len()));
    }

    if points.is_empty() {
        output::note("no rows for this cohort");
        return Ok(());
    }

    output::section("Investment-weighted odds");
    let table = Table::new(points.iter().map(|p| OddsRow {
        day_offset: p.day_offset,
        agg_yes: p.agg_yes.round_dp(2),
        agg_no: p.agg_no.round_dp(2),
        odds: p.odds.round_dp(4),
    }))
    .to_string();
    output::lines(&table);

    if cohort == Cohort::All && !reference.is_empty() {
        let price_by_day: BTreeMap<i64, Decimal> = reference
            .iter()
            .map(|r| (r.day_offset, r.price_odds))
            .collect();

        output::section("Engine vs market price");
        let table = Table::new(points.iter().map(|p| ComparisonRow {
            day_offset: p.day_offset,
            engine: p.odds.round_dp(4).to_string(),
            price: price_by_day
                .get(&p.day_offset)
                .map(|price| price.round_dp(4).to_string())
                .unwrap_or_else(|| "-".to_string()),
        }))
        .to_string();
        output::lines(&table);
    }

    Ok(())
}
