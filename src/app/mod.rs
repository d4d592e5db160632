//! Batch orchestration: market discovery, worker pool, output writing.

use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::adapter::{load_cohort_assignments, read_trades, write_cohort_tables};
use crate::config::Config;
use crate::domain::{compute_market_odds, CohortAssignments, MarketId, OutcomeMap};
use crate::error::Result;

/// One market's worth of work: paths in, output directory out.
#[derive(Debug, Clone)]
pub struct MarketUnit {
    pub event: String,
    pub market: MarketId,
    pub trades_path: PathBuf,
    pub out_dir: PathBuf,
}

impl MarketUnit {
    /// Display label for logs and progress output.
    pub fn label(&self) -> String {
        format!("{}/{}", self.event, self.market)
    }
}

/// Result of processing one market.
#[derive(Debug)]
pub struct UnitReport {
    pub files: Vec<PathBuf>,
    pub rejected_rows: usize,
}

/// Totals across one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub files_written: usize,
    pub rejected_rows: usize,
}

/// Find every `<event>/<market_id>_trades.csv` under the data directory.
///
/// Events and markets are visited in name order so that runs are
/// reproducible.
pub fn discover_markets(trades_dir: &Path, output_dir: &Path) -> Result<Vec<MarketUnit>> {
    let mut events: Vec<PathBuf> = std::fs::read_dir(trades_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    events.sort();

    let mut units = Vec::new();
    for event_dir in events {
        let event = event_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut trade_files: Vec<PathBuf> = std::fs::read_dir(&event_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with("_trades.csv"))
            })
            .collect();
        trade_files.sort();

        for trades_path in trade_files {
            let market_id = trades_path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix("_trades.csv"))
                .unwrap_or_default()
                .to_string();
            units.push(MarketUnit {
                event: event.clone(),
                market: MarketId::new(market_id),
                trades_path,
                out_dir: output_dir.join(&event),
            });
        }
    }
    Ok(units)
}

/// Process every discovered market over a bounded worker pool.
///
/// Markets are independent, so each runs on its own blocking worker and only
/// the summary is merged. One failing market is skipped with a warning; the
/// batch never aborts because of it. `on_unit_done` fires once per finished
/// market, for progress reporting.
pub async fn run_batch(config: &Config, mut on_unit_done: impl FnMut(&str)) -> Result<BatchSummary> {
    let units = discover_markets(&config.data.trades_dir, &config.data.output_dir)?;
    info!(markets = units.len(), "discovered markets");

    let assignments = load_cohort_assignments(&config.cohorts_file());
    if assignments.is_empty() {
        info!("no cohort table found; deriving cohorts per market from traded volume");
    } else {
        info!(users = assignments.len(), "loaded cohort assignments");
    }

    let jobs = config.jobs().max(1);
    let mut workers = stream::iter(units.into_iter().map(|unit| {
        let assignments = assignments.clone();
        let label = unit.label();
        tokio::task::spawn_blocking(move || (label, process_unit(&unit, &assignments)))
    }))
    .buffer_unordered(jobs);

    let mut summary = BatchSummary::default();
    while let Some(joined) = workers.next().await {
        let (label, outcome) = match joined {
            Ok(result) => result,
            Err(join_error) => {
                warn!(error = %join_error, "market worker failed");
                summary.skipped += 1;
                continue;
            }
        };
        match outcome {
            Ok(report) => {
                summary.processed += 1;
                summary.files_written += report.files.len();
                summary.rejected_rows += report.rejected_rows;
            }
            Err(error) => {
                warn!(market = %label, error = %error, "skipping market");
                summary.skipped += 1;
            }
        }
        on_unit_done(&label);
    }
    Ok(summary)
}

/// Run the engine for one market and write its tables.
pub fn process_unit(unit: &MarketUnit, assignments: &CohortAssignments) -> Result<UnitReport> {
    let rows = read_trades(&unit.trades_path, unit.market.as_str())?;
    let odds = compute_market_odds(
        unit.market.clone(),
        &rows,
        &OutcomeMap::default(),
        assignments,
    )?;

    for diagnostic in &odds.rejected {
        warn!(
            market = %unit.label(),
            row = diagnostic.row,
            error = %diagnostic.error,
            "rejected trade row"
        );
    }

    let files = write_cohort_tables(&unit.out_dir, &odds.market, &odds.points)?;
    debug!(
        market = %unit.label(),
        closing_date = %odds.context.closing_date(),
        files = files.len(),
        "market processed"
    );

    Ok(UnitReport {
        files,
        rejected_rows: odds.rejected.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "timestamp,maker,taker,nonusdc_side,maker_direction,taker_direction,token_amount,usd_amount";

    fn write_market(root: &Path, event: &str, market: &str, body: &str) {
        let dir = root.join(event);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(format!("{market}_trades.csv")),
            format!("{HEADER}\n{body}"),
        )
        .unwrap();
    }

    #[test]
    fn discovery_orders_events_and_markets_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_market(dir.path(), "zeta", "2_trades_x", "");
        write_market(dir.path(), "alpha", "10", "");
        write_market(dir.path(), "alpha", "2", "");

        let units = discover_markets(dir.path(), &dir.path().join("out")).unwrap();
        let labels: Vec<_> = units.iter().map(MarketUnit::label).collect();
        assert_eq!(labels, vec!["alpha/10", "alpha/2", "zeta/2_trades_x"]);
    }

    #[test]
    fn discovery_ignores_files_at_the_event_level() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stray.csv"), "x").unwrap();
        write_market(dir.path(), "ev", "m1", "");

        let units = discover_markets(dir.path(), &dir.path().join("out")).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[tokio::test]
    async fn batch_skips_bad_markets_and_processes_good_ones() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("markets");
        write_market(
            &data,
            "ev",
            "good",
            "2024-11-01 10:00:00,alice,bob,token1,BUY,SELL,100,50\n",
        );
        // Header only: empty trade log, must be skipped with a warning.
        write_market(&data, "ev", "empty", "");

        let config = crate::config::Config {
            data: crate::config::DataConfig {
                trades_dir: data,
                output_dir: dir.path().join("out"),
                cohorts_file: None,
            },
            ..Default::default()
        };

        let mut done = Vec::new();
        let summary = run_batch(&config, |label| done.push(label.to_string()))
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.files_written >= 1);
        assert_eq!(done.len(), 2);
        assert!(dir
            .path()
            .join("out/ev/good_all_users_segment.csv")
            .exists());
    }

    #[tokio::test]
    async fn batch_counts_rejected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("markets");
        write_market(
            &data,
            "ev",
            "m1",
            "2024-11-01 10:00:00,alice,bob,token1,BUY,SELL,100,50\n2024-11-01 11:00:00,,bob,token1,BUY,SELL,10,5\n",
        );

        let config = crate::config::Config {
            data: crate::config::DataConfig {
                trades_dir: data,
                output_dir: dir.path().join("out"),
                cohorts_file: None,
            },
            ..Default::default()
        };

        let summary = run_batch(&config, |_| {}).await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.rejected_rows, 1);
    }
}
