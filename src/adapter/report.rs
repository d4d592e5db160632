//! Output table writer.

use std::path::{Path, PathBuf};

use crate::domain::{Cohort, CohortOddsPoint, MarketId};

/// Write one CSV per cohort with rows for that cohort.
///
/// Files are named `{market_id}_{segment}_segment.csv` under `out_dir`, with
/// header `day_offset,segment,agg_yes,agg_no,odds`. Rows keep the engine's
/// `(day_offset, cohort)` order, so identical input produces byte-identical
/// files. Returns the paths written.
pub fn write_cohort_tables(
    out_dir: &Path,
    market: &MarketId,
    points: &[CohortOddsPoint],
) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for cohort in [Cohort::All, Cohort::Large, Cohort::Medium, Cohort::Small] {
        let mut csv = String::new();
        for point in points.iter().filter(|p| p.cohort == cohort) {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                point.day_offset,
                cohort.as_str(),
                point.agg_yes,
                point.agg_no,
                point.odds
            ));
        }
        if csv.is_empty() {
            continue;
        }

        let path = out_dir.join(format!("{}_{}_segment.csv", market, cohort.as_str()));
        let content = format!("day_offset,segment,agg_yes,agg_no,odds\n{csv}");
        std::fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}
