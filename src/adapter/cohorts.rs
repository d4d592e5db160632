//! External cohort-assignment table loader.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{classify_total_value, CohortAssignments};

use super::csv::{fields, Header};

/// Load `all_users_analysis.csv` (`user_id, cumulative_total_value_max`).
///
/// A missing file, missing columns, or unusable rows degrade to an empty or
/// partial table with a warning; the batch then falls back to per-market
/// derivation from traded volume.
pub fn load_cohort_assignments(path: &Path) -> CohortAssignments {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return CohortAssignments::new(),
    };

    let mut lines = content.lines();
    let Some(header_line) = lines.next() else {
        return CohortAssignments::new();
    };
    let header = Header::parse(header_line);
    let (Some(user_col), Some(value_col)) = (
        header.index_of("user_id"),
        header.index_of("cumulative_total_value_max"),
    ) else {
        warn!(
            path = %path.display(),
            "cohort table is missing required columns, skipping"
        );
        return CohortAssignments::new();
    };

    let mut assignments = CohortAssignments::new();
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts = fields(line);
        let user_id = parts.get(user_col).copied().unwrap_or("");
        let value = parts
            .get(value_col)
            .and_then(|v| v.parse::<Decimal>().ok());
        match (user_id.is_empty(), value) {
            (false, Some(value)) => assignments.insert(user_id, classify_total_value(value)),
            _ => warn!(
                path = %path.display(),
                row = offset + 2,
                "skipping unusable cohort row"
            ),
        }
    }
    assignments
}
