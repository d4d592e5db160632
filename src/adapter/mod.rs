//! File-format adapters around the engine.

mod cohorts;
mod csv;
mod prices;
mod report;
mod trades;

pub use cohorts::load_cohort_assignments;
pub use prices::{load_reference_odds, ReferencePoint};
pub use report::write_cohort_tables;
pub use trades::read_trades;
