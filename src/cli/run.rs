//! Handler for the `run` command.

use crate::app;
use crate::error::Result;

use super::command::RunArgs;
use super::{load_config, output};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(dir) = &args.data_dir {
        config.data.trades_dir = dir.clone();
    }
    if let Some(dir) = &args.out_dir {
        config.data.output_dir = dir.clone();
    }
    if let Some(path) = &args.cohorts {
        config.data.cohorts_file = Some(path.clone());
    }
    if let Some(jobs) = args.jobs {
        config.runtime.jobs = jobs;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Data dir", config.data.trades_dir.display());
    output::field("Output dir", config.data.output_dir.display());
    output::field("Cohort table", config.cohorts_file().display());
    if output::verbosity() > 0 {
        output::field("Jobs", config.jobs());
    }

    let progress = output::counter_spinner("markets processed");
    let summary = app::run_batch(&config, |_label| progress.inc(1)).await?;

    if summary.processed == 0 && summary.skipped == 0 {
        output::spinner_fail(&progress, "no markets found");
        output::hint(&format!(
            "expected <event>/<market_id>_trades.csv under {}",
            config.data.trades_dir.display()
        ));
        return Ok(());
    }

    output::spinner_success(
        &progress,
        &format!("{} markets processed", summary.processed),
    );
    if summary.skipped > 0 {
        output::warning(&format!("{} markets skipped", summary.skipped));
    }
    if summary.rejected_rows > 0 {
        output::warning(&format!("{} trade rows rejected", summary.rejected_rows));
    }
    output::field("Tables written", summary.files_written);
    Ok(())
}
