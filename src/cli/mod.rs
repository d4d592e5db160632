//! CLI module graph.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod run;
pub mod show;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Load a configuration file, falling back to defaults when the default
/// file simply does not exist yet.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        output::note(&format!(
            "no config file at {}, using defaults",
            path.display()
        ));
        Ok(Config::default())
    }
}
