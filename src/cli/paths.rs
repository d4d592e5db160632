//! Path utilities for oddsflow.
//!
//! All data lives under `~/.oddsflow/`:
//! - `~/.oddsflow/config.toml` - main configuration
//! - `~/.oddsflow/markets/` - default trade-log location
//! - `~/.oddsflow/output/` - default output-table location

use std::path::PathBuf;

/// Returns the oddsflow home directory (`~/.oddsflow/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".oddsflow")
}

/// Returns the default config file path (`~/.oddsflow/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Ensures the oddsflow home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}
