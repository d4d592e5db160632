use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Reasons a single trade row is rejected during normalization.
///
/// One diagnostic is produced per rejected row; rejection never aborts the
/// market.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing {role} id")]
    MissingParticipant { role: &'static str },

    #[error("unresolvable {role} side '{value}'")]
    BadSide { role: &'static str, value: String },

    #[error("invalid quantity '{value}'")]
    BadQuantity { value: String },

    #[error("unparseable timestamp '{value}'")]
    BadTimestamp { value: String },

    #[error("unknown instrument token '{value}'")]
    UnknownToken { value: String },
}

/// Failures that skip a single market without halting the batch.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("market {market}: failed to read trade log {path}: {source}")]
    ReadTrades {
        market: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("market {market}: trade log {path} is missing column '{column}'")]
    MissingColumn {
        market: String,
        path: PathBuf,
        column: &'static str,
    },

    #[error("market {market}: trade log {path} has no rows")]
    EmptyTradeLog { market: String, path: PathBuf },

    #[error("market {market}: no resolvable ledger entries")]
    NoLedgerEntries { market: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
