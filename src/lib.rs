//! Oddsflow - Investment-weighted odds estimation for binary prediction markets.
//!
//! This crate turns the raw trade log of a binary prediction market into a
//! day-indexed "investment-weighted" odds series, broken out by trader cohort,
//! for comparison against the market's quoted price.
//!
//! # Architecture
//!
//! The engine is a strict forward pipeline over one market's trade table:
//!
//! - **`domain::ledger`** - normalizes raw trade rows into per-counterparty
//!   ledger entries with a market-relative day index
//! - **`domain::daily`** - collapses ledger entries into per-user, per-token
//!   daily buy/sell totals
//! - **`domain::position`** - accumulates signed running positions, carrying
//!   values forward across inactive days
//! - **`domain::exposure`** - resolves signed positions into non-negative
//!   directional exposure per outcome
//! - **`domain::aggregate`** - sums exposure per day and cohort into odds
//!
//! Markets are independent; the [`app`] layer fans them out over a worker
//! pool and writes one output table per `(market, cohort)` pair.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - The position-accounting and odds-aggregation engine
//! - [`error`] - Error types for the crate
//! - [`adapter`] - CSV readers and the output table writer
//! - [`app`] - Batch orchestration across markets
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use oddsflow::domain::{compute_market_odds, CohortAssignments, MarketId, OutcomeMap};
//!
//! let rows = oddsflow::adapter::read_trades("markets/ev1/500614_trades.csv".as_ref(), "500614")?;
//! let odds = compute_market_odds(
//!     MarketId::new("500614"),
//!     &rows,
//!     &OutcomeMap::default(),
//!     &CohortAssignments::new(),
//! )?;
//! # Ok::<(), oddsflow::error::Error>(())
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
