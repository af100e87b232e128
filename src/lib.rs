//! ledgerlens - dashboard analytics for personal-finance ledgers
//!
//! This library turns a snapshot of ledger transactions into the figures a
//! finance dashboard shows: income/expense totals, category breakdowns, a
//! monthly trend, a cumulative net balance series and a period-over-period
//! expense comparison.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, identifiers, periods and the transaction record
//! - `ingest`: Loading and validating JSON/CSV snapshots
//! - `analytics`: Pure dashboard computations
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV output
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `ledgerlens` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerlens::analytics::{DashboardOptions, DashboardView};
//! use ledgerlens::ingest::load_snapshot;
//!
//! let report = load_snapshot(Path::new("ledger.json"))?;
//! let view = DashboardView::compute(&report.transactions, None, &DashboardOptions::default());
//! println!("{}", view.totals.net_balance);
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;

pub use error::{LensError, LensResult};
