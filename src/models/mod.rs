//! Core data models for ledgerlens
//!
//! This module contains the data structures the analytics operate on:
//! transactions, money amounts, identifiers and calendar periods.

pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use ids::{AccountId, TransactionId, TransferId};
pub use money::Money;
pub use period::{BoundaryMode, DateRange, Month};
pub use transaction::{Transaction, TransactionType};
