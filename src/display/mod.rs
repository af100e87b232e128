//! Display formatting for terminal output
//!
//! Turns dashboard views and transaction lists into plain text for the
//! terminal. Machine-readable output lives in `export`.

pub mod dashboard;
pub mod report;
pub mod transaction;

pub use dashboard::{
    format_category_table, format_comparison, format_dashboard, format_net_series, format_totals,
    format_trend,
};
pub use transaction::{
    format_rejections, format_transaction_register, format_transaction_row,
    format_transfer_candidates,
};
