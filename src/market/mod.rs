//! Pure market-table transforms: formatting, filtering and sorting.
//!
//! Nothing in this module touches Zellij or the network; every function is a
//! deterministic function of its inputs.

pub mod filter;
pub mod format;
pub mod pipeline;
pub mod sort;

pub use filter::{filter_coins, match_range};
pub use format::{
    format_compact_value, format_optional_compact, format_optional_price, format_percent_change,
    format_price, MISSING_VALUE,
};
pub use pipeline::derive_rows;
pub use sort::{sort_coins, SortColumn, SortDirection, SortState};
