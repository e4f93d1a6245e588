//! Domain layer for the coinpane plugin.
//!
//! Core data types, independent of Zellij APIs and of how they are fetched or
//! rendered.
//!
//! # Organization
//!
//! - [`coin`]: market rows, coin details and list snapshots
//! - [`currency`]: normalized currency codes and the selectable set
//! - [`error`]: error types and result alias

pub mod coin;
pub mod currency;
pub mod error;

pub use coin::{CoinDetail, CoinSummary, MarketSnapshot};
pub use currency::{CurrencyCode, DEFAULT_CURRENCY, DETAIL_CURRENCY, SELECTABLE_CURRENCIES};
pub use error::{CoinpaneError, Result};
