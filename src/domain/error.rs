//! Error types for the coinpane plugin.
//!
//! This module defines the centralized error type [`CoinpaneError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! None of these errors are fatal to the plugin. Each kind degrades to a scoped,
//! visible affordance:
//!
//! - [`CoinpaneError::ListFetch`]: full-page error state in place of the table
//! - [`CoinpaneError::DetailFetch`]: error message inside the detail panel only
//! - [`CoinpaneError::Format`]: recovered locally by the formatter (raw number)

use thiserror::Error;

/// The main error type for coinpane operations.
///
/// # Examples
///
/// ```
/// use coinpane::CoinpaneError;
///
/// let err = CoinpaneError::ListFetch("Failed to fetch data: 429".to_string());
/// assert_eq!(err.to_string(), "Failed to fetch data: 429");
/// ```
#[derive(Debug, Error)]
pub enum CoinpaneError {
    /// The market list request failed or returned a non-success status.
    ///
    /// Carries the user-facing message rendered on the full-page error screen.
    #[error("{0}")]
    ListFetch(String),

    /// A coin detail request failed or returned a non-success status.
    #[error("{message}")]
    DetailFetch {
        /// Coin id the request was issued for.
        id: String,
        /// User-facing message rendered inside the detail panel.
        message: String,
    },

    /// A value could not be formatted for the requested currency.
    ///
    /// Only produced by the `try_*` formatter functions; the public formatters
    /// recover from it.
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration is invalid (e.g. an unparseable API base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for coinpane operations.
pub type Result<T> = std::result::Result<T, CoinpaneError>;
