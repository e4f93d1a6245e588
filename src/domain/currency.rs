//! Normalized currency codes.
//!
//! The upstream API and the share query accept currency codes in any case. Codes
//! are normalized once, at the boundary, to trimmed lowercase; everything inside
//! the crate compares normalized values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency the market list is requested in when nothing else is configured.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Currency the detail endpoint values are read in. Not user-selectable.
pub const DETAIL_CURRENCY: &str = "usd";

/// Currencies offered by the currency switcher, in cycling order.
pub const SELECTABLE_CURRENCIES: [&str; 3] = ["usd", "eur", "gbp"];

/// A trimmed, lowercase currency code such as `usd` or `eur`.
///
/// Construction never fails; whether the formatter recognizes the code is a
/// separate question answered by [`CurrencyCode::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalizes `code` to trimmed lowercase.
    ///
    /// ```
    /// use coinpane::domain::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::new(" EUR ").as_str(), "eur");
    /// ```
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_lowercase())
    }

    /// The normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code as shown to users (`USD`).
    #[must_use]
    pub fn display(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Whether the code looks like an ISO 4217 code: exactly three ASCII letters.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 3 && self.0.bytes().all(|b| b.is_ascii_alphabetic())
    }

    /// The next currency in [`SELECTABLE_CURRENCIES`], wrapping around.
    ///
    /// Codes outside the list move to the first entry.
    ///
    /// ```
    /// use coinpane::domain::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::new("usd").next_selectable().as_str(), "eur");
    /// assert_eq!(CurrencyCode::new("gbp").next_selectable().as_str(), "usd");
    /// assert_eq!(CurrencyCode::new("jpy").next_selectable().as_str(), "usd");
    /// ```
    #[must_use]
    pub fn next_selectable(&self) -> Self {
        let next = SELECTABLE_CURRENCIES
            .iter()
            .position(|c| *c == self.0)
            .map_or(0, |idx| (idx + 1) % SELECTABLE_CURRENCIES.len());
        Self::new(SELECTABLE_CURRENCIES[next])
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(CurrencyCode::new("USD"), CurrencyCode::new("usd"));
        assert_eq!(CurrencyCode::new("  Gbp\t").as_str(), "gbp");
    }

    #[test]
    fn well_formed_requires_three_letters() {
        assert!(CurrencyCode::new("usd").is_well_formed());
        assert!(CurrencyCode::new("BTC").is_well_formed());
        assert!(!CurrencyCode::new("").is_well_formed());
        assert!(!CurrencyCode::new("dollars").is_well_formed());
        assert!(!CurrencyCode::new("u5d").is_well_formed());
    }

    #[test]
    fn deserializes_through_normalization() {
        let code: CurrencyCode = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(code.as_str(), "eur");
    }
}
