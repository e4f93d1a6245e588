//! Currency selection held in a shareable query string.
//!
//! The selected currency lives in a URL-style query (`currency=eur`) so the
//! current view can be reproduced from configuration. Parameters other than
//! `currency` are kept as-is, in order.

use crate::domain::CurrencyCode;
use url::form_urlencoded;

/// Query parameter holding the selected currency.
pub const CURRENCY_PARAM: &str = "currency";

/// Get/set contract for the selected display currency.
pub trait NavigationState {
    /// The currently selected currency, normalized.
    fn selected_currency(&self) -> CurrencyCode;

    /// Replaces the selected currency.
    fn set_selected_currency(&mut self, code: &CurrencyCode);
}

/// Navigation state backed by an `application/x-www-form-urlencoded` query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    params: Vec<(String, String)>,
}

impl QueryState {
    /// Parses a query string, with or without a leading `?`.
    ///
    /// ```
    /// use coinpane::app::navigation::{NavigationState, QueryState};
    ///
    /// let state = QueryState::parse("?currency=EUR&theme=dark");
    /// assert_eq!(state.selected_currency().as_str(), "eur");
    /// ```
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        Self {
            params: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Serializes the state back into a query string (no leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Whether `key` is present, even with an empty value.
    #[must_use]
    pub fn has_param(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    fn currency_param(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == CURRENCY_PARAM)
            .map(|(_, value)| value.as_str())
    }
}

impl NavigationState for QueryState {
    /// Falls back to the default currency when the parameter is missing or blank.
    fn selected_currency(&self) -> CurrencyCode {
        self.currency_param()
            .map(CurrencyCode::new)
            .filter(|code| !code.as_str().is_empty())
            .unwrap_or_default()
    }

    fn set_selected_currency(&mut self, code: &CurrencyCode) {
        let value = code.as_str().to_string();
        if let Some(slot) = self.params.iter_mut().find(|(key, _)| key == CURRENCY_PARAM) {
            slot.1 = value;
        } else {
            self.params.push((CURRENCY_PARAM.to_string(), value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_selects_default() {
        assert_eq!(QueryState::parse("").selected_currency().as_str(), "usd");
        assert_eq!(QueryState::parse("currency=").selected_currency().as_str(), "usd");
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut state = QueryState::default();
        state.set_selected_currency(&CurrencyCode::new("GBP"));
        assert_eq!(state.selected_currency(), CurrencyCode::new("gbp"));
        assert_eq!(state.to_query_string(), "currency=gbp");
    }

    #[test]
    fn other_params_are_preserved() {
        let mut state = QueryState::parse("view=compact&currency=usd&page=2");
        state.set_selected_currency(&CurrencyCode::new("eur"));
        assert_eq!(state.to_query_string(), "view=compact&currency=eur&page=2");
    }

    #[test]
    fn first_currency_param_wins() {
        let state = QueryState::parse("currency=gbp&currency=eur");
        assert_eq!(state.selected_currency().as_str(), "gbp");
    }

    #[test]
    fn values_are_percent_decoded() {
        let state = QueryState::parse("note=a%20b&currency=%20EUR");
        assert_eq!(state.selected_currency().as_str(), "eur");
        assert_eq!(state.to_query_string(), "note=a+b&currency=+EUR");
    }
}
