//! Coin market records.
//!
//! [`CoinSummary`] is one table row as delivered by the markets endpoint,
//! [`CoinDetail`] is the extended single-asset record fetched on demand, and
//! [`MarketSnapshot`] is one complete list fetch together with the currency it was
//! denominated in.

use super::currency::CurrencyCode;
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// One market snapshot row for a listed asset.
///
/// Field names match the CoinGecko `/coins/markets` payload so the record
/// deserializes directly. Numeric fields are optional because the API emits
/// `null` for thinly traded assets; monetary values are already denominated in the
/// currency the list was requested in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinSummary {
    /// Creates a summary with only identity fields set.
    ///
    /// ```
    /// use coinpane::domain::CoinSummary;
    ///
    /// let coin = CoinSummary::new("bitcoin", "btc", "Bitcoin")
    ///     .with_rank(1)
    ///     .with_price(60000.0);
    /// assert_eq!(coin.market_cap_rank, Some(1));
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            current_price: None,
            market_cap: None,
            market_cap_rank: None,
            price_change_percentage_24h: None,
        }
    }

    #[must_use]
    pub const fn with_rank(mut self, rank: u32) -> Self {
        self.market_cap_rank = Some(rank);
        self
    }

    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    #[must_use]
    pub const fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    #[must_use]
    pub const fn with_change(mut self, percent: f64) -> Self {
        self.price_change_percentage_24h = Some(percent);
        self
    }
}

/// Extended single-asset record shown in the detail panel.
///
/// `price` and `market_cap` are always denominated in
/// [`DETAIL_CURRENCY`](super::currency::DETAIL_CURRENCY), independent of the
/// currency selected for the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
}

/// One complete market list fetch.
///
/// Replaced wholesale on every refetch; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    /// Currency the monetary fields are denominated in.
    pub currency: CurrencyCode,
    /// Coins in upstream order (market cap descending).
    pub coins: Vec<CoinSummary>,
    /// Unix timestamp of when the response arrived.
    pub fetched_at: i64,
}

impl MarketSnapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(currency: CurrencyCode, coins: Vec<CoinSummary>) -> Self {
        Self {
            currency,
            coins,
            fetched_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns a short label describing how long ago the snapshot was fetched.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    ///
    /// ```
    /// use coinpane::domain::{CurrencyCode, MarketSnapshot};
    ///
    /// let mut snapshot = MarketSnapshot::new(CurrencyCode::default(), vec![]);
    /// snapshot.fetched_at = 1_000;
    /// assert_eq!(snapshot.age_label(1_030), "just now");
    /// assert_eq!(snapshot.age_label(1_300), "5m ago");
    /// ```
    #[must_use]
    pub fn age_label(&self, now: i64) -> String {
        let diff = now - self.fetched_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_markets_row_with_nulls() {
        let json = r#"{
            "id": "tiny",
            "symbol": "tny",
            "name": "Tiny",
            "image": "https://example.invalid/tiny.png",
            "current_price": 0.0012,
            "market_cap": null,
            "market_cap_rank": null,
            "price_change_percentage_24h": -3.5,
            "total_volume": 12.0
        }"#;

        let coin: CoinSummary = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, "tiny");
        assert_eq!(coin.current_price, Some(0.0012));
        assert_eq!(coin.market_cap, None);
        assert_eq!(coin.market_cap_rank, None);
        assert_eq!(coin.price_change_percentage_24h, Some(-3.5));
    }

    #[test]
    fn age_label_buckets() {
        let mut snapshot = MarketSnapshot::new(CurrencyCode::default(), vec![]);
        snapshot.fetched_at = 0;
        assert_eq!(snapshot.age_label(59), "just now");
        assert_eq!(snapshot.age_label(2 * 3600), "2h ago");
        assert_eq!(snapshot.age_label(3 * 86400), "3d ago");
    }
}
