//! Request construction for the CoinGecko endpoints.
//!
//! The plugin does not perform HTTP itself; it describes requests as
//! [`ApiRequest`] values that the plugin shim hands to Zellij's `web_request`.
//! Each request carries a [`RequestContext`] that Zellij echoes back with the
//! response, which is how results are routed to the right handler.

use crate::domain::{CoinpaneError, CurrencyCode, Result};
use std::collections::BTreeMap;
use url::Url;

/// Default CoinGecko public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Default number of coins requested per list fetch.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Header carrying the CoinGecko demo API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

const CONTEXT_KIND: &str = "kind";
const CONTEXT_CURRENCY: &str = "currency";
const CONTEXT_ID: &str = "id";

/// What a request was issued for. Round-trips through the Zellij context map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestContext {
    /// Market list for one currency.
    Markets { currency: CurrencyCode },
    /// Detail record for one coin id.
    Detail { id: String },
}

impl RequestContext {
    /// Serializes the context into the string map Zellij carries with a request.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        match self {
            Self::Markets { currency } => {
                map.insert(CONTEXT_KIND.to_string(), "markets".to_string());
                map.insert(CONTEXT_CURRENCY.to_string(), currency.as_str().to_string());
            }
            Self::Detail { id } => {
                map.insert(CONTEXT_KIND.to_string(), "detail".to_string());
                map.insert(CONTEXT_ID.to_string(), id.clone());
            }
        }
        map
    }

    /// Recovers a context from a response's context map.
    ///
    /// Returns `None` for maps this plugin did not produce.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        match map.get(CONTEXT_KIND)?.as_str() {
            "markets" => Some(Self::Markets {
                currency: CurrencyCode::new(map.get(CONTEXT_CURRENCY)?),
            }),
            "detail" => Some(Self::Detail {
                id: map.get(CONTEXT_ID)?.clone(),
            }),
            _ => None,
        }
    }
}

/// A fully described GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub context: RequestContext,
}

/// Builds requests against a configured API root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    per_page: u32,
    api_key: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CoinpaneError::Config`] if `base_url` is not an absolute
    /// hierarchical URL (one that path segments can be appended to).
    ///
    /// ```
    /// use coinpane::api::ApiClient;
    ///
    /// assert!(ApiClient::new("https://api.coingecko.com/api/v3", 50, None).is_ok());
    /// assert!(ApiClient::new("not a url", 50, None).is_err());
    /// ```
    pub fn new(base_url: &str, per_page: u32, api_key: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CoinpaneError::Config(format!("invalid api_base_url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoinpaneError::Config(format!(
                "api_base_url {base_url} cannot carry a path"
            )));
        }

        Ok(Self {
            base_url,
            per_page,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Request for the market list in `currency`, ordered by market cap.
    #[must_use]
    pub fn markets_request(&self, currency: &CurrencyCode) -> ApiRequest {
        let mut url = self.endpoint(&["coins", "markets"]);
        url.query_pairs_mut()
            .append_pair("vs_currency", currency.as_str())
            .append_pair("order", "market_cap_desc")
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", "1")
            .append_pair("sparkline", "false");

        ApiRequest {
            url: url.into(),
            headers: self.headers(),
            context: RequestContext::Markets {
                currency: currency.clone(),
            },
        }
    }

    /// Request for the detail record of coin `id`.
    #[must_use]
    pub fn detail_request(&self, id: &str) -> ApiRequest {
        let mut url = self.endpoint(&["coins", id]);
        url.query_pairs_mut()
            .append_pair("localization", "false")
            .append_pair("tickers", "false")
            .append_pair("market_data", "true")
            .append_pair("community_data", "false")
            .append_pair("developer_data", "false");

        ApiRequest {
            url: url.into(),
            headers: self.headers(),
            context: RequestContext::Detail { id: id.to_string() },
        }
    }

    /// Coins per list request.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(key) = &self.api_key {
            headers.insert(API_KEY_HEADER.to_string(), key.clone());
        }
        headers
    }
}

impl Default for ApiClient {
    /// Public CoinGecko endpoint, [`DEFAULT_PER_PAGE`] coins, no key.
    ///
    /// # Panics
    ///
    /// Panics if [`DEFAULT_BASE_URL`] fails to parse, which the request tests rule out.
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_PER_PAGE, None)
            .expect("Built-in CoinGecko base URL should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(DEFAULT_BASE_URL, DEFAULT_PER_PAGE, None).unwrap()
    }

    #[test]
    fn markets_url_carries_currency_and_paging() {
        let request = client().markets_request(&CurrencyCode::new("EUR"));
        assert_eq!(
            request.url,
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=eur&order=market_cap_desc&per_page=50&page=1&sparkline=false"
        );
        assert_eq!(
            request.context,
            RequestContext::Markets {
                currency: CurrencyCode::new("eur")
            }
        );
    }

    #[test]
    fn detail_url_escapes_id() {
        let request = client().detail_request("wrapped bitcoin");
        assert!(request
            .url
            .starts_with("https://api.coingecko.com/api/v3/coins/wrapped%20bitcoin?localization=false"));
        assert!(request.url.contains("market_data=true"));
    }

    #[test]
    fn trailing_slash_base_does_not_double_up() {
        let client = ApiClient::new("http://localhost:8080/v3/", 10, None).unwrap();
        let request = client.detail_request("bitcoin");
        assert!(request.url.starts_with("http://localhost:8080/v3/coins/bitcoin?"));
    }

    #[test]
    fn api_key_header_only_when_configured() {
        assert!(!client().markets_request(&CurrencyCode::default()).headers.contains_key(API_KEY_HEADER));

        let keyed = ApiClient::new(DEFAULT_BASE_URL, 50, Some("demo-key".to_string())).unwrap();
        let headers = keyed.detail_request("bitcoin").headers;
        assert_eq!(headers.get(API_KEY_HEADER).map(String::as_str), Some("demo-key"));
        assert_eq!(headers.get("Accept").map(String::as_str), Some("application/json"));

        let blank = ApiClient::new(DEFAULT_BASE_URL, 50, Some("  ".to_string())).unwrap();
        assert!(!blank.detail_request("bitcoin").headers.contains_key(API_KEY_HEADER));
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(ApiClient::new("mailto:x@y.z", 50, None), Err(CoinpaneError::Config(_))));
        assert!(matches!(ApiClient::new("", 50, None), Err(CoinpaneError::Config(_))));
    }

    #[test]
    fn context_round_trips_through_map() {
        for context in [
            RequestContext::Markets {
                currency: CurrencyCode::new("gbp"),
            },
            RequestContext::Detail {
                id: "ethereum".to_string(),
            },
        ] {
            assert_eq!(RequestContext::from_map(&context.to_map()), Some(context));
        }
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut map = BTreeMap::new();
        assert_eq!(RequestContext::from_map(&map), None);
        map.insert("kind".to_string(), "something".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
        map.insert("kind".to_string(), "detail".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
    }
}
