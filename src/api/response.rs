//! Response decoding for the CoinGecko endpoints.

use crate::domain::{CoinDetail, CoinSummary, CoinpaneError, Result, DETAIL_CURRENCY};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

/// Status and body of a completed web request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[derive(Debug, Deserialize)]
struct DetailPayload {
    id: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<LocalizedText>,
    #[serde(default)]
    image: Option<ImageLinks>,
    #[serde(default)]
    market_data: Option<MarketData>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    #[serde(default)]
    en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    #[serde(default)]
    thumb: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    market_cap: BTreeMap<String, Option<f64>>,
}

/// Decodes a market list response.
///
/// Duplicate ids are dropped; the first occurrence wins and upstream order is
/// otherwise kept.
///
/// # Errors
///
/// Returns [`CoinpaneError::ListFetch`] for a non-2xx status or a body that is
/// not a JSON array of market rows.
pub fn decode_markets(response: &HttpResponse) -> Result<Vec<CoinSummary>> {
    if !response.is_success() {
        return Err(CoinpaneError::ListFetch(format!(
            "Failed to fetch data: {}",
            response.status
        )));
    }

    let coins: Vec<CoinSummary> = serde_json::from_slice(&response.body)
        .map_err(|e| CoinpaneError::ListFetch(format!("Failed to read market data: {e}")))?;

    let total = coins.len();
    let mut seen = HashSet::with_capacity(total);
    let coins: Vec<CoinSummary> = coins
        .into_iter()
        .filter(|coin| seen.insert(coin.id.clone()))
        .collect();

    if coins.len() != total {
        tracing::debug!(
            dropped = total - coins.len(),
            "dropped duplicate coin ids from market response"
        );
    }

    Ok(coins)
}

/// Decodes a coin detail response for `id`.
///
/// Price and market cap are read in [`DETAIL_CURRENCY`]; HTML markup in the
/// description is stripped for terminal display.
///
/// # Errors
///
/// Returns [`CoinpaneError::DetailFetch`] for a non-2xx status or an
/// undecodable body.
pub fn decode_detail(id: &str, response: &HttpResponse) -> Result<CoinDetail> {
    let fail = |message: String| CoinpaneError::DetailFetch {
        id: id.to_string(),
        message,
    };

    if !response.is_success() {
        return Err(fail(format!(
            "Failed to fetch coin details: {}",
            response.status
        )));
    }

    let payload: DetailPayload = serde_json::from_slice(&response.body)
        .map_err(|e| fail(format!("Failed to read coin details: {e}")))?;

    let market_data = payload.market_data.unwrap_or_default();
    let in_detail_currency =
        |values: &BTreeMap<String, Option<f64>>| values.get(DETAIL_CURRENCY).copied().flatten();

    Ok(CoinDetail {
        id: payload.id,
        name: payload.name,
        symbol: payload.symbol,
        description: payload
            .description
            .and_then(|d| d.en)
            .map(|text| strip_markup(&text))
            .unwrap_or_default(),
        image: payload.image.and_then(|i| i.thumb),
        price: in_detail_currency(&market_data.current_price),
        market_cap: in_detail_currency(&market_data.market_cap),
    })
}

/// Removes `<...>` tags and collapses whitespace runs.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_list_error() {
        let err = decode_markets(&HttpResponse::new(429, "")).unwrap_err();
        assert!(matches!(err, CoinpaneError::ListFetch(_)));
        assert_eq!(err.to_string(), "Failed to fetch data: 429");
    }

    #[test]
    fn malformed_list_body_is_list_error() {
        let err = decode_markets(&HttpResponse::new(200, "{\"status\":\"oops\"}")).unwrap_err();
        assert!(matches!(err, CoinpaneError::ListFetch(_)));
    }

    #[test]
    fn decodes_markets_and_drops_duplicates() {
        let body = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":60000,"market_cap":1.2e12,"market_cap_rank":1,"price_change_percentage_24h":1.2},
            {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3000,"market_cap":null,"market_cap_rank":2,"price_change_percentage_24h":null},
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin (again)","current_price":1}
        ]"#;
        let coins = decode_markets(&HttpResponse::new(200, body)).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].name, "Bitcoin");
        assert_eq!(coins[1].market_cap, None);
    }

    #[test]
    fn empty_list_is_not_an_error() {
        assert!(decode_markets(&HttpResponse::new(200, "[]")).unwrap().is_empty());
    }

    #[test]
    fn decodes_detail_in_usd() {
        let body = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "description": {"en": "Bitcoin is the first <a href=\"https://x\">successful</a>\r\n internet money."},
            "image": {"thumb": "https://img/thumb.png", "small": "s", "large": "l"},
            "market_data": {
                "current_price": {"eur": 55000, "usd": 60000.5},
                "market_cap": {"usd": 1.2e12}
            }
        }"#;
        let detail = decode_detail("bitcoin", &HttpResponse::new(200, body)).unwrap();
        assert_eq!(detail.name, "Bitcoin");
        assert_eq!(detail.description, "Bitcoin is the first successful internet money.");
        assert_eq!(detail.image.as_deref(), Some("https://img/thumb.png"));
        assert_eq!(detail.price, Some(60000.5));
        assert_eq!(detail.market_cap, Some(1.2e12));
    }

    #[test]
    fn detail_tolerates_missing_sections() {
        let detail = decode_detail("tiny", &HttpResponse::new(200, r#"{"id":"tiny","name":"Tiny"}"#)).unwrap();
        assert_eq!(detail.description, "");
        assert_eq!(detail.price, None);
        assert_eq!(detail.image, None);
    }

    #[test]
    fn detail_errors_carry_the_id() {
        match decode_detail("ghost", &HttpResponse::new(404, "")) {
            Err(CoinpaneError::DetailFetch { id, message }) => {
                assert_eq!(id, "ghost");
                assert_eq!(message, "Failed to fetch coin details: 404");
            }
            other => panic!("expected detail error, got {other:?}"),
        }
        assert!(decode_detail("ghost", &HttpResponse::new(200, "not json")).is_err());
    }
}
