//! Free-text filtering of the coin list.
//!
//! Matching is a case-insensitive substring test against the coin name or
//! symbol. There is no ranking: surviving coins keep their input order.

use crate::domain::CoinSummary;

/// Trims and lowercases a raw query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Returns the coins whose name or symbol contains `query`.
///
/// An empty (or all-whitespace) query keeps every coin, in order.
///
/// ```
/// use coinpane::domain::CoinSummary;
/// use coinpane::market::filter::filter_coins;
///
/// let coins = vec![
///     CoinSummary::new("bitcoin", "btc", "Bitcoin"),
///     CoinSummary::new("ethereum", "eth", "Ethereum"),
/// ];
/// let hits = filter_coins(&coins, " ETH ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "ethereum");
/// ```
#[must_use]
pub fn filter_coins<'a>(coins: &'a [CoinSummary], query: &str) -> Vec<&'a CoinSummary> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return coins.iter().collect();
    }

    coins
        .iter()
        .filter(|coin| {
            coin.name.to_lowercase().contains(&needle) || coin.symbol.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Character range `(start, end)` of the first match of `query` in `text`.
///
/// Used to highlight the matched part of a coin name. Returns `None` for an empty
/// query or when only the symbol matched.
#[must_use]
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return None;
    }

    let haystack: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    let needle: Vec<char> = needle.chars().collect();
    if haystack.len() != text.chars().count() {
        // Lowercasing changed the character count; indices would not line up.
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CoinSummary> {
        vec![
            CoinSummary::new("bitcoin", "btc", "Bitcoin").with_rank(1),
            CoinSummary::new("ethereum", "eth", "Ethereum").with_rank(2),
            CoinSummary::new("tether", "usdt", "Tether").with_rank(3),
            CoinSummary::new("ethena", "ena", "Ethena").with_rank(4),
        ]
    }

    fn ids(coins: &[&CoinSummary]) -> Vec<String> {
        coins.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let coins = sample();
        assert_eq!(ids(&filter_coins(&coins, "")), ids(&coins.iter().collect::<Vec<_>>()));
        assert_eq!(filter_coins(&coins, "   ").len(), coins.len());
    }

    #[test]
    fn matches_name_or_symbol_case_insensitively() {
        let coins = sample();
        assert_eq!(ids(&filter_coins(&coins, "BTC")), vec!["bitcoin"]);
        assert_eq!(ids(&filter_coins(&coins, "usd")), vec!["tether"]);
        assert_eq!(ids(&filter_coins(&coins, "ETH")), vec!["ethereum", "tether", "ethena"]);
    }

    #[test]
    fn substring_not_fuzzy() {
        let coins = sample();
        assert!(filter_coins(&coins, "btcn").is_empty());
        assert!(filter_coins(&coins, "bcoin").is_empty());
    }

    #[test]
    fn every_result_contains_the_query() {
        let coins = sample();
        for query in ["e", "th", "er", "coin", "x"] {
            let hits = filter_coins(&coins, query);
            assert!(hits.len() <= coins.len());
            for coin in hits {
                assert!(
                    coin.name.to_lowercase().contains(query) || coin.symbol.to_lowercase().contains(query)
                );
            }
        }
    }

    #[test]
    fn match_range_finds_first_occurrence() {
        assert_eq!(match_range("Ethereum", "ETH"), Some((0, 3)));
        assert_eq!(match_range("Tether", "eth"), Some((1, 4)));
        assert_eq!(match_range("Bitcoin", "eth"), None);
        assert_eq!(match_range("Bitcoin", ""), None);
    }
}
