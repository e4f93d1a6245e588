//! Visible-row derivation: filter, then sort.

use super::filter::filter_coins;
use super::sort::{sort_coins, SortState};
use crate::domain::CoinSummary;

/// Derives the rows the table shows from the full list, the query and the sort.
///
/// Filtering always runs before sorting. The result is a pure function of the
/// three inputs.
#[must_use]
pub fn derive_rows<'a>(coins: &'a [CoinSummary], query: &str, sort: SortState) -> Vec<&'a CoinSummary> {
    sort_coins(filter_coins(coins, query), sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::sort::{SortColumn, SortDirection};

    fn ids(coins: &[&CoinSummary]) -> Vec<String> {
        coins.iter().map(|c| c.id.clone()).collect()
    }

    fn sample() -> Vec<CoinSummary> {
        vec![
            CoinSummary::new("bitcoin", "btc", "Bitcoin").with_rank(1).with_price(60000.0),
            CoinSummary::new("ethereum", "eth", "Ethereum").with_rank(2).with_price(3000.0),
            CoinSummary::new("tether", "usdt", "Tether").with_rank(3).with_price(1.0),
            CoinSummary::new("ethena", "ena", "Ethena").with_rank(40).with_price(0.5),
        ]
    }

    #[test]
    fn filter_then_sort() {
        let coins = sample();
        let rows = derive_rows(
            &coins,
            "eth",
            SortState::by(SortColumn::Price, SortDirection::Ascending),
        );
        assert_eq!(ids(&rows), vec!["ethena", "tether", "ethereum"]);
    }

    #[test]
    fn no_query_no_sort_is_identity() {
        let coins = sample();
        let rows = derive_rows(&coins, "", SortState::unsorted());
        assert_eq!(ids(&rows), vec!["bitcoin", "ethereum", "tether", "ethena"]);
    }

    #[test]
    fn no_matches_is_empty() {
        let coins = sample();
        assert!(derive_rows(&coins, "doge", SortState::default()).is_empty());
    }

    #[test]
    fn same_inputs_same_rows() {
        let coins = sample();
        let sort = SortState::by(SortColumn::Name, SortDirection::Descending);
        assert_eq!(ids(&derive_rows(&coins, "e", sort)), ids(&derive_rows(&coins, "e", sort)));
    }
}
