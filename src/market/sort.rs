//! Column sorting for the coin table.
//!
//! [`SortState`] holds at most one active `(column, direction)` pair and
//! implements the header toggle cycle. [`sort_coins`] is a pure function of the
//! state it is given.
//!
//! # Toggle cycle
//!
//! ```text
//! same column:      unsorted → ascending → descending → unsorted
//! different column: anything → that column ascending
//! ```

use crate::domain::CoinSummary;
use std::cmp::Ordering;

/// Sortable table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Rank,
    Name,
    Price,
    Change24h,
    MarketCap,
}

impl SortColumn {
    /// All columns in display order.
    pub const ALL: [Self; 5] = [
        Self::Rank,
        Self::Name,
        Self::Price,
        Self::Change24h,
        Self::MarketCap,
    ];

    /// Column header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rank => "#",
            Self::Name => "NAME",
            Self::Price => "PRICE",
            Self::Change24h => "24H",
            Self::MarketCap => "MARKET CAP",
        }
    }

    /// Column bound to a number key (`1`..=`5`).
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let idx = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(idx).ok()?).copied()
    }

    fn numeric_key(self, coin: &CoinSummary) -> Option<f64> {
        let value = match self {
            Self::Rank => coin.market_cap_rank.map(f64::from),
            Self::Price => coin.current_price,
            Self::Change24h => coin.price_change_percentage_24h,
            Self::MarketCap => coin.market_cap,
            Self::Name => None,
        };
        value.filter(|v| !v.is_nan())
    }
}

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Arrow shown next to the active column header.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The table's sort state: unsorted, or one active column with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<(SortColumn, SortDirection)>,
}

impl SortState {
    /// No active column; input order is preserved.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { active: None }
    }

    /// Sort by `column` in `direction`.
    #[must_use]
    pub const fn by(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            active: Some((column, direction)),
        }
    }

    /// The active pair, if any.
    #[must_use]
    pub const fn active(&self) -> Option<(SortColumn, SortDirection)> {
        self.active
    }

    /// Direction of `column` if it is the active column.
    #[must_use]
    pub fn direction_of(&self, column: SortColumn) -> Option<SortDirection> {
        self.active
            .and_then(|(active, direction)| (active == column).then_some(direction))
    }

    /// Next state after the user activates `column`.
    ///
    /// ```
    /// use coinpane::market::sort::{SortColumn, SortDirection, SortState};
    ///
    /// let state = SortState::unsorted().toggle(SortColumn::Price);
    /// assert_eq!(state.active(), Some((SortColumn::Price, SortDirection::Ascending)));
    /// let state = state.toggle(SortColumn::Price);
    /// assert_eq!(state.active(), Some((SortColumn::Price, SortDirection::Descending)));
    /// assert_eq!(state.toggle(SortColumn::Price), SortState::unsorted());
    /// ```
    #[must_use]
    pub fn toggle(self, column: SortColumn) -> Self {
        let active = match self.active {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
        Self { active }
    }
}

/// Orders two optional numbers with missing values last, regardless of direction.
fn compare_optional(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.total_cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(a: &CoinSummary, b: &CoinSummary, column: SortColumn, direction: SortDirection) -> Ordering {
    match column {
        SortColumn::Name => direction.apply(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        numeric => compare_optional(numeric.numeric_key(a), numeric.numeric_key(b), direction),
    }
}

/// Returns `coins` ordered by `state`.
///
/// Unsorted state returns the input order. Otherwise the sort is stable: coins
/// with equal keys keep their relative input order.
///
/// ```
/// use coinpane::domain::CoinSummary;
/// use coinpane::market::sort::{sort_coins, SortColumn, SortDirection, SortState};
///
/// let coins = vec![
///     CoinSummary::new("bitcoin", "btc", "Bitcoin").with_price(60000.0),
///     CoinSummary::new("ethereum", "eth", "Ethereum").with_price(3000.0),
/// ];
/// let sorted = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Price, SortDirection::Ascending));
/// assert_eq!(sorted[0].id, "ethereum");
/// ```
#[must_use]
pub fn sort_coins(mut coins: Vec<&CoinSummary>, state: SortState) -> Vec<&CoinSummary> {
    if let Some((column, direction)) = state.active {
        coins.sort_by(|a, b| compare(a, b, column, direction));
    }
    coins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(coins: &[&CoinSummary]) -> Vec<String> {
        coins.iter().map(|c| c.id.clone()).collect()
    }

    fn sample() -> Vec<CoinSummary> {
        vec![
            CoinSummary::new("bitcoin", "btc", "Bitcoin").with_rank(1).with_price(60000.0).with_change(1.5),
            CoinSummary::new("ethereum", "eth", "Ethereum").with_rank(2).with_price(3000.0).with_change(-2.0),
            CoinSummary::new("obscure", "obs", "obscure").with_price(3000.0),
            CoinSummary::new("aave", "aave", "Aave").with_rank(40).with_price(90.0).with_change(0.0),
        ]
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let coins = sample();
        let sorted = sort_coins(coins.iter().collect(), SortState::unsorted());
        assert_eq!(ids(&sorted), vec!["bitcoin", "ethereum", "obscure", "aave"]);
    }

    #[test]
    fn missing_rank_goes_last_in_both_directions() {
        let coins = sample();
        let asc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Rank, SortDirection::Ascending));
        assert_eq!(ids(&asc), vec!["bitcoin", "ethereum", "aave", "obscure"]);

        let desc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Rank, SortDirection::Descending));
        assert_eq!(ids(&desc), vec!["aave", "ethereum", "bitcoin", "obscure"]);
    }

    #[test]
    fn equal_keys_are_stable() {
        let coins = sample();
        let asc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Price, SortDirection::Ascending));
        assert_eq!(ids(&asc), vec!["aave", "ethereum", "obscure", "bitcoin"]);

        let desc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Price, SortDirection::Descending));
        assert_eq!(ids(&desc), vec!["bitcoin", "ethereum", "obscure", "aave"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let coins = sample();
        let asc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Name, SortDirection::Ascending));
        assert_eq!(ids(&asc), vec!["aave", "bitcoin", "ethereum", "obscure"]);
    }

    #[test]
    fn numeric_order_is_monotonic() {
        let coins = sample();
        let asc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Change24h, SortDirection::Ascending));
        let present: Vec<f64> = asc.iter().filter_map(|c| c.price_change_percentage_24h).collect();
        assert!(present.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(asc.last().map(|c| c.id.as_str()), Some("obscure"));
    }

    #[test]
    fn nan_counts_as_missing() {
        let coins = vec![
            CoinSummary::new("nan", "nan", "NaN").with_price(f64::NAN),
            CoinSummary::new("one", "one", "One").with_price(1.0),
        ];
        let asc = sort_coins(coins.iter().collect(), SortState::by(SortColumn::Price, SortDirection::Ascending));
        assert_eq!(ids(&asc), vec!["one", "nan"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let coins = sample();
        for column in SortColumn::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let state = SortState::by(column, direction);
                let once = sort_coins(coins.iter().collect(), state);
                let twice = sort_coins(once.clone(), state);
                assert_eq!(ids(&once), ids(&twice));
            }
        }
    }

    #[test]
    fn toggle_cycle() {
        let state = SortState::unsorted().toggle(SortColumn::Rank);
        assert_eq!(state.direction_of(SortColumn::Rank), Some(SortDirection::Ascending));

        let state = state.toggle(SortColumn::Name);
        assert_eq!(state.active(), Some((SortColumn::Name, SortDirection::Ascending)));
        assert_eq!(state.direction_of(SortColumn::Rank), None);

        let state = state.toggle(SortColumn::Name).toggle(SortColumn::MarketCap);
        assert_eq!(state.active(), Some((SortColumn::MarketCap, SortDirection::Ascending)));

        let state = state.toggle(SortColumn::MarketCap).toggle(SortColumn::MarketCap);
        assert_eq!(state, SortState::unsorted());
    }

    #[test]
    fn digit_keys_map_to_columns() {
        assert_eq!(SortColumn::from_digit('1'), Some(SortColumn::Rank));
        assert_eq!(SortColumn::from_digit('5'), Some(SortColumn::MarketCap));
        assert_eq!(SortColumn::from_digit('0'), None);
        assert_eq!(SortColumn::from_digit('6'), None);
        assert_eq!(SortColumn::from_digit('x'), None);
    }
}
