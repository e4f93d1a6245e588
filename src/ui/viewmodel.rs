//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. Every string in them is already formatted for display; the
//! renderer only positions and colors text.
//!
//! # Example
//!
//! ```rust
//! use coinpane::ui::viewmodel::{ChangeDirection, DisplayItem};
//!
//! let row = DisplayItem {
//!     rank: "1".to_string(),
//!     name: "Bitcoin".to_string(),
//!     symbol: "BTC".to_string(),
//!     price: "$60,000.00".to_string(),
//!     change: "+1.20%".to_string(),
//!     change_direction: ChangeDirection::Gain,
//!     market_cap: "$1.2T".to_string(),
//!     is_selected: true,
//!     highlight_ranges: vec![],
//! };
//! assert!(row.is_selected);
//! ```

use crate::market::SortColumn;

/// Which screen the table area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// No snapshot yet and a list fetch is pending.
    Loading,
    /// The list fetch failed; replaces the whole table.
    Failed(String),
    /// The upstream API returned zero coins.
    NoData,
    /// The search query filtered out every row.
    NoMatches,
    /// At least one row is visible.
    Rows,
}

impl PageState {
    /// Whether this state replaces the header/table layout entirely.
    #[must_use]
    pub const fn is_full_page(&self) -> bool {
        matches!(self, Self::Loading | Self::Failed(_) | Self::NoData)
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub page: PageState,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Column headers with sort indicators.
    pub columns: Vec<ColumnHeader>,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Full-page message for [`PageState::Loading`], [`PageState::Failed`] and
    /// [`PageState::NoData`].
    pub empty_state: Option<EmptyState>,

    /// Present while search is active (including under an open detail panel).
    pub search_bar: Option<SearchBarInfo>,

    /// Message drawn in the table area when the filter matched nothing.
    pub no_matches: Option<String>,

    /// The detail panel overlay, when open.
    pub detail: Option<DetailPanel>,
}

/// Sign of the 24h change, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Gain,
    Loss,
    Unknown,
}

impl ChangeDirection {
    #[must_use]
    pub fn of(change: Option<f64>) -> Self {
        match change {
            Some(v) if v >= 0.0 => Self::Gain,
            Some(v) if v < 0.0 => Self::Loss,
            _ => Self::Unknown,
        }
    }
}

/// One formatted table row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub rank: String,
    /// Coin name, truncated to the column.
    pub name: String,
    /// Uppercase ticker symbol.
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub change_direction: ChangeDirection,
    pub market_cap: String,
    pub is_selected: bool,

    /// Character ranges of `name` to highlight (search matches).
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// A table column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub column: SortColumn,
    /// Label with the sort arrow appended when active (`PRICE ▲`).
    pub label: String,
    pub is_active: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Centered title, e.g. `" Crypto Market (50) "`.
    pub title: String,
    /// Secondary line: currency, share query and freshness.
    pub status: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Full-page message.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Rendered in the error color.
    pub is_error: bool,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keys currently edit the query.
    pub is_focused: bool,
}

/// The detail panel overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    /// Coin name, or the id until anything is known about it.
    pub title: String,
    pub body: DetailBody,
}

/// Contents of the detail panel.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    Loading,
    Failed(String),
    Ready {
        /// Description, truncated and suffixed with `...`.
        description: String,
        price: String,
        market_cap: String,
        image: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_states_replace_the_table() {
        assert!(PageState::Loading.is_full_page());
        assert!(PageState::Failed("Failed to fetch data: 500".to_string()).is_full_page());
        assert!(PageState::NoData.is_full_page());
        assert!(!PageState::NoMatches.is_full_page());
        assert!(!PageState::Rows.is_full_page());
    }
}
