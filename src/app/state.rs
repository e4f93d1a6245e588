//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It separates core
//! data (the market snapshot, query, sort state, selected currency, detail
//! cache) from derived state (the visible rows and selection), and recomputes
//! the derived part explicitly whenever an input changes.
//!
//! # State Components
//!
//! - **Snapshot**: the last successful list fetch, replaced wholesale
//! - **Rows**: `derive_rows(snapshot, query, sort)`, recomputed by [`AppState::refresh_rows`]
//! - **Navigation**: the share query holding the selected currency
//! - **Pending markets**: currencies with a list request in flight
//! - **Details**: id-keyed cache plus the open panel, if any
//!
//! # Example
//!
//! ```rust
//! use coinpane::api::ApiClient;
//! use coinpane::app::{AppState, navigation::QueryState};
//! use coinpane::ui::Theme;
//!
//! let client = ApiClient::new("https://api.coingecko.com/api/v3", 50, None)?;
//! let state = AppState::new(Theme::default(), client, QueryState::parse("currency=eur"));
//! let viewmodel = state.compute_viewmodel(24, 100);
//! assert_eq!(viewmodel.page, coinpane::ui::viewmodel::PageState::Loading);
//! # Ok::<(), coinpane::CoinpaneError>(())
//! ```

use super::actions::Action;
use super::detail::{DetailCache, DetailView, FetchDecision, DEFAULT_DETAIL_CACHE_SIZE};
use super::modes::{InputMode, SearchFocus};
use super::navigation::{NavigationState, QueryState};
use crate::api::ApiClient;
use crate::domain::{CoinDetail, CoinSummary, CurrencyCode, MarketSnapshot, Result, DETAIL_CURRENCY};
use crate::market::{self, SortColumn, SortState};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ChangeDirection, ColumnHeader, DetailBody, DetailPanel, DisplayItem, EmptyState, FooterInfo,
    HeaderInfo, PageState, SearchBarInfo, UIViewModel,
};
use std::collections::HashSet;

/// Default seconds between background list refreshes.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 300;

/// Characters of the description shown in the detail panel.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Width of the NAME column, including the symbol.
pub const NAME_COLUMN_WIDTH: usize = 28;

/// Rows taken by header, status, borders, table header and footer.
const NORMAL_CHROME_ROWS: usize = 8;

/// Chrome rows plus the three-line search box.
const SEARCH_CHROME_ROWS: usize = 11;

/// Whether the host granted web access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Unknown,
    Granted,
    Denied,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last successful market list fetch.
    pub snapshot: Option<MarketSnapshot>,

    /// Visible rows: the snapshot filtered by `search_query` and ordered by
    /// `sort`. Recomputed by `refresh_rows()`.
    pub rows: Vec<CoinSummary>,

    /// Zero-based index into `rows`.
    pub selected_index: usize,

    pub input_mode: InputMode,
    pub search_query: String,
    pub sort: SortState,

    /// Share query holding the selected currency.
    pub navigation: QueryState,

    /// Message of the last failed list fetch. Cleared on retry and on success.
    pub list_error: Option<String>,

    /// Currencies with a list request in flight.
    pub pending_markets: HashSet<CurrencyCode>,

    pub details: DetailCache,
    pub detail_view: Option<DetailView>,

    pub permission: Permission,
    pub refresh_interval: u64,
    pub client: ApiClient,
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state: no snapshot, unsorted, normal mode.
    #[must_use]
    pub fn new(theme: Theme, client: ApiClient, navigation: QueryState) -> Self {
        Self {
            snapshot: None,
            rows: vec![],
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            sort: SortState::unsorted(),
            navigation,
            list_error: None,
            pending_markets: HashSet::new(),
            details: DetailCache::new(DEFAULT_DETAIL_CACHE_SIZE),
            detail_view: None,
            permission: Permission::Unknown,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            client,
            theme,
        }
    }

    /// The selected display currency.
    #[must_use]
    pub fn selected_currency(&self) -> CurrencyCode {
        self.navigation.selected_currency()
    }

    pub fn move_selection_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.rows.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.rows.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_coin(&self) -> Option<&CoinSummary> {
        self.rows.get(self.selected_index)
    }

    /// Recomputes `rows` from the snapshot, query and sort state.
    ///
    /// The selection follows the previously selected coin when it is still
    /// visible and is clamped otherwise.
    pub fn refresh_rows(&mut self) {
        let _span = tracing::debug_span!(
            "refresh_rows",
            query_len = self.search_query.len(),
            sort = ?self.sort.active()
        )
        .entered();

        let previous = self.selected_coin().map(|c| c.id.clone());

        self.rows = self.snapshot.as_ref().map_or_else(Vec::new, |snapshot| {
            market::derive_rows(&snapshot.coins, &self.search_query, self.sort)
                .into_iter()
                .cloned()
                .collect()
        });

        let followed = previous.and_then(|id| self.rows.iter().position(|c| c.id == id));
        self.selected_index = match followed {
            Some(idx) => idx,
            None if self.rows.is_empty() => 0,
            None => self.selected_index.min(self.rows.len() - 1),
        };

        tracing::debug!(visible_rows = self.rows.len(), "rows derived");
    }

    /// Activates `column` in the sort toggle cycle.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = self.sort.toggle(column);
        self.refresh_rows();
    }

    /// Requests the market list in `currency` unless one is already in flight
    /// or web access has not been granted.
    pub fn request_markets(&mut self, currency: &CurrencyCode) -> Option<Action> {
        if self.permission != Permission::Granted {
            tracing::debug!(currency = %currency, "no web access, market request skipped");
            return None;
        }
        if !self.pending_markets.insert(currency.clone()) {
            tracing::debug!(currency = %currency, "market request already in flight");
            return None;
        }
        tracing::debug!(currency = %currency, "requesting market list");
        Some(Action::Fetch(self.client.markets_request(currency)))
    }

    /// Applies a market list response. Returns whether the view changed.
    ///
    /// Responses for a currency other than the selected one are dropped.
    pub fn apply_markets(&mut self, currency: &CurrencyCode, result: Result<Vec<CoinSummary>>) -> bool {
        self.pending_markets.remove(currency);

        if *currency != self.selected_currency() {
            tracing::debug!(
                currency = %currency,
                selected = %self.selected_currency(),
                "discarding market response for a currency no longer selected"
            );
            return false;
        }

        match result {
            Ok(coins) => {
                tracing::debug!(currency = %currency, coins = coins.len(), "market snapshot replaced");
                self.snapshot = Some(MarketSnapshot::new(currency.clone(), coins));
                self.list_error = None;
                self.refresh_rows();
            }
            Err(e) => {
                tracing::warn!(currency = %currency, error = %e, "market list fetch failed");
                self.list_error = Some(e.to_string());
                if self.detail_view.is_some() {
                    // The error page replaces the table; the panel would be invisible.
                    self.close_detail();
                }
            }
        }
        true
    }

    /// Switches to the next selectable currency and refetches the list for it.
    pub fn cycle_currency(&mut self) -> Option<Action> {
        let next = self.selected_currency().next_selectable();
        tracing::debug!(currency = %next, "currency selected");
        self.navigation.set_selected_currency(&next);
        self.request_markets(&next)
    }

    /// Opens the detail panel for the selected row.
    ///
    /// Issues a detail request only when the cache neither holds nor is already
    /// fetching that coin.
    pub fn open_detail(&mut self) -> Option<Vec<Action>> {
        let id = self.selected_coin()?.id.clone();

        self.input_mode = InputMode::Detail {
            return_to_search: self.input_mode.is_search(),
        };
        self.detail_view = Some(DetailView::open(id.clone()));

        let decision = self.details.begin(&id);
        tracing::debug!(coin_id = %id, decision = ?decision, "detail requested");

        Some(match decision {
            FetchDecision::Issue => vec![Action::Fetch(self.client.detail_request(&id))],
            FetchDecision::InFlight | FetchDecision::Cached => vec![],
        })
    }

    pub fn close_detail(&mut self) {
        self.detail_view = None;
        self.input_mode = match self.input_mode {
            InputMode::Detail {
                return_to_search: true,
            } => InputMode::Search(SearchFocus::Navigating),
            InputMode::Detail { .. } => InputMode::Normal,
            other => other,
        };
    }

    /// Applies a detail response. Returns whether the open panel changed.
    ///
    /// The cache is always updated; the panel only reacts to its own coin.
    pub fn apply_detail(&mut self, id: &str, result: Result<CoinDetail>) -> bool {
        let outcome = self.details.complete(id, result);
        tracing::debug!(
            coin_id = %id,
            cached = self.details.ready_len(),
            capacity = self.details.capacity(),
            "detail response stored"
        );
        let Some(view) = self.detail_view.as_mut() else {
            return false;
        };
        if view.id != id {
            tracing::debug!(coin_id = %id, open = %view.id, "detail stored for a closed panel");
            return false;
        }
        if let Err(e) = outcome {
            tracing::warn!(coin_id = %id, error = %e, "coin detail fetch failed");
            view.apply_error(&e);
        }
        true
    }

    /// Which screen the table area currently shows.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        if self.permission == Permission::Denied {
            return PageState::Failed("Web access permission was denied".to_string());
        }
        if let Some(message) = &self.list_error {
            return PageState::Failed(message.clone());
        }
        match &self.snapshot {
            None => PageState::Loading,
            Some(snapshot) if snapshot.coins.is_empty() => PageState::NoData,
            Some(_) if self.rows.is_empty() => PageState::NoMatches,
            Some(_) => PageState::Rows,
        }
    }

    /// Computes a renderable view model for a pane of `rows` x `cols` cells.
    ///
    /// Rows are windowed so the selection stays visible: the window is
    /// centered on the selection and pulled back near either end.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let page = self.page_state();
        let currency = self.selected_currency();
        // Figures stay in the currency they were fetched in until the new list lands.
        let row_currency = self
            .snapshot
            .as_ref()
            .map_or_else(|| currency.clone(), |s| s.currency.clone());

        let (display_items, selected_display_index) = if page == PageState::Rows {
            let available_rows = self.calculate_available_rows(rows).max(1);

            let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
            let visible_end = (visible_start + available_rows).min(self.rows.len());
            if visible_end - visible_start < available_rows && self.rows.len() >= available_rows {
                visible_start = visible_end.saturating_sub(available_rows);
            }

            let items = self.rows[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(relative_idx, coin)| {
                    self.compute_display_item(coin, visible_start + relative_idx, &row_currency)
                })
                .collect();
            (items, self.selected_index.saturating_sub(visible_start))
        } else {
            (vec![], 0)
        };

        UIViewModel {
            empty_state: Self::compute_empty_state(&page),
            no_matches: (page == PageState::NoMatches)
                .then(|| "No coins match your search.".to_string()),
            page,
            display_items,
            selected_index: selected_display_index,
            columns: self.compute_columns(),
            header: self.compute_header(&currency),
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(),
            detail: self.compute_detail_panel(),
        }
    }

    fn compute_display_item(&self, coin: &CoinSummary, absolute_idx: usize, currency: &CurrencyCode) -> DisplayItem {
        let symbol = coin.symbol.to_uppercase();
        let name_width = NAME_COLUMN_WIDTH
            .saturating_sub(symbol.chars().count() + 2)
            .max(4);
        let name = truncate_chars(&coin.name, name_width);
        let name_len = name.chars().count();

        let highlight_ranges = if self.search_query.trim().is_empty() {
            vec![]
        } else {
            market::match_range(&coin.name, &self.search_query)
                .filter(|&(_, end)| end <= name_len)
                .into_iter()
                .collect()
        };

        DisplayItem {
            rank: coin
                .market_cap_rank
                .map_or_else(|| market::MISSING_VALUE.to_string(), |r| r.to_string()),
            name,
            symbol,
            price: market::format_optional_price(coin.current_price, currency),
            change: coin
                .price_change_percentage_24h
                .map_or_else(|| market::MISSING_VALUE.to_string(), market::format_percent_change),
            change_direction: ChangeDirection::of(coin.price_change_percentage_24h),
            market_cap: market::format_optional_compact(coin.market_cap, currency),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_columns(&self) -> Vec<ColumnHeader> {
        SortColumn::ALL
            .iter()
            .map(|&column| {
                let direction = self.sort.direction_of(column);
                let label = direction.map_or_else(
                    || column.label().to_string(),
                    |d| format!("{} {}", column.label(), d.indicator()),
                );
                ColumnHeader {
                    column,
                    label,
                    is_active: direction.is_some(),
                }
            })
            .collect()
    }

    fn compute_header(&self, currency: &CurrencyCode) -> HeaderInfo {
        let freshness = match &self.snapshot {
            _ if self.pending_markets.contains(currency) => "refreshing...".to_string(),
            Some(snapshot) if snapshot.currency != *currency => "refreshing...".to_string(),
            Some(snapshot) => format!("updated {}", snapshot.age_label(chrono::Utc::now().timestamp())),
            None => "not loaded".to_string(),
        };

        HeaderInfo {
            title: format!(" Crypto Market ({}) ", self.rows.len()),
            status: format!(
                "{}  ?{}  {}",
                currency.display(),
                self.navigation.to_query_string(),
                freshness
            ),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Tab: results  Enter: details  Ctrl+n/p: navigate  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate  1-5: sort  Enter: details"
            }
            InputMode::Normal => {
                "j/k: navigate  Enter: details  /: search  1-5: sort  c: currency  r: refresh  q: quit"
            }
            InputMode::Detail { .. } => "ESC/q/Enter: close details",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(page: &PageState) -> Option<EmptyState> {
        let (message, subtitle, is_error) = match page {
            PageState::Loading => (
                "Loading cryptocurrency data...".to_string(),
                "Fetching the latest market information".to_string(),
                false,
            ),
            PageState::Failed(reason) => (
                "Error loading data. Please try again later.".to_string(),
                format!("{reason}  (r: retry  q: quit)"),
                true,
            ),
            PageState::NoData => (
                "No market data available".to_string(),
                "r: refresh  q: quit".to_string(),
                false,
            ),
            PageState::NoMatches | PageState::Rows => return None,
        };
        Some(EmptyState {
            message,
            subtitle,
            is_error,
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let visible = matches!(
            self.input_mode,
            InputMode::Search(_) | InputMode::Detail { return_to_search: true }
        );
        visible.then(|| SearchBarInfo {
            query: self.search_query.clone(),
            is_focused: self.input_mode.is_typing(),
        })
    }

    fn compute_detail_panel(&self) -> Option<DetailPanel> {
        let view = self.detail_view.as_ref()?;
        let summary_name = self
            .snapshot
            .as_ref()
            .and_then(|s| s.coins.iter().find(|c| c.id == view.id))
            .map(|c| c.name.clone());

        if let Some(detail) = self.details.get(&view.id) {
            let usd = CurrencyCode::new(DETAIL_CURRENCY);
            return Some(DetailPanel {
                title: detail.name.clone(),
                body: DetailBody::Ready {
                    description: preview_description(&detail.description),
                    price: market::format_optional_price(detail.price, &usd),
                    market_cap: market::format_optional_compact(detail.market_cap, &usd),
                    image: detail.image.clone(),
                },
            });
        }

        Some(DetailPanel {
            title: summary_name.unwrap_or_else(|| view.id.clone()),
            body: view
                .error
                .clone()
                .map_or(DetailBody::Loading, DetailBody::Failed),
        })
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Search(_) | InputMode::Detail { return_to_search: true } => {
                total_rows.saturating_sub(SEARCH_CHROME_ROWS)
            }
            InputMode::Normal | InputMode::Detail { .. } => total_rows.saturating_sub(NORMAL_CHROME_ROWS),
        }
    }
}

/// Truncates `text` to at most `max` characters, ending in `...` when cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// First [`DESCRIPTION_PREVIEW_CHARS`] characters of a description, followed by `...`.
fn preview_description(description: &str) -> String {
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}...", preview.trim_end())
}
