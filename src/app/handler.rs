//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that can happen to
//! the plugin: key presses (already mapped to intent by the shim), permission
//! results, timer ticks and web request results. It mutates [`AppState`] and
//! returns the side effects to perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`,
//!   `Char`, `Backspace`, `Escape`
//! - **Table**: `SortBy`, `CycleCurrency`, `Refresh`
//! - **Detail**: `OpenDetail`, `CloseDetail`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `RefreshTick`,
//!   `MarketsResponse`, `DetailResponse`
//!
//! # Example
//!
//! ```rust
//! use coinpane::api::ApiClient;
//! use coinpane::app::{handle_event, navigation::QueryState, AppState, Event};
//! use coinpane::ui::Theme;
//!
//! let client = ApiClient::new("https://api.coingecko.com/api/v3", 50, None)?;
//! let mut state = AppState::new(Theme::default(), client, QueryState::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(actions.len(), 2); // list fetch + refresh timer
//! # Ok::<(), coinpane::CoinpaneError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use super::state::Permission;
use crate::api::{decode_detail, decode_markets, HttpResponse};
use crate::app::{Action, AppState};
use crate::domain::{CurrencyCode, Result};
use crate::market::SortColumn;

/// Events triggered by user input, the host, or completed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down (wraps to top).
    KeyDown,
    /// Moves the selection up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the query input (from navigating).
    FocusSearchBar,
    /// Focuses the result rows (from typing).
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Clears the query and returns to normal mode.
    Escape,
    /// Activates a column in the sort toggle cycle.
    SortBy(SortColumn),
    /// Switches to the next selectable currency.
    CycleCurrency,
    /// Refetches the market list now.
    Refresh,
    /// Opens the detail panel for the selected row.
    OpenDetail,
    /// Closes the detail panel.
    CloseDetail,
    /// The host granted web access.
    PermissionsGranted,
    /// The host denied web access.
    PermissionsDenied,
    /// The periodic refresh timer fired.
    RefreshTick,
    /// A market list request completed.
    MarketsResponse {
        currency: CurrencyCode,
        response: HttpResponse,
    },
    /// A coin detail request completed.
    DetailResponse { id: String, response: HttpResponse },
}

/// Processes an event, mutates state and returns `(should_render, actions)`.
///
/// # Errors
///
/// Reserved for failures that cannot be shown in the UI. Fetch and decode
/// failures are not errors here: they become page or panel state.
///
/// # Tracing
///
/// Each call runs inside a debug-level `handle_event` span carrying the event.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            if state.input_mode.is_detail() {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.input_mode.is_detail() {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            state.refresh_rows();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.trim().is_empty() {
                state.input_mode = InputMode::Normal;
                state.search_query = String::new();
                state.refresh_rows();
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.search_query, "leaving search mode");
            state.input_mode = InputMode::Normal;
            state.search_query = String::new();
            state.refresh_rows();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, char = %c, "search query updated");
            state.refresh_rows();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.search_query.pop();
            state.refresh_rows();
            Ok((true, vec![]))
        }
        Event::SortBy(column) => {
            if state.input_mode.is_detail() {
                return Ok((false, vec![]));
            }
            state.toggle_sort(*column);
            tracing::debug!(sort = ?state.sort.active(), "sort changed");
            Ok((true, vec![]))
        }
        Event::CycleCurrency => {
            if state.input_mode.is_detail() {
                return Ok((false, vec![]));
            }
            Ok((true, state.cycle_currency().into_iter().collect()))
        }
        Event::Refresh => {
            if state.permission != Permission::Granted {
                tracing::debug!("refresh ignored without web access");
                return Ok((false, vec![]));
            }
            state.list_error = None;
            let currency = state.selected_currency();
            Ok((true, state.request_markets(&currency).into_iter().collect()))
        }
        Event::OpenDetail => state.open_detail().map_or_else(
            || {
                tracing::debug!("no coin selected");
                Ok((false, vec![]))
            },
            |actions| Ok((true, actions)),
        ),
        Event::CloseDetail => {
            if !state.input_mode.is_detail() {
                return Ok((false, vec![]));
            }
            state.close_detail();
            Ok((true, vec![]))
        }
        Event::PermissionsGranted => {
            tracing::debug!("web access granted - loading market data");
            state.permission = Permission::Granted;
            let currency = state.selected_currency();
            let mut actions: Vec<Action> = state.request_markets(&currency).into_iter().collect();
            actions.push(Action::ScheduleRefresh {
                seconds: state.refresh_interval,
            });
            Ok((true, actions))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied - market data unavailable");
            state.permission = Permission::Denied;
            Ok((true, vec![]))
        }
        Event::RefreshTick => {
            let currency = state.selected_currency();
            let mut actions: Vec<Action> = state.request_markets(&currency).into_iter().collect();
            actions.push(Action::ScheduleRefresh {
                seconds: state.refresh_interval,
            });
            Ok((false, actions))
        }
        Event::MarketsResponse { currency, response } => {
            tracing::debug!(currency = %currency, status = response.status, "market response received");
            let render = state.apply_markets(currency, decode_markets(response));
            Ok((render, vec![]))
        }
        Event::DetailResponse { id, response } => {
            tracing::debug!(coin_id = %id, status = response.status, "detail response received");
            let render = state.apply_detail(id, decode_detail(id, response));
            Ok((render, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, RequestContext};
    use crate::app::navigation::QueryState;
    use crate::ui::viewmodel::PageState;
    use crate::ui::Theme;

    const MARKETS: &str = r#"[
        {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":60000,"market_cap":1.2e12,"market_cap_rank":1,"price_change_percentage_24h":1.0},
        {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3000,"market_cap":3.6e11,"market_cap_rank":2,"price_change_percentage_24h":-1.0}
    ]"#;

    fn granted() -> AppState {
        let client = ApiClient::new("https://api.coingecko.com/api/v3", 50, None).unwrap();
        let mut state = AppState::new(Theme::default(), client, QueryState::default());
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        state
    }

    fn markets(currency: &str) -> Event {
        Event::MarketsResponse {
            currency: CurrencyCode::new(currency),
            response: HttpResponse::new(200, MARKETS),
        }
    }

    #[test]
    fn permission_grant_fetches_and_schedules() {
        let client = ApiClient::new("https://api.coingecko.com/api/v3", 50, None).unwrap();
        let mut state = AppState::new(Theme::default(), client, QueryState::default());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(matches!(&actions[0], Action::Fetch(r) if matches!(r.context, RequestContext::Markets { .. })));
        assert_eq!(actions[1], Action::ScheduleRefresh { seconds: 300 });
    }

    #[test]
    fn refresh_tick_rearms_timer_without_duplicate_fetch() {
        let mut state = granted();
        let (_, actions) = handle_event(&mut state, &Event::RefreshTick).unwrap();
        assert_eq!(actions, vec![Action::ScheduleRefresh { seconds: 300 }]);
    }

    #[test]
    fn typing_outside_search_is_ignored() {
        let mut state = granted();
        handle_event(&mut state, &markets("usd")).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Char('e')).unwrap();
        assert!(!render);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn search_filters_and_escape_restores() {
        let mut state = granted();
        handle_event(&mut state, &markets("usd")).unwrap();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "eth".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.rows.len(), 1);
        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn no_matches_keeps_search_visible() {
        let mut state = granted();
        handle_event(&mut state, &markets("usd")).unwrap();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('z')).unwrap();
        let vm = state.compute_viewmodel(24, 100);
        assert_eq!(vm.page, PageState::NoMatches);
        assert!(vm.search_bar.is_some());
        assert_eq!(vm.no_matches.as_deref(), Some("No coins match your search."));
    }

    #[test]
    fn open_detail_with_no_rows_does_nothing() {
        let mut state = granted();
        let (render, actions) = handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.detail_view.is_none());
    }

    #[test]
    fn detail_from_search_returns_to_results() {
        let mut state = granted();
        handle_event(&mut state, &markets("usd")).unwrap();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(state.input_mode.is_detail());
        assert!(state.compute_viewmodel(24, 100).search_bar.is_some());

        handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
        assert_eq!(state.search_query, "b");
    }

    #[test]
    fn refresh_without_permission_is_ignored() {
        let client = ApiClient::new("https://api.coingecko.com/api/v3", 50, None).unwrap();
        let mut state = AppState::new(Theme::default(), client, QueryState::default());
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(actions.is_empty());
        assert!(matches!(state.page_state(), PageState::Failed(_)));
    }
}
