//! Zellij plugin wrapper and entry point.
//!
//! Translates Zellij events into library [`Event`]s, runs them through
//! [`handle_event`] and performs the returned [`Action`]s with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess`; nothing is fetched until granted
//! 3. **Fetch**: list and detail requests go out through `web_request`, tagged
//!    with a context map so results can be matched when they come back
//! 4. **Refresh**: a `set_timeout` timer re-arms itself every interval
//! 5. **Render**: delegate to the library rendering layer
//!
//! # Keybindings
//!
//! Global (except in the detail panel):
//! - `Ctrl+n` / `Ctrl+p`: move down / up
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: move
//! - `Enter`: open detail
//! - `/`: search
//! - `1`-`5`: sort by rank, name, price, 24h, market cap
//! - `c`: cycle currency
//! - `r`: refresh now
//! - `q`/`Esc`: close plugin
//!
//! Search mode (typing):
//! - any character: edit query
//! - `Tab`: focus results
//! - `Enter`: open detail
//! - `Esc`: exit search
//!
//! Search mode (results focused):
//! - `j`/`k`, `1`-`5`, `Enter` as in normal mode
//! - `/`: back to the query
//!
//! Detail panel:
//! - `Esc`, `q`, `Enter`: close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use coinpane::api::{HttpResponse, RequestContext};
use coinpane::market::SortColumn;
use coinpane::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

struct State {
    app: coinpane::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: coinpane::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        coinpane::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            currency = %config.currency,
            per_page = config.per_page,
            refresh_interval = config.refresh_interval,
            "parsed configuration"
        );
        self.app = coinpane::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::RefreshTick,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - market data unavailable");
                    Event::PermissionsDenied
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        coinpane::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keys to events according to the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let mode = self.app.input_mode;

        if mode.is_detail() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetail),
                _ => None,
            };
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match mode {
            InputMode::Search(SearchFocus::Typing) => Self::map_typing_key(key.bare_key),
            InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                BareKey::Char('/') => Some(Event::FocusSearchBar),
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Backspace => Some(Event::Backspace),
                other => Self::map_table_key(other),
            },
            _ => match key.bare_key {
                BareKey::Char('/') => Some(Event::SearchMode),
                BareKey::Char('c') => Some(Event::CycleCurrency),
                BareKey::Char('r') => Some(Event::Refresh),
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                other => Self::map_table_key(other),
            },
        }
    }

    fn map_typing_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Tab => Event::FocusResults,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Keys shared by normal mode and focused search results.
    fn map_table_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char(c) => Event::SortBy(SortColumn::from_digit(c)?),
            _ => return None,
        })
    }

    /// Pairs a finished web request with the request that caused it.
    fn map_web_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request) = RequestContext::from_map(context) else {
            tracing::debug!(status = status, "web result without a coinpane context, ignoring");
            return None;
        };

        let response = HttpResponse::new(status, body);
        Some(match request {
            RequestContext::Markets { currency } => Event::MarketsResponse { currency, response },
            RequestContext::Detail { id } => Event::DetailResponse { id, response },
        })
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, "issuing web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.to_map(),
                );
            }
            Action::ScheduleRefresh { seconds } => {
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*seconds as f64);
            }
        }
    }
}
