//! Coinpane: a Zellij plugin showing a live cryptocurrency market table.
//!
//! Coinpane lists the top coins by market cap from the CoinGecko API and lets
//! you:
//! - Filter the table by name or symbol as you type
//! - Sort by rank, name, price, 24h change or market cap
//! - Switch the display currency (USD, EUR, GBP)
//! - Open a detail panel with description and USD figures for a coin

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions                          │
//! │  - Detail cache, navigation state                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Market Layer  │   │ API Layer     │
//! │ (ui/)         │   │ (market/)     │   │ (api/)        │
//! │ - Rendering   │   │ - Formatting  │   │ - Requests    │
//! │ - Theming     │   │ - Filtering   │   │ - Decoding    │
//! │ - Components  │   │ - Sorting     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Coins, currencies, errors (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a local OTLP JSON file  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/coinpane.wasm" {
//!         currency "eur"
//!         per_page "100"
//!         refresh_interval "120"
//!         api_key "CG-..."
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `load` parses [`Config`], initializes tracing and builds [`AppState`]
//! 2. The plugin requests `WebAccess` and shows the loading page
//! 3. Once granted, the market list is fetched and a refresh timer is armed
//! 4. Each `WebRequestResult` is decoded and applied; stale currencies are dropped
//!
//! # Example
//!
//! ```rust
//! use coinpane::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), coinpane::CoinpaneError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod market;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{CoinDetail, CoinSummary, CoinpaneError, CurrencyCode, Result};
pub use ui::Theme;

use api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
use app::detail::{DetailCache, DEFAULT_DETAIL_CACHE_SIZE};
use app::navigation::{NavigationState, QueryState, CURRENCY_PARAM};
use app::state::DEFAULT_REFRESH_INTERVAL;
use std::collections::BTreeMap;
use std::str::FromStr;

/// CoinGecko rejects `per_page` above this.
const MAX_PER_PAGE: u32 = 250;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial display currency. Default: `usd`.
    pub currency: CurrencyCode,

    /// Initial share query, e.g. `currency=eur`. A currency in the query wins
    /// over `currency`.
    pub query: Option<String>,

    /// Coins per market list request, 1 to 250. Default: 50.
    pub per_page: u32,

    /// Seconds between background refreshes. Default: 300.
    pub refresh_interval: u64,

    pub api_base_url: String,

    /// Demo API key sent as `x-cg-demo-api-key`.
    pub api_key: Option<String>,

    /// Ready coin details kept in memory. Default: 16.
    pub detail_cache_size: usize,

    /// Built-in theme: `catppuccin-mocha` or `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Custom TOML theme path; `~` resolves to the sandbox host root.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            query: None,
            per_page: DEFAULT_PER_PAGE,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            detail_cache_size: DEFAULT_DETAIL_CACHE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key is optional. Blank or invalid values fall back to the
    /// default and are logged at debug level.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use coinpane::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("currency".to_string(), "EUR".to_string());
    /// map.insert("per_page".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.currency.as_str(), "eur");
    /// assert_eq!(config.per_page, 50);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let currency = text("currency")
            .map(|raw| CurrencyCode::new(&raw))
            .filter(|code| {
                let ok = code.is_well_formed();
                if !ok {
                    tracing::debug!(currency = %code, "invalid currency, using default");
                }
                ok
            })
            .unwrap_or(defaults.currency);

        Self {
            currency,
            query: text("query"),
            per_page: parse_in_range(config, "per_page", 1..=MAX_PER_PAGE, defaults.per_page),
            refresh_interval: parse_in_range(
                config,
                "refresh_interval",
                1..=u64::MAX,
                defaults.refresh_interval,
            ),
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            api_key: text("api_key"),
            detail_cache_size: parse_in_range(
                config,
                "detail_cache_size",
                1..=usize::MAX,
                defaults.detail_cache_size,
            ),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }
}

fn parse_in_range<T>(
    config: &BTreeMap<String, String>,
    key: &str,
    range: std::ops::RangeInclusive<T>,
    default: T,
) -> T
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
{
    let Some(raw) = config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) if range.contains(&value) => value,
        _ => {
            tracing::debug!(key = %key, value = %raw, default = %default, "invalid config value, using default");
            default
        }
    }
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the initial [`AppState`] from configuration.
///
/// Nothing is fetched here; the first request goes out once web access is
/// granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing coinpane plugin");

    let theme = load_theme(config);

    let client = ApiClient::new(&config.api_base_url, config.per_page, config.api_key.clone())
        .or_else(|e| {
            tracing::debug!(error = %e, "invalid api_base_url, using default");
            ApiClient::new(DEFAULT_BASE_URL, config.per_page, config.api_key.clone())
        })
        .unwrap_or_default();

    let mut navigation = config
        .query
        .as_deref()
        .map(QueryState::parse)
        .unwrap_or_default();
    if !navigation.has_param(CURRENCY_PARAM) {
        navigation.set_selected_currency(&config.currency);
    }

    let mut state = AppState::new(theme, client, navigation);
    state.details = DetailCache::new(config.detail_cache_size);
    state.refresh_interval = config.refresh_interval;

    tracing::debug!(
        currency = %state.selected_currency(),
        per_page = state.client.per_page(),
        detail_cache_size = state.details.capacity(),
        refresh_interval = state.refresh_interval,
        "app state initialized"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.currency.as_str(), "usd");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.refresh_interval, 300);
        assert_eq!(config.api_base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.detail_cache_size, 16);
        assert!(config.api_key.is_none());
        assert!(config.query.is_none());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("currency", "GBP"),
            ("query", "currency=eur"),
            ("per_page", "100"),
            ("refresh_interval", "60"),
            ("api_base_url", "http://localhost:8080/v3"),
            ("api_key", "CG-demo"),
            ("detail_cache_size", "4"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.currency.as_str(), "gbp");
        assert_eq!(config.query.as_deref(), Some("currency=eur"));
        assert_eq!(config.per_page, 100);
        assert_eq!(config.refresh_interval, 60);
        assert_eq!(config.api_base_url, "http://localhost:8080/v3");
        assert_eq!(config.api_key.as_deref(), Some("CG-demo"));
        assert_eq!(config.detail_cache_size, 4);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("currency", "dollars"),
            ("per_page", "1000"),
            ("refresh_interval", "0"),
            ("detail_cache_size", "-2"),
            ("api_key", "  "),
        ]));

        assert_eq!(config.currency.as_str(), "usd");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.refresh_interval, 300);
        assert_eq!(config.detail_cache_size, 16);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn query_currency_wins_over_config_currency() {
        let config = Config {
            currency: CurrencyCode::new("gbp"),
            query: Some("currency=eur&view=compact".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.selected_currency().as_str(), "eur");
        assert_eq!(
            state.navigation.to_query_string(),
            "currency=eur&view=compact"
        );
    }

    #[test]
    fn config_currency_seeds_empty_query() {
        let config = Config {
            currency: CurrencyCode::new("gbp"),
            refresh_interval: 30,
            detail_cache_size: 2,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.selected_currency().as_str(), "gbp");
        assert_eq!(state.refresh_interval, 30);
        assert_eq!(state.details.capacity(), 2);
    }

    #[test]
    fn bad_base_url_and_theme_fall_back() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            theme_name: Some("solarized".to_string()),
            theme_file: None,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
        assert_eq!(state.client.per_page(), 50);
        let request = state.client.markets_request(&CurrencyCode::new("usd"));
        assert!(request.url.starts_with("https://api.coingecko.com/api/v3/coins/markets?"));
    }

    #[test]
    fn missing_theme_file_falls_back() {
        let config = Config {
            theme_file: Some("/nonexistent/coinpane-theme.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-mocha");
    }
}
