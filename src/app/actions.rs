//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to Zellij directly. It
//! returns a list of [`Action`]s that the plugin shim executes in order:
//!
//! ```rust
//! use coinpane::api::ApiClient;
//! use coinpane::app::Action;
//! use coinpane::domain::CurrencyCode;
//!
//! let client = ApiClient::new("https://api.coingecko.com/api/v3", 50, None)?;
//! let actions = vec![
//!     Action::Fetch(client.markets_request(&CurrencyCode::default())),
//!     Action::ScheduleRefresh { seconds: 300 },
//! ];
//! # Ok::<(), coinpane::CoinpaneError>(())
//! ```

use crate::api::ApiRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a web request through the host. The response comes back as a
    /// `WebRequestResult` carrying the request's context.
    Fetch(ApiRequest),

    /// Arms a one-shot timer; its expiry is delivered as a refresh tick.
    ScheduleRefresh {
        /// Delay before the tick.
        seconds: u64,
    },
}
