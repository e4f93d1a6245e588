//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the pure layers (`market`,
//! `api`, `domain`). Data flows one way:
//!
//! ```text
//! Key / Timer / WebRequestResult → Event → handle_event → AppState → Actions
//!                                                            │           │
//!                                              compute_viewmodel     web_request,
//!                                                            ↓       set_timeout
//!                                                        renderer
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the event handler
//! - [`detail`]: detail cache with in-flight deduplication, open panel state
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: input mode state machine types
//! - [`navigation`]: selected currency held in a share query
//! - [`state`]: central state container and view model computation

pub mod actions;
pub mod detail;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod state;

pub use actions::Action;
pub use detail::{DetailCache, DetailView, FetchDecision};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use navigation::{NavigationState, QueryState};
pub use state::{AppState, Permission};
