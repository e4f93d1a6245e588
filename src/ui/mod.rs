//! Terminal rendering layer.
//!
//! Transforms view models into ANSI-styled output through small rendering
//! components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready types computed from state
//! - [`renderer`]: top-level coordinator
//! - [`components`]: header, search box, table, detail panel, messages
//! - [`helpers`]: cursor, highlighting, padding and wrapping utilities
//! - [`theme`]: color schemes and ANSI sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    ChangeDirection, ColumnHeader, DetailBody, DetailPanel, DisplayItem, EmptyState, FooterInfo,
    HeaderInfo, PageState, SearchBarInfo, UIViewModel,
};
