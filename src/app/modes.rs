//! Input mode state types.
//!
//! The plugin operates in one of three input modes:
//! - **Normal**: table navigation and commands
//! - **Search**: editing the filter query, or navigating its results
//! - **Detail**: the detail panel is open over the table
//!
//! ```rust
//! use coinpane::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_search());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query.
    Typing,
    /// Keys move through the filtered rows; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
///
/// Determines which keybindings are active and the footer hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,
    /// Search mode with its focus.
    Search(SearchFocus),
    /// Detail panel open. Remembers whether search was active underneath so
    /// closing the panel returns to it.
    Detail { return_to_search: bool },
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Whether key presses are text input for the query.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }

    #[must_use]
    pub const fn is_detail(self) -> bool {
        matches!(self, Self::Detail { .. })
    }
}
