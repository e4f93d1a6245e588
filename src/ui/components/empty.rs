//! Full-page message renderer (loading, list error, no data).

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at row 6.
///
/// Errors use `error_fg`; other messages use `empty_state_fg`. The subtitle
/// is dimmed.
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, cols: usize) {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };
    render_centered(6, &empty.message, color, false, cols);
    render_centered(7, &empty.subtitle, &theme.colors.text_dim, true, cols);
}

fn render_centered(row: usize, text: &str, color: &str, dim: bool, cols: usize) {
    let text: String = text.chars().take(cols).collect();
    let len = display_width(&text);
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(row, 1);
    if dim {
        print!("{}", Theme::dim());
    }
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
