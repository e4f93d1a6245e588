//! Header component renderer.
//!
//! Two centered lines: the bold title and a dim status line with the selected
//! currency, share query and data freshness.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header starting at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [padding]  Crypto Market (50)  [padding]
/// [padding] USD  ?currency=usd  updated just now [padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let status: String = header.status.chars().take(cols).collect();
    let status_len = display_width(&status);
    let status_padding = (cols.saturating_sub(status_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(status_padding));
    print!("{status}");
    print!("{}", " ".repeat(cols.saturating_sub(status_padding + status_len)));
    print!("{}", Theme::reset());

    row + 2
}
