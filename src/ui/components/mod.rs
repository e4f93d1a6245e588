//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: title and status lines
//! - [`footer`]: keybinding hints
//! - [`search`]: search input box
//! - [`table`]: market table with sort indicators
//! - [`empty`]: full-page loading / error / no-data message
//! - [`detail`]: detail panel overlay
//!
//! # Layout
//!
//! ```text
//! row 1     blank
//! row 2-3   header (title, status)
//! row 4     border
//!           search box (3 rows, search mode only)
//!           column headers
//!           rows ... or "No coins match your search."
//! rows-2    border
//! rows-1    footer
//! ```
//!
//! The detail panel is drawn last, over the table.

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;

pub use detail::render_detail_panel;
pub use empty::render_empty_state;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_no_matches, render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders header, optional search box, table and footer.
pub fn render_table_page(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, &vm.columns, theme);

    if let Some(message) = &vm.no_matches {
        render_no_matches(current_row, message, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
