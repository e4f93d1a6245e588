//! Table component renderer.
//!
//! Five columns: `#`, `NAME` (name plus dim ticker), `PRICE`, `24H` and
//! `MARKET CAP`. Numeric columns are right-aligned; the 24h change is colored
//! by sign. The active sort column carries a ▲/▼ arrow.

use crate::app::state::NAME_COLUMN_WIDTH;
use crate::market::SortColumn;
use crate::ui::helpers::{self, display_width, pad_left, pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ChangeDirection, ColumnHeader, DisplayItem};

const RANK_WIDTH: usize = 5;
const PRICE_WIDTH: usize = 18;
const CHANGE_WIDTH: usize = 10;
const MARKET_CAP_WIDTH: usize = 14;
const GAP: &str = "  ";

/// Total width of one table line.
pub const TABLE_WIDTH: usize =
    RANK_WIDTH + NAME_COLUMN_WIDTH + PRICE_WIDTH + CHANGE_WIDTH + MARKET_CAP_WIDTH + 4 * GAP.len();

fn cell(column: SortColumn, text: &str) -> String {
    match column {
        SortColumn::Rank => pad_right(text, RANK_WIDTH),
        SortColumn::Name => pad_right(text, NAME_COLUMN_WIDTH),
        SortColumn::Price => pad_left(text, PRICE_WIDTH),
        SortColumn::Change24h => pad_left(text, CHANGE_WIDTH),
        SortColumn::MarketCap => pad_left(text, MARKET_CAP_WIDTH),
    }
}

/// Renders the column header line at `row` and returns the next row.
pub fn render_table_headers(row: usize, columns: &[ColumnHeader], theme: &Theme) -> usize {
    position_cursor(row, 1);
    for (idx, header) in columns.iter().enumerate() {
        if idx > 0 {
            print!("{GAP}");
        }
        print!("{}", Theme::bold());
        if header.is_active {
            print!("{}", Theme::fg(&theme.colors.search_bar_border));
        } else {
            print!("{}", Theme::fg(&theme.colors.header_fg));
        }
        print!("{}", cell(header.column, &header.label));
        print!("{}", Theme::reset());
    }
    row + 1
}

/// Renders all rows starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders the centered "no matches" line inside the table area.
pub fn render_no_matches(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    let len = display_width(message);
    let padding = cols.min(TABLE_WIDTH).saturating_sub(len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}{message}", " ".repeat(padding));
    print!("{}", Theme::reset());
    row + 2
}

fn base_colors(item: &DisplayItem, theme: &Theme) {
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
}

/// Renders one row, padded to the full pane width so the selection
/// background spans the line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    base_colors(item, theme);

    print!("{}{GAP}", cell(SortColumn::Rank, &item.rank));

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!(" {}", item.symbol);
    let name_len = display_width(&item.name) + 1 + display_width(&item.symbol);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(name_len)));
    base_colors(item, theme);

    print!("{GAP}{}{GAP}", cell(SortColumn::Price, &item.price));

    if !item.is_selected {
        match item.change_direction {
            ChangeDirection::Gain => print!("{}", Theme::fg(&theme.colors.positive_fg)),
            ChangeDirection::Loss => print!("{}", Theme::fg(&theme.colors.negative_fg)),
            ChangeDirection::Unknown => print!("{}", Theme::fg(&theme.colors.text_dim)),
        }
    }
    print!("{}", cell(SortColumn::Change24h, &item.change));
    base_colors(item, theme);

    print!("{GAP}{}", cell(SortColumn::MarketCap, &item.market_cap));
    print!("{}", " ".repeat(cols.saturating_sub(TABLE_WIDTH)));

    print!("{}", Theme::reset());
    row + 1
}
