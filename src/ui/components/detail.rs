//! Detail panel overlay renderer.
//!
//! A framed box drawn over the table, centered horizontally, showing the coin
//! name, a wrapped description preview and its USD price and market cap. A
//! failed fetch shows the error in place of the body.

use crate::ui::helpers::{display_width, pad_right, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailBody, DetailPanel};

const PANEL_MAX_WIDTH: usize = 72;
const PANEL_TOP_ROW: usize = 5;

/// Renders the panel over whatever is already on screen.
pub fn render_detail_panel(panel: &DetailPanel, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(PANEL_MAX_WIDTH);
    if width < 10 {
        return;
    }
    let inner = width - 4;
    let left = (cols - width) / 2 + 1;

    let mut lines: Vec<(String, &str)> = vec![(String::new(), theme.colors.text_normal.as_str())];
    match &panel.body {
        DetailBody::Loading => {
            lines.push(("Loading coin details...".to_string(), theme.colors.text_dim.as_str()));
        }
        DetailBody::Failed(message) => {
            for line in wrap_text(message, inner) {
                lines.push((line, theme.colors.error_fg.as_str()));
            }
        }
        DetailBody::Ready {
            description,
            price,
            market_cap,
            image,
        } => {
            for line in wrap_text(description, inner) {
                lines.push((line, theme.colors.text_normal.as_str()));
            }
            lines.push((String::new(), theme.colors.text_normal.as_str()));
            lines.push((format!("Current Price: {price}"), theme.colors.header_fg.as_str()));
            lines.push((format!("Market Cap:    {market_cap}"), theme.colors.header_fg.as_str()));
            if let Some(image) = image {
                lines.push((format!("Icon: {image}"), theme.colors.text_dim.as_str()));
            }
        }
    }
    lines.push((String::new(), theme.colors.text_normal.as_str()));

    let max_body = rows.saturating_sub(PANEL_TOP_ROW + 3);
    lines.truncate(max_body);

    let border = Theme::fg(&theme.colors.panel_border);
    let title: String = format!(" {} ", panel.title).chars().take(inner).collect();
    let top_fill = (width - 2).saturating_sub(display_width(&title) + 1);

    position_cursor(PANEL_TOP_ROW, left);
    print!("{border}┌─{}{}{title}{}{border}{}┐", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset(), "─".repeat(top_fill));
    print!("{}", Theme::reset());

    let mut row = PANEL_TOP_ROW + 1;
    for (text, color) in &lines {
        position_cursor(row, left);
        print!("{border}│ {}{}{border} │", Theme::fg(color), pad_right(text, inner));
        print!("{}", Theme::reset());
        row += 1;
    }

    let hint = " esc: close ";
    let bottom_fill = (width - 2).saturating_sub(display_width(hint) + 1);
    position_cursor(row, left);
    print!("{border}└{}{}{hint}{border}─┘", "─".repeat(bottom_fill), Theme::fg(theme.colors.text_dim.as_str()));
    print!("{}", Theme::reset());
}
