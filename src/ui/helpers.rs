//! Shared rendering utilities.
//!
//! Cursor positioning, match highlighting and text layout helpers used by
//! several components. All widths and indices are in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` with the given character ranges highlighted.
///
/// Highlighting is skipped on the selected row so it does not fight with the
/// selection background. Ranges past the end of `text` are ignored.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Display width of `text` in characters.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Left-aligns `text` in a field of `width` characters, cutting if longer.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let cut: String = text.chars().take(width).collect();
    let fill = width.saturating_sub(display_width(&cut));
    format!("{cut}{}", " ".repeat(fill))
}

/// Right-aligns `text` in a field of `width` characters, cutting if longer.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let cut: String = text.chars().take(width).collect();
    let fill = width.saturating_sub(display_width(&cut));
    format!("{}{cut}", " ".repeat(fill))
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split across lines.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if line.is_empty() {
            display_width(&word)
        } else {
            display_width(&line) + 1 + display_width(&word)
        };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_counts_characters() {
        assert_eq!(pad_right("€1.00", 7), "€1.00  ");
        assert_eq!(pad_left("€1.00", 7), "  €1.00");
        assert_eq!(pad_right("abcdef", 3), "abc");
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("Bitcoin is the first decentralized digital currency", 16);
        assert_eq!(lines, vec!["Bitcoin is the", "first", "decentralized", "digital currency"]);
        assert!(lines.iter().all(|l| display_width(l) <= 16));
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
        assert!(wrap_text("   ", 10).is_empty());
    }
}
