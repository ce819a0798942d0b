//! Shared rendering utilities.
//!
//! Widths are counted in `char`s; the glyphs the UI draws (box drawing,
//! arrows, dots) are all single-column.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-based `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Visible width of plain text.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts or right-pads `text` to exactly `width` columns.
///
/// ```rust
/// use zatalog::ui::helpers::fit;
///
/// assert_eq!(fit("cap", 5), "cap  ");
/// assert_eq!(fit("summer dress", 8), "summer …");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let kept: String = text.chars().take(width - 1).collect();
    format!("{kept}…")
}

/// Prints `text` centered on a full-width line starting at column 1.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = fit(text, cols);
    let text = text.trim_end();
    let len = text_width(text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

/// Draws a horizontal rule across the full width.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Greedy word wrap into lines of at most `width` columns. Words longer than
/// a line are cut by [`fit`].
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = usize::from(!line.is_empty()) + text_width(word);
            if !line.is_empty() && text_width(&line) + needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(fit(&line, width).trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_chars_not_bytes() {
        assert_eq!(fit("‹ Dress ›", 9), "‹ Dress ›");
        assert_eq!(text_width(&fit("●○○", 6)), 6);
        assert_eq!(fit("anything", 0), "");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("A lightweight summer dress", 12),
            ["A", "lightweight", "summer dress"]
        );
        assert_eq!(wrap("one\n\ntwo", 10), ["one", "", "two"]);
    }

    #[test]
    fn wrap_cuts_overlong_words() {
        assert_eq!(wrap("supercalifragilistic", 6), ["super…"]);
    }
}
