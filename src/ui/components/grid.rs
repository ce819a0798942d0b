//! Item cards laid out in a responsive grid.

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardInfo, GridView};

pub fn render_grid(top: usize, grid: &GridView, theme: &Theme) {
    for (i, card) in grid.cards.iter().enumerate() {
        let row = top + (i / grid.columns) * CARD_HEIGHT;
        let col = 1 + (i % grid.columns) * grid.card_width;
        render_card(row, col, grid.card_width, card, theme);
    }
}

/// Overlays a scroll hint on the right end of a border row.
pub fn render_scroll_hint(row: usize, hint: &str, theme: &Theme, cols: usize) {
    let col = cols.saturating_sub(text_width(hint) + 1).max(1);
    position_cursor(row, col);
    print!("{}{hint}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
}

fn render_card(row: usize, col: usize, width: usize, card: &CardInfo, theme: &Theme) {
    let inner = width.saturating_sub(2);
    let text = inner.saturating_sub(2);
    let frame = if card.is_selected {
        Theme::fg(&theme.colors.selection_bg)
    } else {
        Theme::fg(&theme.colors.border)
    };
    let reset = Theme::reset();

    position_cursor(row, col);
    print!("{frame}╭{}╮{reset}", "─".repeat(inner));

    let name_style = if card.is_selected {
        format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    };
    position_cursor(row + 1, col);
    print!("{frame}│{reset}{name_style} {} {reset}{frame}│{reset}", fit(&card.name, text));

    let badge = format!(" {} ", card.type_label);
    let badge_len = text_width(&badge).min(text);
    let images = fit(&card.images, text.saturating_sub(badge_len + 1));
    let images = images.trim_end();
    let gap = text.saturating_sub(badge_len + text_width(images));
    position_cursor(row + 2, col);
    print!(
        "{frame}│{reset} {}{}{}{reset}{}{}{images}{reset} {frame}│{reset}",
        Theme::fg(&theme.colors.badge_fg),
        Theme::bg(&theme.colors.badge_bg),
        fit(&badge, badge_len),
        " ".repeat(gap),
        Theme::fg(&theme.colors.text_dim),
    );

    position_cursor(row + 3, col);
    print!(
        "{frame}│{reset} {}{}{reset} {frame}│{reset}",
        Theme::fg(&theme.colors.text_normal),
        fit(&card.description, text)
    );

    position_cursor(row + 4, col);
    print!(
        "{frame}│{reset} {}{}{reset} {frame}│{reset}",
        Theme::fg(&theme.colors.text_dim),
        fit(&card.added, text)
    );

    position_cursor(row + 5, col);
    print!("{frame}╰{}╯{reset}", "─".repeat(inner));
}
