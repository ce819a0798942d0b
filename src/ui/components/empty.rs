//! Placeholder shown when the catalog has no items.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message vertically centered between `top` and `bottom`.
pub fn render_empty_state(top: usize, bottom: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let row = top + bottom.saturating_sub(top) / 2;

    let message_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
    print_centered(row.saturating_sub(1).max(top), &empty.message, &message_style, cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row.max(top + 1), &empty.subtitle, &subtitle_style, cols);
}
