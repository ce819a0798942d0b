//! Keybinding hints on the last line.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    print_centered(row, &footer.keybindings, &Theme::fg(&theme.colors.text_dim), cols);
    row + 1
}
