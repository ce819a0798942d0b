//! Title bar with the page subtitle underneath.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mut style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }
    print_centered(row, &header.title, &style, cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + 1, &header.subtitle, &subtitle_style, cols);
    row + 2
}
