//! One-line notification banner above the footer.

use crate::app::NotificationKind;
use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

pub fn render_toast(row: usize, toast: &ToastInfo, theme: &Theme, cols: usize) {
    let (icon, color) = match toast.kind {
        NotificationKind::Success => ("✓", &theme.colors.success),
        NotificationKind::Info => ("i", &theme.colors.info),
        NotificationKind::Error => ("✗", &theme.colors.error),
    };

    let style = format!("{}{}", Theme::bold(), Theme::fg(color));
    print_centered(row, &format!("{icon} {}", toast.message), &style, cols);
}
