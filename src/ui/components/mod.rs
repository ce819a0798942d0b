//! Screen components. Each prints ANSI directly at absolute positions.
//!
//! Screen layout (1-based rows):
//!
//! ```text
//! 1          blank
//! 2-3        header: title, subtitle
//! 4          border (scroll-up hint overlaid)
//! 5..=r-3    body: grid, empty state, detail or form
//! r-2        toast
//! r-1        border (scroll-down hint overlaid)
//! r          footer
//! ```

mod detail;
mod empty;
mod footer;
mod form;
mod grid;
mod header;
mod toast;

use crate::ui::helpers::render_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use grid::{render_grid, render_scroll_hint};
use header::render_header;
use toast::render_toast;

const BODY_TOP: usize = 5;

pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let top_border = render_header(2, &vm.header, theme, cols);
    render_border(top_border, &theme.colors.border, cols);

    let footer_row = rows.max(BODY_TOP + 3);
    let bottom_border = footer_row - 1;
    let toast_row = footer_row - 2;
    let body_bottom = footer_row - 3;

    match &vm.body {
        Body::Grid(grid) => render_grid(BODY_TOP, grid, theme),
        Body::Empty(empty) => render_empty_state(BODY_TOP, body_bottom, empty, theme, cols),
        Body::Detail(detail) => render_detail(BODY_TOP, body_bottom, detail, theme, cols),
        Body::Form(form) => render_form(BODY_TOP, body_bottom, form, theme, cols),
    }

    if let Some(toast) = &vm.toast {
        render_toast(toast_row, toast, theme, cols);
    }

    render_border(bottom_border, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Body::Grid(grid) = &vm.body {
        if grid.more_above {
            render_scroll_hint(top_border, " ↑ more ", theme, cols);
        }
        if grid.more_below {
            render_scroll_hint(bottom_border, " ↓ more ", theme, cols);
        }
    }
}
