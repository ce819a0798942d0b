//! Add-item form: labelled inputs, staged images, submit button.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormRow, FormView, StagedImage, SubmitButton};

const INDENT: usize = 3;
const MAX_INPUT_WIDTH: usize = 72;

/// Rows `top..=bottom` of the body, filled top to bottom. Anything below
/// `bottom` is not drawn.
struct Area {
    row: usize,
    bottom: usize,
}

impl Area {
    fn next(&mut self) -> Option<usize> {
        (self.row <= self.bottom).then(|| {
            self.row += 1;
            self.row - 1
        })
    }
}

pub fn render_form(top: usize, bottom: usize, form: &FormView, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(INDENT * 2).min(MAX_INPUT_WIDTH);
    let mut area = Area { row: top, bottom };

    for (i, row) in form.rows.iter().enumerate() {
        render_row(&mut area, row, theme, width);
        if i + 1 == form.rows.len() {
            for image in &form.staged {
                render_staged(&mut area, image, theme, width);
            }
        }
    }

    if form.loading {
        if let Some(row) = area.next() {
            position_cursor(row, INDENT + 1);
            print!("{}Loading images...{}", Theme::fg(&theme.colors.info), Theme::reset());
        }
    }

    area.next();
    render_submit(&mut area, &form.submit, theme);
}

fn render_row(area: &mut Area, row: &FormRow, theme: &Theme, width: usize) {
    let reset = Theme::reset();

    if let Some(r) = area.next() {
        let label_style = if row.is_focused {
            format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent))
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        let marker = if row.is_focused { "›" } else { " " };
        position_cursor(r, 1);
        print!("{label_style} {marker} {}{reset}", row.label);
    }

    if let Some(r) = area.next() {
        position_cursor(r, INDENT + 1);
        let frame = if row.is_focused {
            Theme::fg(&theme.colors.accent)
        } else {
            Theme::fg(&theme.colors.border)
        };
        let inner = width.saturating_sub(2);
        print!("{frame}▏{reset}");
        if row.value.is_empty() {
            print!("{}{}{reset}", Theme::fg(&theme.colors.text_dim), fit(&row.placeholder, inner));
        } else {
            let cursor = if row.is_focused { "█" } else { "" };
            let shown = tail(&row.value, inner.saturating_sub(usize::from(row.is_focused)));
            print!(
                "{}{}{reset}",
                Theme::fg(&theme.colors.text_normal),
                fit(&format!("{shown}{cursor}"), inner)
            );
        }
        print!("{frame}▕{reset}");
    }

    if let Some(note) = &row.note {
        if let Some(r) = area.next() {
            position_cursor(r, INDENT + 2);
            print!("{}✓ {}{reset}", Theme::fg(&theme.colors.success), fit(note, width.saturating_sub(3)));
        }
    }
}

fn render_staged(area: &mut Area, image: &StagedImage, theme: &Theme, width: usize) {
    let Some(r) = area.next() else {
        return;
    };
    position_cursor(r, INDENT + 2);
    let style = if image.is_selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_dim)
    };
    print!("{style}• {}{}", fit(&image.label, width.saturating_sub(3)), Theme::reset());
}

fn render_submit(area: &mut Area, submit: &SubmitButton, theme: &Theme) {
    let Some(r) = area.next() else {
        return;
    };
    let style = match (submit.enabled, submit.is_focused) {
        (true, true) => format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        ),
        (true, false) => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent)),
        (false, true) => format!("{}{}", Theme::fg(&theme.colors.text_dim), Theme::bg(&theme.colors.border)),
        (false, false) => format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
    };
    position_cursor(r, INDENT + 1);
    print!("{style}[ {} ]{}", submit.label, Theme::reset());
}

/// Last `width` characters of `text`, so the end being typed stays visible.
fn tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_the_end() {
        assert_eq!(tail("~/Pictures/cap.png", 7), "cap.png");
        assert_eq!(tail("short", 10), "short");
    }

    #[test]
    fn area_stops_at_bottom() {
        let mut area = Area { row: 5, bottom: 6 };
        assert_eq!(area.next(), Some(5));
        assert_eq!(area.next(), Some(6));
        assert_eq!(area.next(), None);
    }
}
