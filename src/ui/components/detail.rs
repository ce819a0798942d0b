//! Detail view of one item, with its image carousel.

use crate::ui::helpers::{fit, print_centered, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CarouselInfo, DetailView};

/// Renders into rows `top..=bottom`; lines that do not fit are dropped.
pub fn render_detail(top: usize, bottom: usize, detail: &DetailView, theme: &Theme, cols: usize) {
    let reset = Theme::reset();
    let mut row = top;
    let mut line = |text: &str, style: &str| {
        if row <= bottom {
            print_centered(row, text, style, cols);
            row += 1;
        }
    };

    line(
        &detail.name,
        &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
    );
    line(
        &format!("{}  ·  Added {}", detail.type_label, detail.added),
        &Theme::fg(&theme.colors.accent),
    );
    line("", reset);

    match &detail.carousel {
        Some(carousel) => {
            for (text, style) in carousel_lines(carousel, theme, cols) {
                line(&text, &style);
            }
        }
        None => line("No images", &Theme::fg(&theme.colors.text_dim)),
    }
    line("", reset);

    let text_width = cols.saturating_sub(8).max(1);
    for text in wrap(&detail.description, text_width) {
        line(&text, &Theme::fg(&theme.colors.text_normal));
    }
}

fn carousel_lines(carousel: &CarouselInfo, theme: &Theme, cols: usize) -> Vec<(String, String)> {
    let frame = Theme::fg(&theme.colors.border);
    let width = cols.saturating_sub(8).clamp(10, 60);
    let inner = width - 2;

    let mut lines = vec![
        (format!("┌{}┐", "─".repeat(inner)), frame.clone()),
        (format!("│{}│", fit(&format!(" {}", carousel.image), inner)), Theme::fg(&theme.colors.text_normal)),
        (format!("└{}┘", "─".repeat(inner)), frame),
    ];

    if carousel.show_navigation {
        let accent = Theme::fg(&theme.colors.accent);
        lines.push((
            format!("‹  {} / {}  ›", carousel.position + 1, carousel.total),
            format!("{}{accent}", Theme::bold()),
        ));
        let dots: String = (0..carousel.total)
            .map(|i| if i == carousel.position { '●' } else { '○' })
            .collect();
        lines.push((dots, accent));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(position: usize, total: usize) -> CarouselInfo {
        CarouselInfo {
            image: "https://example.com/a.jpg".to_string(),
            position,
            total,
            show_navigation: total > 1,
        }
    }

    #[test]
    fn navigation_shows_position_and_dots() {
        let lines = carousel_lines(&carousel(1, 3), &Theme::default(), 80);
        let texts: Vec<&str> = lines.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[3], "‹  2 / 3  ›");
        assert_eq!(texts[4], "○●○");
    }

    #[test]
    fn single_image_has_no_navigation() {
        let lines = carousel_lines(&carousel(0, 1), &Theme::default(), 80);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].0.contains("https://example.com/a.jpg"));
    }
}
