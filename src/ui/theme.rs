//! Color schemes and ANSI escape sequence generation.
//!
//! Four Catppuccin flavors are built in; custom themes load from TOML files.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//! - `catppuccin-frappe`: muted dark
//! - `catppuccin-macchiato`: medium dark
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cba6f7"
//! # header_bg is optional
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! accent = "#89b4fa"
//! badge_fg = "#1e1e2e"
//! badge_bg = "#74c7ec"
//! success = "#a6e3a1"
//! error = "#f38ba8"
//! info = "#89b4fa"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zatalog::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}Added{}", Theme::fg(&theme.colors.success), Theme::reset());
//! ```

use crate::domain::{Result, ZatalogError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_THEME: &str = "catppuccin-mocha";

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text.
    pub header_fg: String,
    /// Optional band behind the title.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card, focused control.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Subtitles, footer, placeholders, dates.
    pub text_dim: String,

    /// Card frames and separator lines.
    pub border: String,
    /// Carousel indicator and focused field labels.
    pub accent: String,

    /// Category badge on cards and the detail view.
    pub badge_fg: String,
    pub badge_bg: String,

    /// Toast colors per notification kind.
    pub success: String,
    pub error: String,
    pub info: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    ///
    /// ```rust
    /// use zatalog::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-frappe").unwrap().name, "catppuccin-frappe");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str)
            .map_err(|e| {
                tracing::debug!(theme = name, error = %e, "built-in theme failed to parse");
            })
            .ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZatalogError::Theme`] when the file cannot be read or is not a
    /// valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ZatalogError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| ZatalogError::Theme(format!("invalid theme TOML: {e}")))
    }

    // Malformed colors render white rather than failing the frame.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    ///
    /// ```rust
    /// use zatalog::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    fn mocha() -> Self {
        let hex = |s: &str| s.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: hex("#cba6f7"),
                header_bg: None,
                selection_fg: hex("#1e1e2e"),
                selection_bg: hex("#f5c2e7"),
                text_normal: hex("#cdd6f4"),
                text_dim: hex("#6c7086"),
                border: hex("#45475a"),
                accent: hex("#89b4fa"),
                badge_fg: hex("#1e1e2e"),
                badge_bg: hex("#74c7ec"),
                success: hex("#a6e3a1"),
                error: hex("#f38ba8"),
                info: hex("#89b4fa"),
                empty_state_fg: hex("#89b4fa"),
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::mocha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn every_builtin_theme_parses() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn default_matches_bundled_mocha() {
        assert_eq!(Theme::from_name(DEFAULT_THEME), Some(Theme::default()));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#abc"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb(" #1e1e2e "), (0x1e, 0x1e, 0x2e));
    }

    #[test]
    fn custom_theme_file_loads_with_optional_header_bg() {
        let toml = include_str!("../../themes/catppuccin-latte.toml")
            .replacen("name = \"catppuccin-latte\"", "name = \"mine\"", 1)
            .replacen("[colors]", "[colors]\nheader_bg = \"#000000\"", 1);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.header_bg.as_deref(), Some("#000000"));
    }

    #[test]
    fn invalid_theme_file_is_a_theme_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(ZatalogError::Theme(_))));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(ZatalogError::Theme(_))
        ));
    }
}
