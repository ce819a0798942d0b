//! View and form-focus state types.
//!
//! These enums decide which keybindings are active and what is rendered.
//!
//! # State Machine
//!
//! The plugin shows one of two views:
//! - **Collection**: the item grid, optionally with a detail overlay open
//! - **`AddItem`**: the add-item form, with one [`FormField`] focused
//!
//! ```
//! use zatalog::app::FormField;
//!
//! assert_eq!(FormField::Name.next(), FormField::Type);
//! assert_eq!(FormField::Name.previous(), FormField::Submit);
//! ```

use super::draft::DraftField;

/// Which page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Grid of items. Header reads "View Items".
    #[default]
    Collection,

    /// Add-item form. Header reads "Add New Item".
    AddItem,
}

/// Focused control in the add-item form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Free text, required.
    #[default]
    Name,
    /// Category selector; Left/Right cycles.
    Type,
    /// Free text, required.
    Description,
    /// Path or URL input for the cover image; Enter loads it.
    CoverImage,
    /// Comma-separated paths or URLs; Enter loads them. Left/Right selects a
    /// staged image for removal.
    AdditionalImages,
    /// The submit button.
    Submit,
}

impl FormField {
    const ORDER: [Self; 6] = [
        Self::Name,
        Self::Type,
        Self::Description,
        Self::CoverImage,
        Self::AdditionalImages,
        Self::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field in tab order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous field in tab order, wrapping.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// The draft text field this control edits directly, if any.
    #[must_use]
    pub const fn draft_field(self) -> Option<DraftField> {
        match self {
            Self::Name => Some(DraftField::Name),
            Self::Description => Some(DraftField::Description),
            Self::Type | Self::CoverImage | Self::AdditionalImages | Self::Submit => None,
        }
    }

    /// Whether typed characters go into a path input.
    #[must_use]
    pub const fn is_image_input(self) -> bool {
        matches!(self, Self::CoverImage | Self::AdditionalImages)
    }

    /// Whether typed characters are captured (rather than read as commands).
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        self.draft_field().is_some() || self.is_image_input()
    }
}
