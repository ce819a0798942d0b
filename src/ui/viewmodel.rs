//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; every decision
//! about what is visible was already made when they were computed.
//!
//! # Example
//!
//! ```
//! use zatalog::ui::viewmodel::{Body, EmptyState, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " View Items (0) ".to_string(),
//!         subtitle: "Browse your collection".to_string(),
//!     },
//!     body: Body::Empty(EmptyState {
//!         message: "No items yet".to_string(),
//!         subtitle: "Press 'a' to add your first item".to_string(),
//!     }),
//!     footer: FooterInfo { keybindings: "a: add  q: quit".to_string() },
//!     toast: None,
//! };
//! assert!(matches!(vm.body, Body::Empty(_)));
//! ```

use crate::app::NotificationKind;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    pub footer: FooterInfo,
    /// Notification drawn above the footer.
    pub toast: Option<ToastInfo>,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Card grid of the collection.
    Grid(GridView),
    /// Shown instead of the grid when the store is empty.
    Empty(EmptyState),
    /// A single item with its carousel.
    Detail(DetailView),
    /// The add-item form.
    Form(FormView),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Dimmed line under the title.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current view.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Windowed card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// Cards per row.
    pub columns: usize,
    /// Width of each card including its border.
    pub card_width: usize,
    /// Visible cards, row-major.
    pub cards: Vec<CardInfo>,
    /// Whether rows exist above or below the visible window.
    pub more_above: bool,
    pub more_below: bool,
}

/// One card in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInfo {
    pub name: String,
    pub type_label: String,
    /// First line of the description, truncated to the card.
    pub description: String,
    /// e.g. "Added 1/15/2024".
    pub added: String,
    /// e.g. "3 images".
    pub images: String,
    pub is_selected: bool,
}

/// Item detail display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub name: String,
    pub type_label: String,
    pub description: String,
    pub added: String,
    /// `None` when the item has no images; nothing is rendered for it.
    pub carousel: Option<CarouselInfo>,
}

/// Current slide of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselInfo {
    /// Short description of the current image reference.
    pub image: String,
    /// Zero-based slide index.
    pub position: usize,
    pub total: usize,
    /// Arrows and indicator dots; hidden for a single image.
    pub show_navigation: bool,
}

/// Add-item form display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub rows: Vec<FormRow>,
    /// Staged additional images, in commit order.
    pub staged: Vec<StagedImage>,
    /// Worker reads still outstanding.
    pub loading: bool,
    pub submit: SubmitButton,
}

/// One labelled input in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    /// Label, with `*` for required fields.
    pub label: String,
    /// Current text; empty shows the placeholder.
    pub value: String,
    pub placeholder: String,
    /// Note shown after the input, such as the staged cover summary.
    pub note: Option<String>,
    pub is_focused: bool,
}

/// A staged additional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub label: String,
    /// Target of the remove key.
    pub is_selected: bool,
}

/// The submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    /// "Add Item" or "Adding Item...".
    pub label: String,
    pub enabled: bool,
    pub is_focused: bool,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub kind: NotificationKind,
    pub message: String,
}
