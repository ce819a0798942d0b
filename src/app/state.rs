//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the item
//! store, which view is shown, the grid selection, the open detail view and its
//! carousel, the add-item draft, the visible notification and pending timers.
//! The event handler mutates it; the renderer only reads view models computed
//! from it.
//!
//! # Example
//!
//! ```
//! use zatalog::app::{AppSettings, AppState};
//! use zatalog::store::{sample_items, MemoryStore};
//! use zatalog::ui::Theme;
//!
//! let store = MemoryStore::with_items(sample_items());
//! let mut state = AppState::new(store, AppSettings::default(), Theme::default());
//! state.set_viewport(24, 80);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.header.title.contains("View Items (3)"));
//! ```

use super::carousel::Carousel;
use super::draft::Draft;
use super::modes::{FormField, ViewMode};
use super::notification::{Notification, NotificationKind};
use super::timers::{Scheduler, TimerTask};
use crate::app::Action;
use crate::domain::image::describe_reference;
use crate::domain::Item;
use crate::store::ItemStore;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, CardInfo, CarouselInfo, DetailView as DetailInfo, EmptyState, FooterInfo, FormRow,
    FormView, GridView, HeaderInfo, StagedImage, SubmitButton, ToastInfo, UIViewModel,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Narrowest a grid card may get before a column is dropped.
const MIN_CARD_WIDTH: usize = 30;
/// Widest grid, as on a large screen.
const MAX_GRID_COLUMNS: usize = 4;
/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: usize = 6;
/// Rows used by header, subtitle, borders, toast line and footer.
const CHROME_ROWS: usize = 7;

/// Runtime settings derived from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Artificial delay between pressing submit and the item being added.
    pub submit_delay: Duration,
    /// How long a notification stays on screen.
    pub notification_timeout: Duration,
    /// Largest image file the worker will read.
    pub max_image_bytes: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            submit_delay: Duration::milliseconds(1000),
            notification_timeout: Duration::seconds(5),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Grid navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The open detail view.
///
/// Holds the item id rather than the item so that a lookup miss closes the
/// view instead of rendering stale data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub item_id: String,
    /// `None` when the item has no images.
    pub carousel: Option<Carousel>,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Every committed item. Only [`ItemStore::add`] mutates it.
    pub store: Box<dyn ItemStore>,

    /// Which page is shown.
    pub view_mode: ViewMode,

    /// Selected card in the collection grid.
    pub selected_index: usize,

    /// Cards per grid row at the last rendered width.
    pub grid_columns: usize,

    /// Detail overlay for one item, on top of the collection view.
    pub detail: Option<DetailView>,

    /// Add-item form contents.
    pub draft: Draft,

    /// Focused form control.
    pub focus: FormField,

    /// Path or URL being typed for the cover image.
    pub cover_input: String,

    /// Comma-separated paths or URLs being typed for additional images.
    pub additional_input: String,

    /// Staged additional image targeted by the remove key.
    pub staged_cursor: usize,

    /// Image read requests posted to the worker and not yet answered.
    pub pending_loads: usize,

    /// Bumped whenever the draft is discarded, so late worker replies for an
    /// older draft are dropped.
    pub form_epoch: u64,

    /// Visible toast, if any.
    pub notification: Option<Notification>,
    next_notification_id: u64,

    /// Deferred submit completion and toast dismissal.
    pub timers: Scheduler,

    pub settings: AppSettings,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the state around an existing store, showing the collection.
    #[must_use]
    pub fn new(store: impl ItemStore + 'static, settings: AppSettings, theme: Theme) -> Self {
        Self {
            store: Box::new(store),
            view_mode: ViewMode::Collection,
            selected_index: 0,
            grid_columns: 1,
            detail: None,
            draft: Draft::default(),
            focus: FormField::Name,
            cover_input: String::new(),
            additional_input: String::new(),
            staged_cursor: 0,
            pending_loads: 0,
            form_epoch: 0,
            notification: None,
            next_notification_id: 0,
            timers: Scheduler::default(),
            settings,
            theme,
        }
    }

    /// Records the terminal size of the frame about to be rendered.
    ///
    /// Grid navigation needs the column count, which depends on the width.
    pub fn set_viewport(&mut self, _rows: usize, cols: usize) {
        self.grid_columns = Self::columns_for_width(cols);
    }

    /// Cards per row for a terminal `cols` wide: one per 30 columns, 1 to 4.
    #[must_use]
    pub fn columns_for_width(cols: usize) -> usize {
        (cols / MIN_CARD_WIDTH).clamp(1, MAX_GRID_COLUMNS)
    }

    /// Moves the grid selection, wrapping at every edge.
    ///
    /// Left/right walk the items in order. Up/down move by a full row and wrap
    /// to the other end of the same column; the last row may be short.
    pub fn move_selection(&mut self, direction: Direction) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let cols = self.grid_columns.max(1);
        let i = self.selected_index.min(len - 1);

        self.selected_index = match direction {
            Direction::Right => (i + 1) % len,
            Direction::Left => (i + len - 1) % len,
            Direction::Down => {
                if i + cols < len {
                    i + cols
                } else {
                    i % cols
                }
            }
            Direction::Up => {
                if i >= cols {
                    i - cols
                } else {
                    let last_row_start = (len - 1) / cols * cols;
                    let candidate = last_row_start + i % cols;
                    if candidate < len {
                        candidate
                    } else {
                        candidate - cols
                    }
                }
            }
        };
    }

    /// Item under the grid selection.
    #[must_use]
    pub fn selected_item(&self) -> Option<Arc<Item>> {
        self.store.list().get(self.selected_index).cloned()
    }

    /// Opens the detail view for the selected item with a fresh carousel.
    ///
    /// Returns `false` when nothing is selected.
    pub fn open_detail(&mut self) -> bool {
        let Some(item) = self.selected_item() else {
            return false;
        };
        tracing::debug!(item_id = %item.id, images = item.carousel_images().len(), "opening detail view");
        self.detail = Some(DetailView {
            item_id: item.id.clone(),
            carousel: Carousel::open(item.carousel_images().len()),
        });
        true
    }

    /// The item shown by the detail view, if it is open and still resolvable.
    #[must_use]
    pub fn detail_item(&self) -> Option<Arc<Item>> {
        self.detail
            .as_ref()
            .and_then(|detail| self.store.get_by_id(&detail.item_id))
    }

    /// Shows a toast, replacing any visible one, and schedules its dismissal.
    ///
    /// Returns the timer request for the shim.
    pub fn notify(&mut self, kind: NotificationKind, message: String, now: DateTime<Utc>) -> Action {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        tracing::debug!(id = id, kind = ?kind, message = %message, "showing notification");
        self.notification = Some(Notification { id, kind, message });

        let delay = self.settings.notification_timeout;
        Action::SetTimeout(self.timers.schedule(now, delay, TimerTask::DismissNotification(id)))
    }

    /// Hides the visible toast. With `Some(id)`, only if it is that toast.
    ///
    /// Returns whether anything was hidden.
    pub fn dismiss_notification(&mut self, id: Option<u64>) -> bool {
        let matches = match (&self.notification, id) {
            (Some(n), Some(id)) => n.id == id,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if matches {
            self.notification = None;
        }
        matches
    }

    /// Opens the add-item form with focus on the first field.
    pub fn open_form(&mut self) {
        self.view_mode = ViewMode::AddItem;
        self.detail = None;
        self.focus = FormField::Name;
    }

    /// Discards the draft and everything typed into the form.
    pub fn reset_form(&mut self) {
        self.draft.reset();
        self.focus = FormField::Name;
        self.cover_input.clear();
        self.additional_input.clear();
        self.staged_cursor = 0;
        self.pending_loads = 0;
        self.form_epoch += 1;
    }

    /// Commits the in-flight submit into the store.
    ///
    /// Clears the form on success. Returns `None` when no submit was in flight.
    pub fn complete_submit(&mut self) -> Option<Arc<Item>> {
        let item = self.draft.commit(self.store.as_mut())?;
        tracing::debug!(item_id = %item.id, item_name = %item.name, "item committed");
        self.reset_form();
        Some(item)
    }

    /// Keeps the staged-image cursor inside the staged list.
    pub fn clamp_staged_cursor(&mut self) {
        let len = self.draft.additional_images().len();
        self.staged_cursor = self.staged_cursor.min(len.saturating_sub(1));
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view_mode {
            ViewMode::AddItem => Body::Form(self.compute_form()),
            ViewMode::Collection => match self.detail_item() {
                Some(item) => Body::Detail(self.compute_detail(&item)),
                None if self.store.is_empty() => Body::Empty(EmptyState {
                    message: "No items yet".to_string(),
                    subtitle: "Press 'a' to add your first item".to_string(),
                }),
                None => Body::Grid(self.compute_grid(rows, cols)),
            },
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
            toast: self.notification.as_ref().map(|n| ToastInfo {
                kind: n.kind,
                message: n.message.clone(),
            }),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        match self.view_mode {
            ViewMode::Collection => HeaderInfo {
                title: format!(" View Items ({}) ", self.store.len()),
                subtitle: "Browse your collection".to_string(),
            },
            ViewMode::AddItem => HeaderInfo {
                title: " Add New Item ".to_string(),
                subtitle: "Fill in the details to add a new item to your collection".to_string(),
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.view_mode, self.detail.is_some()) {
            (ViewMode::Collection, true) => {
                "h/l: previous/next image  1-9: jump  e: enquire  x: dismiss  Esc: close"
            }
            (ViewMode::Collection, false) => {
                "h/j/k/l: navigate  Enter: open  a: add item  x: dismiss  q: quit"
            }
            (ViewMode::AddItem, _) => match self.focus {
                FormField::Type => "Tab/S-Tab: field  ←/→: choose type  Ctrl+s: submit  Esc: cancel",
                FormField::CoverImage => {
                    "Tab/S-Tab: field  Enter: load  Ctrl+x: clear  Ctrl+s: submit  Esc: cancel"
                }
                FormField::AdditionalImages => {
                    "Tab/S-Tab: field  Enter: load  ←/→: pick  Ctrl+x: remove  Esc: cancel"
                }
                FormField::Submit => "Tab/S-Tab: field  Enter: add item  Esc: cancel",
                FormField::Name | FormField::Description => {
                    "Tab/S-Tab: field  Ctrl+s: submit  Esc: cancel"
                }
            },
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Windows the grid so the selected card's row stays visible, keeping
    /// that row near the middle like a scrolling list.
    fn compute_grid(&self, rows: usize, cols: usize) -> GridView {
        let columns = Self::columns_for_width(cols);
        let card_width = cols / columns;
        let items = self.store.list();

        let total_rows = items.len().div_ceil(columns);
        let visible_rows = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let selected_row = self.selected_index / columns;

        let mut first_row = selected_row.saturating_sub(visible_rows / 2);
        if first_row + visible_rows > total_rows {
            first_row = total_rows.saturating_sub(visible_rows);
        }
        let last_row = (first_row + visible_rows).min(total_rows);

        let start = first_row * columns;
        let end = (last_row * columns).min(items.len());
        let text_width = card_width.saturating_sub(4);

        let cards = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| CardInfo {
                name: truncate(&item.name, text_width),
                type_label: item.item_type.label().to_string(),
                description: truncate(item.description.lines().next().unwrap_or(""), text_width),
                added: format!("Added {}", item.added_on()),
                images: image_count(item.carousel_images().len()),
                is_selected: start + offset == self.selected_index,
            })
            .collect();

        GridView {
            columns,
            card_width,
            cards,
            more_above: first_row > 0,
            more_below: last_row < total_rows,
        }
    }

    fn compute_detail(&self, item: &Item) -> DetailInfo {
        let carousel = self
            .detail
            .as_ref()
            .and_then(|d| d.carousel)
            .and_then(|c| {
                item.carousel_images().get(c.index()).map(|image| CarouselInfo {
                    image: describe_reference(image),
                    position: c.index(),
                    total: c.len(),
                    show_navigation: c.shows_navigation(),
                })
            });

        DetailInfo {
            name: item.name.clone(),
            type_label: item.item_type.label().to_string(),
            description: item.description.clone(),
            added: item.added_on(),
            carousel,
        }
    }

    fn compute_form(&self) -> FormView {
        let row = |field: FormField, label: &str, value: String, placeholder: &str| FormRow {
            label: label.to_string(),
            value,
            placeholder: placeholder.to_string(),
            note: None,
            is_focused: self.focus == field,
        };

        let type_value = self
            .draft
            .item_type()
            .map(|t| format!("‹ {t} ›"))
            .unwrap_or_default();

        let mut cover = row(
            FormField::CoverImage,
            "Cover Image",
            self.cover_input.clone(),
            "path or URL, Enter to load",
        );
        cover.note = self.draft.cover_image().map(describe_reference);

        let rows = vec![
            row(FormField::Name, "Item Name *", self.draft.name().to_string(), "Enter item name"),
            row(FormField::Type, "Item Type *", type_value, "Select a type (←/→)"),
            row(
                FormField::Description,
                "Description *",
                self.draft.description().to_string(),
                "Describe your item...",
            ),
            cover,
            row(
                FormField::AdditionalImages,
                "Additional Images",
                self.additional_input.clone(),
                "paths or URLs, comma separated",
            ),
        ];

        let staged = self
            .draft
            .additional_images()
            .iter()
            .enumerate()
            .map(|(i, image)| StagedImage {
                label: describe_reference(image),
                is_selected: self.focus == FormField::AdditionalImages && i == self.staged_cursor,
            })
            .collect();

        let submitting = self.draft.is_submitting();
        FormView {
            rows,
            staged,
            loading: self.pending_loads > 0,
            submit: SubmitButton {
                label: if submitting { "Adding Item..." } else { "Add Item" }.to_string(),
                enabled: !submitting && self.draft.is_submittable(),
                is_focused: self.focus == FormField::Submit,
            },
        }
    }
}

fn image_count(n: usize) -> String {
    match n {
        0 => "No images".to_string(),
        1 => "1 image".to_string(),
        n => format!("{n} images"),
    }
}

/// Cuts `text` to at most `width` characters, ending in "..." when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, DraftField, Event};
    use crate::domain::{ItemType, NewItem};
    use crate::store::MemoryStore;

    #[derive(Debug, Default)]
    struct CountingStore {
        items: Vec<Arc<Item>>,
    }

    impl ItemStore for CountingStore {
        fn add(&mut self, fields: NewItem) -> Arc<Item> {
            let id = format!("counted-{}", self.items.len() + 1);
            let item = Arc::new(Item::from_new(id, Utc::now(), fields));
            self.items.push(Arc::clone(&item));
            item
        }

        fn list(&self) -> Vec<Arc<Item>> {
            self.items.clone()
        }

        fn get_by_id(&self, id: &str) -> Option<Arc<Item>> {
            self.items.iter().find(|item| item.id == id).cloned()
        }

        fn len(&self) -> usize {
            self.items.len()
        }
    }

    fn state_with(n: usize, columns: usize) -> AppState {
        let mut store = MemoryStore::new();
        for i in 0..n {
            store.add(NewItem {
                name: format!("item {i}"),
                item_type: ItemType::Other,
                description: "d".to_string(),
                cover_image: String::new(),
                additional_images: vec![],
            });
        }
        let mut state = AppState::new(store, AppSettings::default(), Theme::default());
        state.grid_columns = columns;
        state
    }

    #[test]
    fn submit_commits_into_an_injected_store() {
        let mut state = AppState::new(CountingStore::default(), AppSettings::default(), Theme::default());
        state.open_form();
        state.draft.set_field(DraftField::Name, "Cap");
        state.draft.set_item_type(Some(ItemType::Other));
        state.draft.set_field(DraftField::Description, "A cap");

        handle_event(&mut state, &Event::Submit).unwrap();
        let later = Utc::now() + Duration::seconds(2);
        handle_event(&mut state, &Event::Tick { now: later }).unwrap();

        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.get_by_id("counted-1").map(|item| item.name.clone()).as_deref(), Some("Cap"));
        state.view_mode = ViewMode::Collection;
        assert!(state.compute_viewmodel(24, 80).header.title.contains("View Items (1)"));
    }

    #[test]
    fn left_and_right_wrap_through_all_items() {
        let mut s = state_with(5, 2);
        s.move_selection(Direction::Left);
        assert_eq!(s.selected_index, 4);
        s.move_selection(Direction::Right);
        assert_eq!(s.selected_index, 0);
    }

    #[test]
    fn up_and_down_wrap_within_a_column() {
        // 0 1 2
        // 3 4
        let mut s = state_with(5, 3);
        s.move_selection(Direction::Down);
        assert_eq!(s.selected_index, 3);
        s.move_selection(Direction::Down);
        assert_eq!(s.selected_index, 0);

        s.selected_index = 2;
        s.move_selection(Direction::Down);
        assert_eq!(s.selected_index, 2, "short last row wraps back to the top");
        s.move_selection(Direction::Up);
        assert_eq!(s.selected_index, 2);

        s.selected_index = 1;
        s.move_selection(Direction::Up);
        assert_eq!(s.selected_index, 4);
    }

    #[test]
    fn navigation_on_empty_store_is_a_no_op() {
        let mut s = state_with(0, 2);
        s.move_selection(Direction::Down);
        assert_eq!(s.selected_index, 0);
        assert!(!s.open_detail());
    }

    #[test]
    fn columns_follow_width() {
        assert_eq!(AppState::columns_for_width(20), 1);
        assert_eq!(AppState::columns_for_width(80), 2);
        assert_eq!(AppState::columns_for_width(100), 3);
        assert_eq!(AppState::columns_for_width(300), 4);
    }

    #[test]
    fn grid_window_keeps_selection_visible() {
        let mut s = state_with(20, 2);
        s.selected_index = 19;
        let vm = s.compute_viewmodel(7 + 2 * CARD_HEIGHT, 60);
        let Body::Grid(grid) = vm.body else {
            panic!("expected grid");
        };
        assert_eq!(grid.cards.len(), 4);
        assert!(grid.cards.iter().any(|c| c.is_selected));
        assert!(grid.more_above);
        assert!(!grid.more_below);
    }

    #[test]
    fn empty_store_renders_empty_state() {
        let s = state_with(0, 1);
        let vm = s.compute_viewmodel(24, 80);
        assert!(matches!(vm.body, Body::Empty(ref e) if e.message == "No items yet"));
    }

    #[test]
    fn stale_detail_declines_to_render() {
        let mut s = state_with(1, 1);
        s.detail = Some(DetailView {
            item_id: "gone".to_string(),
            carousel: None,
        });
        assert!(s.detail_item().is_none());
        assert!(matches!(s.compute_viewmodel(24, 80).body, Body::Grid(_)));
    }

    #[test]
    fn newer_toast_survives_older_dismissal() {
        let mut s = state_with(0, 1);
        let now = Utc::now();
        s.notify(NotificationKind::Info, "first".to_string(), now);
        s.notify(NotificationKind::Info, "second".to_string(), now);
        assert!(!s.dismiss_notification(Some(1)));
        assert_eq!(s.notification.as_ref().map(|n| n.message.as_str()), Some("second"));
        assert!(s.dismiss_notification(None));
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("Classic White T-Shirt", 10), "Classic...");
        assert_eq!(truncate("Cap", 10), "Cap");
    }
}
