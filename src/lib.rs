//! Zatalog: a Zellij plugin for browsing and extending an inventory catalog.
//!
//! Zatalog renders a single-pane catalog browser:
//! - A responsive grid of item cards (name, category, description, date added)
//! - A detail overlay with an image carousel for the selected item
//! - An add-item form with text fields, a category selector and image staging
//! - Transient toast notifications for successful adds and enquiries
//! - Background image loading via a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, carousel, draft, timers          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (store/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - In-memory   │   │ - Image reads │
//! │ - Theming     │   │ - Samples     │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Item model, errors, image encoding (domain/)     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zatalog.wasm" {
//!         sample_items "true"
//!         submit_delay_ms "1000"
//!         notification_timeout_secs "5"
//!         max_image_bytes "10485760"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zatalog::store::ItemStore;
//! use zatalog::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! assert_eq!(state.store.len(), 3);
//!
//! let (should_render, actions) = handle_event(&mut state, &Event::OpenDetail)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), zatalog::ZatalogError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod store;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppSettings, AppState, Event, ViewMode};
pub use domain::{Item, ItemType, NewItem, Result, ZatalogError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::str::FromStr;
use store::{sample_items, MemoryStore};

const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;
const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every key is optional. A value that fails to parse falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed the store with the three sample items. Default: `true`
    pub sample_items: bool,

    /// Artificial delay between pressing submit and the item appearing.
    pub submit_delay_ms: u64,

    /// How long a toast stays visible before it dismisses itself.
    pub notification_timeout_secs: u64,

    /// Image files larger than this are refused by the worker.
    pub max_image_bytes: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_items: true,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            notification_timeout_secs: DEFAULT_NOTIFICATION_TIMEOUT_SECS,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

// Caps a configured duration at one day so chrono's constructors stay in range.
fn clamp_to_day(value: u64, units_per_second: u64) -> i64 {
    i64::try_from(value.min(SECONDS_PER_DAY * units_per_second)).unwrap_or(i64::MAX)
}

fn parse_or<T: FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    config
        .get(key)
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zatalog::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("sample_items".to_string(), "false".to_string());
    /// map.insert("submit_delay_ms".to_string(), "250".to_string());
    /// map.insert("notification_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert!(!config.sample_items);
    /// assert_eq!(config.submit_delay_ms, 250);
    /// assert_eq!(config.notification_timeout_secs, 5);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            sample_items: parse_or(config, "sample_items", defaults.sample_items),
            submit_delay_ms: parse_or(config, "submit_delay_ms", defaults.submit_delay_ms),
            notification_timeout_secs: parse_or(
                config,
                "notification_timeout_secs",
                defaults.notification_timeout_secs,
            ),
            max_image_bytes: parse_or(config, "max_image_bytes", defaults.max_image_bytes),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Runtime settings consumed by [`AppState`].
    #[must_use]
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            submit_delay: chrono::Duration::milliseconds(clamp_to_day(self.submit_delay_ms, 1000)),
            notification_timeout: chrono::Duration::seconds(clamp_to_day(
                self.notification_timeout_secs,
                1,
            )),
            max_image_bytes: self.max_image_bytes,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(theme_file).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Builds the initial application state.
///
/// The store is seeded with the sample items unless `sample_items` is off.
///
/// # Example
///
/// ```rust
/// use zatalog::store::ItemStore;
/// use zatalog::{initialize, Config};
///
/// let config = Config {
///     sample_items: false,
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert!(state.store.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(sample_items = config.sample_items, "initializing zatalog plugin");

    let store = if config.sample_items {
        MemoryStore::with_items(sample_items())
    } else {
        MemoryStore::new()
    };

    AppState::new(store, config.settings(), config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Direction;
    use crate::app::FormField;
    use crate::store::ItemStore;
    use crate::ui::Body;
    use chrono::{Duration, Utc};

    fn state() -> AppState {
        initialize(&Config::default())
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            send(state, Event::Char(c));
        }
    }

    fn tick_after(state: &mut AppState, delay: Duration) -> (bool, Vec<Action>) {
        send(state, Event::Tick { now: Utc::now() + delay })
    }

    #[test]
    fn config_falls_back_on_unparseable_values() {
        let map: BTreeMap<String, String> = [
            ("sample_items", "yes please"),
            ("submit_delay_ms", "-5"),
            ("max_image_bytes", " 2048 "),
            ("theme", "catppuccin-latte"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_zellij(&map);
        assert!(config.sample_items);
        assert_eq!(config.submit_delay_ms, 1000);
        assert_eq!(config.max_image_bytes, 2048);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn settings_follow_config() {
        let config = Config {
            submit_delay_ms: 250,
            notification_timeout_secs: 2,
            ..Config::default()
        };
        let settings = config.settings();
        assert_eq!(settings.submit_delay, Duration::milliseconds(250));
        assert_eq!(settings.notification_timeout, Duration::seconds(2));

        let huge = Config {
            submit_delay_ms: u64::MAX,
            ..Config::default()
        };
        assert_eq!(huge.settings().submit_delay, Duration::days(1));
    }

    #[test]
    fn unknown_theme_name_uses_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }

    #[test]
    fn samples_are_listed_in_order() {
        let state = state();
        let names: Vec<String> = state.store.list().iter().map(|i| i.name.clone()).collect();
        assert_eq!(
            names,
            ["Classic Cotton T-Shirt", "Athletic Running Shoes", "Slim Fit Denim Jeans"]
        );
    }

    #[test]
    fn adding_an_item_end_to_end() {
        let mut state = state();
        send(&mut state, Event::OpenForm);
        type_text(&mut state, "Cap");
        send(&mut state, Event::FocusNext);
        send(&mut state, Event::CycleType { forward: true });
        send(&mut state, Event::FocusNext);
        type_text(&mut state, "A cap");
        send(&mut state, Event::FocusNext);
        type_text(&mut state, "https://example.com/cap.jpg");
        let (_, actions) = send(&mut state, Event::LoadImages);
        assert!(actions.is_empty(), "URLs are staged without the worker");

        let (render, actions) = send(&mut state, Event::Submit);
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::SetTimeout(secs)] if (*secs - 1.0).abs() < 1e-9));
        assert_eq!(state.store.len(), 3, "nothing is stored before the delay");

        let (render, actions) = tick_after(&mut state, Duration::seconds(2));
        assert!(render);
        assert_eq!(actions.len(), 1, "success toast schedules its dismissal");
        assert_eq!(state.store.len(), 4);

        let cap = state.store.list().pop().unwrap();
        assert_eq!(cap.name, "Cap");
        assert_eq!(cap.description, "A cap");
        assert_eq!(cap.cover_image, "https://example.com/cap.jpg");
        assert_eq!(cap.additional_images, ["https://example.com/cap.jpg"]);
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some("Item successfully added")
        );
        assert_eq!(state.focus, FormField::Name);
        assert!(state.draft.name().is_empty());
    }

    #[test]
    fn double_submit_adds_once() {
        let mut state = state();
        send(&mut state, Event::OpenForm);
        type_text(&mut state, "Cap");
        state.draft.set_item_type(Some(ItemType::Accessories));
        state.focus = FormField::Description;
        type_text(&mut state, "A cap");

        assert!(send(&mut state, Event::Submit).0);
        assert_eq!(send(&mut state, Event::Submit), (false, vec![]));
        tick_after(&mut state, Duration::seconds(2));
        tick_after(&mut state, Duration::seconds(3));
        assert_eq!(state.store.len(), 4);
    }

    #[test]
    fn incomplete_draft_never_submits() {
        let mut state = state();
        send(&mut state, Event::OpenForm);
        state.focus = FormField::Description;
        type_text(&mut state, "no name");
        state.draft.set_item_type(Some(ItemType::Dress));

        assert_eq!(send(&mut state, Event::Submit), (false, vec![]));
        tick_after(&mut state, Duration::seconds(2));
        assert_eq!(state.store.len(), 3);
    }

    #[test]
    fn carousel_walks_and_rejects_bad_jumps() {
        let mut state = state();
        send(&mut state, Event::Move(Direction::Right));
        assert!(send(&mut state, Event::OpenDetail).0);

        let position = |state: &AppState| match state.compute_viewmodel(40, 120).body {
            Body::Detail(detail) => detail.carousel.map(|c| c.position),
            _ => None,
        };
        assert_eq!(position(&state), Some(0));

        send(&mut state, Event::CarouselNext);
        assert_eq!(position(&state), Some(1));
        send(&mut state, Event::CarouselNext);
        assert_eq!(position(&state), Some(0), "wraps past the last image");
        send(&mut state, Event::CarouselPrevious);
        assert_eq!(position(&state), Some(1));

        assert!(matches!(
            handle_event(&mut state, &Event::CarouselGoTo(7)),
            Err(ZatalogError::CarouselIndex { index: 7, len: 2 })
        ));
        assert_eq!(position(&state), Some(1));

        assert!(send(&mut state, Event::CloseDetail).0);
        assert!(state.detail.is_none());
    }

    #[test]
    fn enquiry_toast_expires() {
        let mut state = state();
        send(&mut state, Event::OpenDetail);
        let (_, actions) = send(&mut state, Event::Enquire);
        assert_eq!(actions.len(), 1);
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some("Enquiry sent for \"Classic Cotton T-Shirt\"! We'll get back to you soon.")
        );

        tick_after(&mut state, Duration::seconds(1));
        assert!(state.notification.is_some());
        assert!(tick_after(&mut state, Duration::seconds(6)).0);
        assert!(state.notification.is_none());
    }

    #[test]
    fn cancel_while_submitting_still_commits() {
        let mut state = state();
        send(&mut state, Event::OpenForm);
        type_text(&mut state, "Scarf");
        state.draft.set_item_type(Some(ItemType::Accessories));
        state.focus = FormField::Description;
        type_text(&mut state, "Warm");
        send(&mut state, Event::Submit);

        send(&mut state, Event::CancelForm);
        assert_eq!(state.view_mode, ViewMode::Collection);
        tick_after(&mut state, Duration::seconds(2));
        assert_eq!(state.store.len(), 4);
    }
}
