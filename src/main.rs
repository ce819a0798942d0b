//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Zatalog library and Zellij: it maps
//! Zellij events to library [`Event`]s and executes the returned [`Action`]s.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling, timers
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  ZatalogWorker   │   │  ← Reads and encodes image files
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Collection grid:
//! - `h`/`j`/`k`/`l`, arrows: move selection (wraps)
//! - `Enter`: open the selected item
//! - `a`: add a new item
//! - `x`: dismiss the notification
//! - `q`/`Esc`: hide the plugin
//!
//! Item detail:
//! - `h`/`l`, `Left`/`Right`: previous/next image
//! - `1`-`9`: jump to an image
//! - `e`: enquire about the item
//! - `q`/`Esc`: back to the grid
//!
//! Add-item form:
//! - `Tab`/`Down`, `Shift+Tab`/`Up`: next/previous field
//! - `Left`/`Right`: choose the type, or pick a staged image
//! - `Enter`: load images on image fields, submit on the button
//! - `Ctrl+s`: submit, `Ctrl+x`: remove image
//! - `Esc`: cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zatalog::app::{AppState, Direction, FormField};
use zatalog::worker::{WorkerMessage, WorkerResponse, ZatalogWorker};
use zatalog::{handle_event, Action, Config, Event, ViewMode};

register_plugin!(State);
register_worker!(ZatalogWorker, zatalog_worker, ZATALOG_WORKER);

struct State {
    app: AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zatalog::initialize(&Config::default()),
            worker_name: "zatalog".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the app state, requests permissions and
    /// subscribes to events.
    ///
    /// `FullHdAccess` lets the worker read image files picked in the form.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zatalog::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            sample_items = config.sample_items,
            submit_delay_ms = config.submit_delay_ms,
            "parsed configuration"
        );
        self.app = zatalog::initialize(&config);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Translates and handles one Zellij event. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick {
                now: chrono::Utc::now(),
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                if matches!(status, PermissionStatus::Denied) {
                    tracing::warn!("permissions denied - image files cannot be loaded");
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        zatalog::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        match self.app.view_mode {
            ViewMode::AddItem => Self::map_form_key(key, self.app.focus),
            ViewMode::Collection if self.app.detail.is_some() => Self::map_detail_key(key),
            ViewMode::Collection => Self::map_collection_key(key),
        }
    }

    fn map_collection_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Left | BareKey::Char('h') => Event::Move(Direction::Left),
            BareKey::Down | BareKey::Char('j') => Event::Move(Direction::Down),
            BareKey::Up | BareKey::Char('k') => Event::Move(Direction::Up),
            BareKey::Right | BareKey::Char('l') => Event::Move(Direction::Right),
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('a') => Event::OpenForm,
            BareKey::Char('x') => Event::DismissNotification,
            BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_detail_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Left | BareKey::Char('h') => Event::CarouselPrevious,
            BareKey::Right | BareKey::Char('l') => Event::CarouselNext,
            BareKey::Char(c @ '1'..='9') => {
                let slide = c.to_digit(10)? as usize;
                Event::CarouselGoTo(slide - 1)
            }
            BareKey::Char('e') => Event::Enquire,
            BareKey::Char('x') => Event::DismissNotification,
            BareKey::Esc | BareKey::Char('q') => Event::CloseDetail,
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier, focus: FormField) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('s') => Some(Event::Submit),
                BareKey::Char('x') => Some(Event::RemoveImage),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::FocusPrevious,
            BareKey::Tab | BareKey::Down => Event::FocusNext,
            BareKey::Up => Event::FocusPrevious,
            BareKey::Left | BareKey::Right => {
                let forward = key.bare_key == BareKey::Right;
                match focus {
                    FormField::Type => Event::CycleType { forward },
                    FormField::AdditionalImages => Event::CycleStaged { forward },
                    _ => return None,
                }
            }
            BareKey::Enter => match focus {
                FormField::Submit => Event::Submit,
                FormField::CoverImage | FormField::AdditionalImages => Event::LoadImages,
                _ => Event::FocusNext,
            },
            BareKey::Esc => Event::CancelForm,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(' ') if focus == FormField::Type => Event::CycleType { forward: true },
            BareKey::Char(c) if focus.accepts_text() => Event::Char(c),
            _ => return None,
        })
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => self.post_worker_message(message),
            Action::SetTimeout(secs) => set_timeout(*secs),
        }
    }
}
