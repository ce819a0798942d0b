//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain, store and worker
//! layers:
//!
//! ```text
//! Key / Timer / Worker → Event → handle_event → AppState mutations → Actions
//!                                                     │
//!                                         compute_viewmodel → ui::render
//! ```
//!
//! - [`carousel`]: image carousel cursor
//! - [`draft`]: add-item draft and its commit into the store
//! - [`modes`]: which view is shown and which form control is focused
//! - [`notification`]: toast messages
//! - [`timers`]: deferred tasks driven by Zellij timers
//! - [`state`]: central state container and view model computation
//! - [`handler`]: event processing
//! - [`actions`]: side effects for the shim

pub mod actions;
pub mod carousel;
pub mod draft;
pub mod handler;
pub mod modes;
pub mod notification;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use carousel::Carousel;
pub use draft::{Draft, DraftField};
pub use handler::{handle_event, Event};
pub use modes::{FormField, ViewMode};
pub use notification::{Notification, NotificationKind};
pub use state::{AppSettings, AppState, DetailView, Direction};
pub use timers::{Scheduler, TimerTask};
