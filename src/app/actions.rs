//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never calls into Zellij directly.
//! It returns a `Vec<Action>` and the plugin shim executes each one in order,
//! which keeps the handler testable without a running host.
//!
//! # Example
//!
//! ```
//! use zatalog::app::Action;
//! use zatalog::worker::{ImageSlot, WorkerMessage};
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::read_images(
//!         1,
//!         ImageSlot::Cover,
//!         vec!["~/Pictures/cap.png".to_string()],
//!         10 * 1024 * 1024,
//!     )),
//!     Action::SetTimeout(1.0),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane (`q` in the collection view).
    CloseFocus,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Asks Zellij for a `Timer` event after this many seconds.
    ///
    /// The shim turns that event into [`Event::Tick`](crate::app::Event::Tick),
    /// which runs whatever the scheduler has due.
    SetTimeout(f64),
}
