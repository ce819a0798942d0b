//! Event handling and state transition logic.
//!
//! The shim translates Zellij input into [`Event`]s, [`handle_event`] applies
//! each one to the [`AppState`] and returns whether to re-render plus the
//! [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Collection**: `Move`, `OpenDetail`, `CloseDetail`, `OpenForm`
//! - **Detail**: `CarouselNext`, `CarouselPrevious`, `CarouselGoTo`, `Enquire`
//! - **Form**: `FocusNext`, `FocusPrevious`, `Char`, `Backspace`, `CycleType`,
//!   `CycleStaged`, `LoadImages`, `RemoveImage`, `Submit`, `CancelForm`
//! - **System**: `Tick`, `WorkerResponse`, `DismissNotification`, `CloseFocus`
//!
//! # Submit flow
//!
//! `Submit` starts the draft's submit and schedules completion after the
//! configured delay. The shim asks Zellij for a timer; when it fires, `Tick`
//! commits the draft into the store and raises the success notification.
//! Further `Submit`s are ignored until then.
//!
//! # Example
//!
//! ```
//! use zatalog::app::{handle_event, AppSettings, AppState, Event};
//! use zatalog::store::MemoryStore;
//! use zatalog::ui::Theme;
//!
//! let mut state = AppState::new(MemoryStore::new(), AppSettings::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::OpenForm)?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), zatalog::ZatalogError>(())
//! ```

use crate::app::modes::{FormField, ViewMode};
use crate::app::notification::{enquiry_message, NotificationKind, ITEM_ADDED_MESSAGE};
use crate::app::state::Direction;
use crate::app::timers::TimerTask;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::image::{is_direct_reference, split_references};
use crate::domain::ItemType;
use crate::worker::{ImageFailure, ImageSlot, WorkerMessage, WorkerResponse};
use chrono::{DateTime, Utc};

/// Events triggered by user input, timers or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the grid selection (wraps).
    Move(Direction),
    /// Opens the detail view for the selected item.
    OpenDetail,
    /// Closes the detail view and drops its carousel.
    CloseDetail,

    /// Next carousel slide (wraps).
    CarouselNext,
    /// Previous carousel slide (wraps).
    CarouselPrevious,
    /// Jumps to a zero-based slide.
    CarouselGoTo(usize),
    /// Stub "contact us about this item" action.
    Enquire,

    /// Switches to the add-item form.
    OpenForm,
    /// Leaves the form and discards the draft.
    CancelForm,
    /// Moves focus to the next form control (wraps).
    FocusNext,
    /// Moves focus to the previous form control (wraps).
    FocusPrevious,
    /// Types a character into the focused text input.
    Char(char),
    /// Deletes the last character of the focused text input.
    Backspace,
    /// Steps the type selector forward or backward.
    CycleType { forward: bool },
    /// Moves the staged-image cursor forward or backward.
    CycleStaged { forward: bool },
    /// Stages what was typed into the focused image input.
    LoadImages,
    /// Clears the cover or unstages the selected additional image.
    RemoveImage,
    /// Starts submitting the draft.
    Submit,

    /// Hides the visible notification.
    DismissNotification,
    /// Hides the plugin pane.
    CloseFocus,

    /// A Zellij timer fired; runs every task due at `now`.
    Tick { now: DateTime<Utc> },

    /// A reply from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns whether to
/// re-render along with the actions to execute.
///
/// # Errors
///
/// Returns [`ZatalogError::CarouselIndex`](crate::ZatalogError::CarouselIndex)
/// for a `CarouselGoTo` past the last slide; the carousel is left unchanged.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Move(direction) => {
            if state.view_mode != ViewMode::Collection || state.detail.is_some() {
                return Ok((false, vec![]));
            }
            state.move_selection(*direction);
            Ok((true, vec![]))
        }
        Event::OpenDetail => {
            if state.view_mode != ViewMode::Collection || state.detail.is_some() {
                return Ok((false, vec![]));
            }
            Ok((state.open_detail(), vec![]))
        }
        Event::CloseDetail => Ok((state.detail.take().is_some(), vec![])),
        Event::CarouselNext | Event::CarouselPrevious | Event::CarouselGoTo(_) => {
            handle_carousel(state, event)
        }
        Event::Enquire => {
            let Some(item) = state.detail_item() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(item_id = %item.id, "enquiry requested");
            let action = state.notify(NotificationKind::Info, enquiry_message(&item.name), Utc::now());
            Ok((true, vec![action]))
        }
        Event::OpenForm => {
            if state.view_mode == ViewMode::AddItem {
                return Ok((false, vec![]));
            }
            state.open_form();
            Ok((true, vec![]))
        }
        Event::CancelForm => {
            if state.view_mode != ViewMode::AddItem {
                return Ok((false, vec![]));
            }
            state.view_mode = ViewMode::Collection;
            if state.draft.is_submitting() {
                tracing::debug!("leaving form while submit is pending");
            } else {
                state.reset_form();
            }
            Ok((true, vec![]))
        }
        Event::FocusNext | Event::FocusPrevious => {
            if state.view_mode != ViewMode::AddItem {
                return Ok((false, vec![]));
            }
            state.focus = if *event == Event::FocusNext {
                state.focus.next()
            } else {
                state.focus.previous()
            };
            state.clamp_staged_cursor();
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((edit_focused(state, |text| text.push(*c)), vec![])),
        Event::Backspace => Ok((
            edit_focused(state, |text| {
                text.pop();
            }),
            vec![],
        )),
        Event::CycleType { forward } => {
            if !form_editable(state) || state.focus != FormField::Type {
                return Ok((false, vec![]));
            }
            let current = state.draft.item_type();
            let next = if *forward {
                ItemType::cycle_next(current)
            } else {
                ItemType::cycle_previous(current)
            };
            state.draft.set_item_type(Some(next));
            Ok((true, vec![]))
        }
        Event::CycleStaged { forward } => {
            let len = state.draft.additional_images().len();
            if state.view_mode != ViewMode::AddItem || state.focus != FormField::AdditionalImages || len == 0 {
                return Ok((false, vec![]));
            }
            state.staged_cursor = if *forward {
                (state.staged_cursor + 1) % len
            } else {
                (state.staged_cursor + len - 1) % len
            };
            Ok((true, vec![]))
        }
        Event::LoadImages => Ok(load_images(state)),
        Event::RemoveImage => {
            if !form_editable(state) {
                return Ok((false, vec![]));
            }
            let changed = match state.focus {
                FormField::CoverImage => {
                    let had_cover = state.draft.cover_image().is_some();
                    state.draft.clear_cover_image();
                    had_cover
                }
                FormField::AdditionalImages => {
                    let removed = state.draft.unstage_additional_image(state.staged_cursor);
                    state.clamp_staged_cursor();
                    removed.is_some()
                }
                _ => false,
            };
            Ok((changed, vec![]))
        }
        Event::Submit => {
            if state.view_mode != ViewMode::AddItem || !state.draft.begin_submit() {
                tracing::debug!(
                    submitting = state.draft.is_submitting(),
                    submittable = state.draft.is_submittable(),
                    "submit refused"
                );
                return Ok((false, vec![]));
            }
            let delay = state.settings.submit_delay;
            let seconds = state.timers.schedule(Utc::now(), delay, TimerTask::CompleteSubmit);
            tracing::debug!(delay_secs = seconds, "submit started");
            Ok((true, vec![Action::SetTimeout(seconds)]))
        }
        Event::DismissNotification => Ok((state.dismiss_notification(None), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Tick { now } => Ok(run_due_tasks(state, *now)),
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

fn handle_carousel(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    if state.detail_item().is_none() {
        state.detail = None;
        return Ok((false, vec![]));
    }
    let Some(carousel) = state.detail.as_mut().and_then(|d| d.carousel.as_mut()) else {
        return Ok((false, vec![]));
    };

    let before = carousel.index();
    match event {
        Event::CarouselNext => carousel.next(),
        Event::CarouselPrevious => carousel.previous(),
        Event::CarouselGoTo(index) => carousel.go_to(*index)?,
        _ => {}
    }
    Ok((carousel.index() != before, vec![]))
}

/// Whether form inputs accept edits. The form is frozen while submitting.
fn form_editable(state: &AppState) -> bool {
    state.view_mode == ViewMode::AddItem && !state.draft.is_submitting()
}

/// Applies `edit` to the text behind the focused control.
fn edit_focused(state: &mut AppState, edit: impl FnOnce(&mut String)) -> bool {
    if !form_editable(state) {
        return false;
    }
    match state.focus {
        FormField::CoverImage => edit(&mut state.cover_input),
        FormField::AdditionalImages => edit(&mut state.additional_input),
        focus => {
            let Some(field) = focus.draft_field() else {
                return false;
            };
            let mut text = match focus {
                FormField::Name => state.draft.name().to_string(),
                _ => state.draft.description().to_string(),
            };
            edit(&mut text);
            state.draft.set_field(field, &text);
        }
    }
    true
}

/// Stages URLs and data URIs from the focused image input directly and sends
/// local paths to the worker.
fn load_images(state: &mut AppState) -> (bool, Vec<Action>) {
    if !form_editable(state) {
        return (false, vec![]);
    }
    let (slot, input) = match state.focus {
        FormField::CoverImage => (ImageSlot::Cover, std::mem::take(&mut state.cover_input)),
        FormField::AdditionalImages => {
            (ImageSlot::Additional, std::mem::take(&mut state.additional_input))
        }
        _ => return (false, vec![]),
    };

    let references = match slot {
        ImageSlot::Cover => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                vec![]
            } else {
                vec![trimmed.to_string()]
            }
        }
        ImageSlot::Additional => split_references(&input),
    };
    if references.is_empty() {
        return (false, vec![]);
    }

    let mut paths = Vec::new();
    for reference in references {
        if is_direct_reference(&reference) {
            stage(state, slot, reference);
        } else {
            paths.push(reference);
        }
    }

    let mut actions = vec![];
    if !paths.is_empty() {
        tracing::debug!(slot = ?slot, path_count = paths.len(), "requesting image reads");
        state.pending_loads += 1;
        actions.push(Action::PostToWorker(WorkerMessage::read_images(
            state.form_epoch,
            slot,
            paths,
            state.settings.max_image_bytes,
        )));
    }
    (true, actions)
}

fn stage(state: &mut AppState, slot: ImageSlot, reference: String) {
    match slot {
        ImageSlot::Cover => state.draft.stage_cover_reference(reference),
        ImageSlot::Additional => state.draft.stage_additional_reference(reference),
    }
}

fn run_due_tasks(state: &mut AppState, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    let due = state.timers.take_due(now);
    let mut render = false;
    let mut actions = vec![];

    for task in &due {
        match task {
            TimerTask::CompleteSubmit => {
                if state.complete_submit().is_some() {
                    actions.push(state.notify(
                        NotificationKind::Success,
                        ITEM_ADDED_MESSAGE.to_string(),
                        now,
                    ));
                }
                render = true;
            }
            TimerTask::DismissNotification(id) => {
                render |= state.dismiss_notification(Some(*id));
            }
        }
    }

    if due.is_empty() {
        if let Some(seconds) = state.timers.next_due_in(now) {
            tracing::debug!(seconds = seconds, "timer fired early, re-arming");
            actions.push(Action::SetTimeout(seconds));
        }
    }
    (render, actions)
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::ImagesRead {
            request,
            slot,
            images,
            failures,
        } => {
            if *request != state.form_epoch {
                tracing::debug!(request = request, current = state.form_epoch, "dropping stale image read");
                return (false, vec![]);
            }
            state.pending_loads = state.pending_loads.saturating_sub(1);
            if state.draft.is_submitting() {
                tracing::debug!(request = request, "dropping image read that landed during submit");
                return (true, vec![]);
            }

            match slot {
                ImageSlot::Cover => {
                    if let Some(first) = images.first() {
                        state.draft.stage_cover_reference(first.clone());
                    }
                }
                ImageSlot::Additional => {
                    for image in images {
                        state.draft.stage_additional_reference(image.clone());
                    }
                }
            }

            let mut actions = vec![];
            if let Some(message) = failure_message(failures) {
                actions.push(state.notify(NotificationKind::Error, message, Utc::now()));
            }
            (true, actions)
        }
        WorkerResponse::Error { message } => {
            // Carries no request id, so the pending count is left alone.
            tracing::error!(error = %message, "worker error");
            let action = state.notify(NotificationKind::Error, message.clone(), Utc::now());
            (true, vec![action])
        }
    }
}

fn failure_message(failures: &[ImageFailure]) -> Option<String> {
    match failures {
        [] => None,
        [only] => Some(format!("Could not load {}: {}", only.path, only.reason)),
        [first, rest @ ..] => Some(format!(
            "Could not load {} images ({}: {})",
            rest.len() + 1,
            first.path,
            first.reason
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppSettings;
    use crate::store::MemoryStore;
    use crate::ui::Theme;

    fn form_state() -> AppState {
        let mut state = AppState::new(MemoryStore::new(), AppSettings::default(), Theme::default());
        state.open_form();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn typing_follows_focus() {
        let mut state = form_state();
        type_text(&mut state, "Cap");
        handle_event(&mut state, &Event::FocusNext).unwrap();
        handle_event(&mut state, &Event::CycleType { forward: false }).unwrap();
        handle_event(&mut state, &Event::FocusNext).unwrap();
        type_text(&mut state, "A capx");
        handle_event(&mut state, &Event::Backspace).unwrap();

        assert_eq!(state.draft.name(), "Cap");
        assert_eq!(state.draft.item_type(), Some(ItemType::Other));
        assert_eq!(state.draft.description(), "A cap");
    }

    #[test]
    fn urls_are_staged_without_the_worker() {
        let mut state = form_state();
        state.focus = FormField::AdditionalImages;
        state.additional_input = "https://a/1.jpg, ~/b.png".to_string();

        let (_, actions) = handle_event(&mut state, &Event::LoadImages).unwrap();

        assert_eq!(state.draft.additional_images(), ["https://a/1.jpg"]);
        assert_eq!(state.pending_loads, 1);
        assert!(state.additional_input.is_empty());
        let [Action::PostToWorker(WorkerMessage::ReadImages { paths, slot, .. })] = actions.as_slice() else {
            panic!("expected one worker request, got {actions:?}");
        };
        assert_eq!(paths, &["~/b.png"]);
        assert_eq!(*slot, ImageSlot::Additional);
    }

    #[test]
    fn stale_worker_replies_are_dropped() {
        let mut state = form_state();
        state.reset_form();
        let response = WorkerResponse::ImagesRead {
            request: 0,
            slot: ImageSlot::Cover,
            images: vec!["data:image/png;base64,AAAA".to_string()],
            failures: vec![],
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!render);
        assert!(state.draft.cover_image().is_none());
    }

    #[test]
    fn failures_raise_an_error_toast() {
        let mut state = form_state();
        let response = WorkerResponse::ImagesRead {
            request: state.form_epoch,
            slot: ImageSlot::Additional,
            images: vec![],
            failures: vec![ImageFailure {
                path: "~/gone.png".to_string(),
                reason: "IO error: not found".to_string(),
            }],
        };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert_eq!(actions.len(), 1);
        let toast = state.notification.as_ref().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Could not load ~/gone.png: IO error: not found");
    }

    #[test]
    fn remove_unstages_selected_image() {
        let mut state = form_state();
        state.focus = FormField::AdditionalImages;
        for r in ["a", "b", "c"] {
            state.draft.stage_additional_reference(r.to_string());
        }
        handle_event(&mut state, &Event::CycleStaged { forward: false }).unwrap();
        assert_eq!(state.staged_cursor, 2);
        handle_event(&mut state, &Event::RemoveImage).unwrap();
        assert_eq!(state.draft.additional_images(), ["a", "b"]);
        assert_eq!(state.staged_cursor, 1);
    }

    #[test]
    fn image_read_landing_during_submit_is_not_committed() {
        let mut state = form_state();
        type_text(&mut state, "Cap");
        handle_event(&mut state, &Event::FocusNext).unwrap();
        handle_event(&mut state, &Event::CycleType { forward: true }).unwrap();
        handle_event(&mut state, &Event::FocusNext).unwrap();
        type_text(&mut state, "A cap");
        state.focus = FormField::CoverImage;
        state.cover_input = "~/cap.png".to_string();
        handle_event(&mut state, &Event::LoadImages).unwrap();
        assert_eq!(state.pending_loads, 1);

        handle_event(&mut state, &Event::Submit).unwrap();
        assert!(state.draft.is_submitting());

        let late = WorkerResponse::ImagesRead {
            request: state.form_epoch,
            slot: ImageSlot::Cover,
            images: vec!["data:image/png;base64,AAAA".to_string()],
            failures: vec![],
        };
        handle_event(&mut state, &Event::WorkerResponse(late)).unwrap();
        assert!(state.draft.cover_image().is_none());
        assert_eq!(state.pending_loads, 0);

        let later = Utc::now() + chrono::Duration::seconds(2);
        handle_event(&mut state, &Event::Tick { now: later }).unwrap();
        let committed = state.store.list().pop().unwrap();
        assert_eq!(committed.name, "Cap");
        assert!(committed.cover_image.is_empty());
        assert!(committed.additional_images.is_empty());
    }

    #[test]
    fn worker_error_leaves_pending_reads_counted() {
        let mut state = form_state();
        state.focus = FormField::AdditionalImages;
        state.additional_input = "~/b.png".to_string();
        handle_event(&mut state, &Event::LoadImages).unwrap();

        let error = WorkerResponse::Error {
            message: "bad message payload".to_string(),
        };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(error)).unwrap();

        assert_eq!(state.pending_loads, 1);
        assert_eq!(actions.len(), 1);
        assert_eq!(state.notification.as_ref().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut state = form_state();
        type_text(&mut state, "Cap");
        handle_event(&mut state, &Event::CancelForm).unwrap();
        assert_eq!(state.view_mode, ViewMode::Collection);
        assert!(state.draft.name().is_empty());
    }
}
