//! Toast notifications.
//!
//! At most one toast is visible. Showing a new one replaces the old; each toast
//! gets a fresh id so a dismissal timer scheduled for an older toast cannot hide
//! a newer one.

/// Visual tone of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Message shown after an item is committed.
pub const ITEM_ADDED_MESSAGE: &str = "Item successfully added";

/// Stub enquiry confirmation. No message is actually sent anywhere.
#[must_use]
pub fn enquiry_message(item_name: &str) -> String {
    format!("Enquiry sent for \"{item_name}\"! We'll get back to you soon.")
}
