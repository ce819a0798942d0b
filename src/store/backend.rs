//! Item store abstraction.
//!
//! This module defines the [`ItemStore`] trait, the read/write contract every
//! catalog reader and writer goes through. [`AppState`](crate::app::AppState)
//! owns one boxed store, so any implementation can be injected at construction;
//! the add-item flow receives it as `&mut dyn ItemStore`.
//!
//! # Contract
//!
//! - `add` is the only mutator. It never fails and the new item is visible to
//!   every later read.
//! - `list` returns a snapshot: later adds do not change a returned vector.
//! - `get_by_id` signals a miss with `None`, never an error.

use crate::domain::{Item, NewItem};
use std::fmt::Debug;
use std::sync::Arc;

/// Ordered, append-only collection of catalog items.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::store::MemoryStore): in-memory store with an id index
pub trait ItemStore: Debug + Send {
    /// Creates an item with a fresh unique id and the current time as
    /// `created_at`, appends it, and returns it.
    fn add(&mut self, fields: NewItem) -> Arc<Item>;

    /// Returns every item in insertion order.
    fn list(&self) -> Vec<Arc<Item>>;

    /// Looks an item up by id.
    fn get_by_id(&self, id: &str) -> Option<Arc<Item>>;

    /// Number of items in the store.
    fn len(&self) -> usize;

    /// Whether the store holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
