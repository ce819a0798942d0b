//! In-memory item store.
//!
//! Items live in a `Vec` in insertion order, with a `HashMap` from id to position
//! for O(1) lookups. Nothing is persisted; the store lives as long as the plugin
//! instance.
//!
//! # Identifiers
//!
//! Ids are decimal Unix-millisecond timestamps. Two adds within the same
//! millisecond would collide, so the generator is forced strictly monotonic:
//! each id is `max(now_ms, previous + 1)`. Seeded items with small ids (such as
//! the samples `"1"`..`"3"`) raise the floor as well, so generated ids never
//! reuse them.

use crate::domain::{Item, NewItem};
use crate::store::backend::ItemStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory [`ItemStore`].
///
/// # Examples
///
/// ```
/// use zatalog::store::{ItemStore, MemoryStore};
/// use zatalog::{ItemType, NewItem};
///
/// let mut store = MemoryStore::new();
/// let cap = store.add(NewItem {
///     name: "Cap".to_string(),
///     item_type: ItemType::Accessories,
///     description: "A cap".to_string(),
///     cover_image: String::new(),
///     additional_images: vec![],
/// });
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.get_by_id(&cap.id).unwrap().name, "Cap");
/// assert!(store.get_by_id("missing").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<Arc<Item>>,
    index: HashMap<String, usize>,
    last_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with existing items, in order.
    ///
    /// Used for the sample catalog. Items with duplicate ids after the first are
    /// skipped.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    fn insert(&mut self, item: Item) -> Arc<Item> {
        if let Some(&pos) = self.index.get(&item.id) {
            tracing::debug!(item_id = %item.id, "duplicate id, keeping existing item");
            return Arc::clone(&self.items[pos]);
        }

        if let Ok(numeric) = item.id.parse::<u64>() {
            self.last_id = self.last_id.max(numeric);
        }

        let item = Arc::new(item);
        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(Arc::clone(&item));
        item
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id.to_string()
    }
}

impl ItemStore for MemoryStore {
    fn add(&mut self, fields: NewItem) -> Arc<Item> {
        let _span = tracing::debug_span!("store_add",
            item_name = %fields.name,
            item_type = %fields.item_type,
            image_count = fields.additional_images.len()
        ).entered();

        let now = Utc::now();
        let id = self.next_id(now);
        let item = self.insert(Item::from_new(id, now, fields));

        tracing::debug!(item_id = %item.id, total = self.items.len(), "item added");
        item
    }

    fn list(&self) -> Vec<Arc<Item>> {
        self.items.clone()
    }

    fn get_by_id(&self, id: &str) -> Option<Arc<Item>> {
        self.index.get(id).map(|&pos| Arc::clone(&self.items[pos]))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
