//! Add-item draft: unsaved form state and its commit into the store.
//!
//! The draft mirrors an item's fields minus `id`/`created_at`, plus the list of
//! staged additional images. Fields can be filled in any order; validation only
//! happens in [`Draft::is_submittable`], which gates the submit control.
//!
//! # Submit lifecycle
//!
//! Submitting spans an artificial delay, so it happens in two steps:
//!
//! ```text
//! begin_submit()  ── submitting = true, further submits refused
//!       │
//!   (delay elapses)
//!       ▼
//! commit(store)   ── store.add(cover ++ staged images), draft reset
//! ```
//!
//! # Example
//!
//! ```
//! use zatalog::app::{Draft, DraftField};
//! use zatalog::store::{ItemStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let mut draft = Draft::default();
//! draft.set_field(DraftField::Name, "Cap");
//! draft.set_field(DraftField::Type, "Accessories");
//! draft.set_field(DraftField::Description, "A cap");
//!
//! assert!(draft.begin_submit());
//! let item = draft.commit(&mut store).unwrap();
//! assert_eq!(item.name, "Cap");
//! assert_eq!(store.len(), 1);
//! assert!(draft.name().is_empty());
//! ```

use crate::domain::error::Result;
use crate::domain::image::encode_data_uri;
use crate::domain::{Item, ItemType, NewItem};
use crate::store::ItemStore;
use std::sync::Arc;

/// Text fields that can be set on a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    /// Parsed as an [`ItemType`] label; an unknown label clears the type.
    Type,
    Description,
}

/// In-progress item data owned by the add-item flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    name: String,
    item_type: Option<ItemType>,
    description: String,
    cover_image: Option<String>,
    additional_images: Vec<String>,
    submitting: bool,
}

impl Draft {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn item_type(&self) -> Option<ItemType> {
        self.item_type
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    #[must_use]
    pub fn additional_images(&self) -> &[String] {
        &self.additional_images
    }

    /// Whether a submit is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Replaces one field. No validation is performed.
    pub fn set_field(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Name => value.clone_into(&mut self.name),
            DraftField::Description => value.clone_into(&mut self.description),
            DraftField::Type => self.item_type = value.parse().ok(),
        }
    }

    /// Sets the category directly.
    pub fn set_item_type(&mut self, item_type: Option<ItemType>) {
        self.item_type = item_type;
    }

    /// Appends a character to a text field.
    pub fn push_char(&mut self, field: DraftField, c: char) {
        match field {
            DraftField::Name => self.name.push(c),
            DraftField::Description => self.description.push(c),
            DraftField::Type => {}
        }
    }

    /// Removes the last character of a text field.
    pub fn pop_char(&mut self, field: DraftField) {
        match field {
            DraftField::Name => {
                self.name.pop();
            }
            DraftField::Description => {
                self.description.pop();
            }
            DraftField::Type => {}
        }
    }

    /// Encodes raw image bytes and stages them as the cover image.
    ///
    /// Replaces any previously staged cover.
    ///
    /// # Errors
    ///
    /// Returns [`ZatalogError::NotAnImage`](crate::ZatalogError::NotAnImage) when
    /// the bytes are not an image. The draft is unchanged.
    pub fn stage_cover_image(&mut self, bytes: &[u8]) -> Result<()> {
        let uri = encode_data_uri(bytes)?;
        self.stage_cover_reference(uri);
        Ok(())
    }

    /// Encodes raw image bytes and appends them to the additional images.
    ///
    /// # Errors
    ///
    /// Returns [`ZatalogError::NotAnImage`](crate::ZatalogError::NotAnImage) when
    /// the bytes are not an image. The draft is unchanged.
    pub fn stage_additional_image(&mut self, bytes: &[u8]) -> Result<()> {
        let uri = encode_data_uri(bytes)?;
        self.stage_additional_reference(uri);
        Ok(())
    }

    /// Stages an already-encoded reference (URL or data URI) as the cover.
    pub fn stage_cover_reference(&mut self, reference: String) {
        self.cover_image = Some(reference);
    }

    /// Appends an already-encoded reference to the additional images.
    pub fn stage_additional_reference(&mut self, reference: String) {
        self.additional_images.push(reference);
    }

    /// Removes the staged cover image.
    pub fn clear_cover_image(&mut self) {
        self.cover_image = None;
    }

    /// Removes the staged additional image at `index`.
    ///
    /// Returns the removed reference, or `None` if `index` is out of range.
    pub fn unstage_additional_image(&mut self, index: usize) -> Option<String> {
        (index < self.additional_images.len()).then(|| self.additional_images.remove(index))
    }

    /// True iff the trimmed name is non-empty, a type is selected, and the
    /// trimmed description is non-empty. Images do not matter.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
            && self.item_type.is_some()
            && !self.description.trim().is_empty()
    }

    /// Starts a submit.
    ///
    /// Returns `false`, changing nothing, when the draft is not submittable or a
    /// submit is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting || !self.is_submittable() {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Completes an in-flight submit: adds the item to `store` and resets the
    /// draft to empty.
    ///
    /// The stored `additional_images` are the staged cover (if any) followed by
    /// the staged additional images, so the carousel always opens on the cover.
    ///
    /// Returns `None` without touching the store when no submit is in flight.
    pub fn commit(&mut self, store: &mut dyn ItemStore) -> Option<Arc<Item>> {
        if !self.submitting {
            return None;
        }
        let Some(item_type) = self.item_type else {
            self.submitting = false;
            return None;
        };

        let draft = std::mem::take(self);
        let cover_image = draft.cover_image.unwrap_or_default();
        let additional_images = if cover_image.is_empty() {
            draft.additional_images
        } else {
            std::iter::once(cover_image.clone())
                .chain(draft.additional_images)
                .collect()
        };

        Some(store.add(NewItem {
            name: draft.name,
            item_type,
            description: draft.description,
            cover_image,
            additional_images,
        }))
    }

    /// Discards everything, including an in-flight submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn filled() -> Draft {
        let mut d = Draft::default();
        d.set_field(DraftField::Name, "Cap");
        d.set_field(DraftField::Type, "Accessories");
        d.set_field(DraftField::Description, "A cap");
        d
    }

    #[test]
    fn submittable_requires_each_field() {
        assert!(filled().is_submittable());

        let blanks = ["", "   ", "\t\n"];
        for blank in blanks {
            let mut d = filled();
            d.set_field(DraftField::Name, blank);
            assert!(!d.is_submittable(), "name {blank:?}");

            let mut d = filled();
            d.set_field(DraftField::Description, blank);
            assert!(!d.is_submittable(), "description {blank:?}");

            let mut d = filled();
            d.set_field(DraftField::Type, blank);
            assert!(!d.is_submittable(), "type {blank:?}");
        }
    }

    #[test]
    fn every_combination_of_missing_fields_blocks_submit() {
        for mask in 0..8u8 {
            let mut d = Draft::default();
            if mask & 1 != 0 {
                d.set_field(DraftField::Name, "n");
            }
            if mask & 2 != 0 {
                d.set_field(DraftField::Type, "Dress");
            }
            if mask & 4 != 0 {
                d.set_field(DraftField::Description, "d");
            }
            assert_eq!(d.is_submittable(), mask == 7, "mask {mask:03b}");
        }
    }

    #[test]
    fn images_do_not_affect_submittability() {
        let mut d = filled();
        assert!(d.cover_image().is_none());
        assert!(d.is_submittable());
        d.stage_cover_image(&PNG).unwrap();
        assert!(d.is_submittable());
    }

    #[test]
    fn unknown_type_label_clears_type() {
        let mut d = filled();
        d.set_field(DraftField::Type, "Hat");
        assert_eq!(d.item_type(), None);
    }

    #[test]
    fn cover_is_prepended_on_commit() {
        let mut store = MemoryStore::new();
        let mut d = filled();
        d.stage_cover_reference("cover".to_string());
        d.stage_additional_reference("a".to_string());
        d.stage_additional_reference("b".to_string());

        assert!(d.begin_submit());
        let item = d.commit(&mut store).unwrap();
        assert_eq!(item.cover_image, "cover");
        assert_eq!(item.additional_images, ["cover", "a", "b"]);
    }

    #[test]
    fn cover_also_staged_as_additional_is_kept_twice() {
        let mut store = MemoryStore::new();
        let mut d = filled();
        d.stage_cover_reference("same".to_string());
        d.stage_additional_reference("same".to_string());
        d.begin_submit();
        let item = d.commit(&mut store).unwrap();
        assert_eq!(item.additional_images, ["same", "same"]);
    }

    #[test]
    fn no_cover_means_additional_images_unchanged() {
        let mut store = MemoryStore::new();
        let mut d = filled();
        d.stage_additional_reference("a".to_string());
        d.begin_submit();
        let item = d.commit(&mut store).unwrap();
        assert_eq!(item.cover_image, "");
        assert_eq!(item.additional_images, ["a"]);
    }

    #[test]
    fn second_begin_is_refused_while_in_flight() {
        let mut d = filled();
        assert!(d.begin_submit());
        assert!(!d.begin_submit());
        assert!(d.is_submitting());
    }

    #[test]
    fn empty_name_never_reaches_the_store() {
        let mut store = MemoryStore::new();
        let mut d = filled();
        d.set_field(DraftField::Name, "");
        assert!(!d.is_submittable());
        assert!(!d.begin_submit());
        assert!(d.commit(&mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn commit_resets_the_draft() {
        let mut store = MemoryStore::new();
        let mut d = filled();
        d.stage_cover_image(&PNG).unwrap();
        d.begin_submit();
        d.commit(&mut store).unwrap();
        assert_eq!(d, Draft::default());
        assert!(d.commit(&mut store).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn non_image_bytes_leave_draft_untouched() {
        let mut d = filled();
        assert!(d.stage_additional_image(b"not an image").is_err());
        assert!(d.additional_images().is_empty());
        d.stage_additional_image(&PNG).unwrap();
        assert_eq!(d.additional_images().len(), 1);
        assert!(d.additional_images()[0].starts_with("data:image/png;base64,"));
    }

    #[test]
    fn unstage_removes_by_index() {
        let mut d = Draft::default();
        for r in ["a", "b", "c"] {
            d.stage_additional_reference(r.to_string());
        }
        assert_eq!(d.unstage_additional_image(1).as_deref(), Some("b"));
        assert_eq!(d.additional_images(), ["a", "c"]);
        assert_eq!(d.unstage_additional_image(5), None);
    }
}
