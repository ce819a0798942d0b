//! Item domain model.
//!
//! This module defines the core `Item` type, one entry of the catalog, together with
//! the closed [`ItemType`] category set and the [`NewItem`] field bundle accepted by
//! the store. Items are immutable once created: the store hands them out as
//! `Arc<Item>` and nothing exposes a mutable path to a committed item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a catalog item.
///
/// The set is fixed. Because the draft stores an `Option<ItemType>` rather than a
/// free string, an invalid category cannot reach the store.
///
/// Labels (used for display, parsing and serde) match what users see in the form:
///
/// ```
/// use zatalog::ItemType;
///
/// assert_eq!(ItemType::SportsGear.to_string(), "Sports Gear");
/// assert_eq!("Jacket".parse::<ItemType>(), Ok(ItemType::Jacket));
/// assert!("Hat".parse::<ItemType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Shirt,
    Pant,
    Shoes,
    #[serde(rename = "Sports Gear")]
    SportsGear,
    Accessories,
    Jacket,
    Dress,
    Other,
}

impl ItemType {
    /// Every category, in the order the form cycles through them.
    pub const ALL: [Self; 8] = [
        Self::Shirt,
        Self::Pant,
        Self::Shoes,
        Self::SportsGear,
        Self::Accessories,
        Self::Jacket,
        Self::Dress,
        Self::Other,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shirt => "Shirt",
            Self::Pant => "Pant",
            Self::Shoes => "Shoes",
            Self::SportsGear => "Sports Gear",
            Self::Accessories => "Accessories",
            Self::Jacket => "Jacket",
            Self::Dress => "Dress",
            Self::Other => "Other",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Steps forward through [`ItemType::ALL`], starting at the first category
    /// when nothing is selected yet.
    #[must_use]
    pub fn cycle_next(current: Option<Self>) -> Self {
        current.map_or(Self::ALL[0], |t| {
            Self::ALL[(t.position() + 1) % Self::ALL.len()]
        })
    }

    /// Steps backward through [`ItemType::ALL`], starting at the last category
    /// when nothing is selected yet.
    #[must_use]
    pub fn cycle_previous(current: Option<Self>) -> Self {
        let len = Self::ALL.len();
        current.map_or(Self::ALL[len - 1], |t| {
            Self::ALL[(t.position() + len - 1) % len]
        })
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownItemType(pub String);

impl fmt::Display for UnknownItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown item type: {}", self.0)
    }
}

impl std::error::Error for UnknownItemType {}

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownItemType(wanted.to_string()))
    }
}

/// Fields accepted by the store when creating an item.
///
/// Everything an [`Item`] has except the store-assigned `id` and `created_at`.
/// Validity (non-empty name and description) is the caller's responsibility; the
/// add-item draft gates submission before a `NewItem` is ever built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub item_type: ItemType,
    pub description: String,
    pub cover_image: String,
    pub additional_images: Vec<String>,
}

/// One catalog entry.
///
/// # Fields
///
/// - `id`: unique identifier assigned by the store, never reused
/// - `cover_image`: primary image reference (URL or data URI); may be empty
/// - `additional_images`: carousel order; by convention starts with the cover
/// - `created_at`: fixed at creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub description: String,
    pub cover_image: String,
    pub additional_images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Builds an item from submitted fields plus the store-assigned identity.
    #[must_use]
    pub fn from_new(id: String, created_at: DateTime<Utc>, fields: NewItem) -> Self {
        Self {
            id,
            name: fields.name,
            item_type: fields.item_type,
            description: fields.description,
            cover_image: fields.cover_image,
            additional_images: fields.additional_images,
            created_at,
        }
    }

    /// Date the item was added, formatted month/day/year.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use zatalog::{Item, ItemType, NewItem};
    ///
    /// let item = Item::from_new(
    ///     "1".to_string(),
    ///     Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
    ///     NewItem {
    ///         name: "Cap".to_string(),
    ///         item_type: ItemType::Accessories,
    ///         description: "A cap".to_string(),
    ///         cover_image: String::new(),
    ///         additional_images: vec![],
    ///     },
    /// );
    /// assert_eq!(item.added_on(), "1/15/2024");
    /// ```
    #[must_use]
    pub fn added_on(&self) -> String {
        self.created_at.format("%-m/%-d/%Y").to_string()
    }

    /// Images shown by the detail carousel.
    #[must_use]
    pub fn carousel_images(&self) -> &[String] {
        &self.additional_images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for t in ItemType::ALL {
            assert_eq!(t.label().parse::<ItemType>(), Ok(t));
        }
        assert_eq!(" sports gear ".parse::<ItemType>(), Ok(ItemType::SportsGear));
    }

    #[test]
    fn empty_label_is_rejected() {
        assert!("".parse::<ItemType>().is_err());
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(ItemType::cycle_next(None), ItemType::Shirt);
        assert_eq!(ItemType::cycle_previous(None), ItemType::Other);
        assert_eq!(ItemType::cycle_next(Some(ItemType::Other)), ItemType::Shirt);
        assert_eq!(ItemType::cycle_previous(Some(ItemType::Shirt)), ItemType::Other);
        assert_eq!(ItemType::cycle_next(Some(ItemType::Shoes)), ItemType::SportsGear);
    }

    #[test]
    fn item_serializes_type_under_its_label() {
        let item = Item::from_new(
            "42".to_string(),
            Utc::now(),
            NewItem {
                name: "Ball".to_string(),
                item_type: ItemType::SportsGear,
                description: "Round".to_string(),
                cover_image: String::new(),
                additional_images: vec![],
            },
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Sports Gear");
        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
