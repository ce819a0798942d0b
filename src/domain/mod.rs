//! Domain layer for the Zatalog plugin.
//!
//! Core catalog types, independent of Zellij APIs and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item model, category enum, new-item fields
//! - [`image`]: Image reference encoding (data URIs)

pub mod error;
pub mod image;
pub mod item;

pub use error::{Result, ZatalogError};
pub use item::{Item, ItemType, NewItem, UnknownItemType};
