//! Item store: the single source of truth for committed catalog items.
//!
//! # Modules
//!
//! - `backend`: the [`ItemStore`] trait every reader and writer goes through
//! - `memory`: in-memory implementation with an id index
//! - `samples`: starter catalog loaded on plugin start

pub mod backend;
pub mod memory;
pub mod samples;

pub use backend::ItemStore;
pub use memory::MemoryStore;
pub use samples::sample_items;
