//! Error types for the Zatalog plugin.
//!
//! This module defines the centralized error type [`ZatalogError`] and a type alias
//! [`Result`] used throughout the plugin. Errors derive `Error` via `thiserror`.
//!
//! Very little in the catalog can fail: adding an item never errors and a lookup
//! miss is an `Option`, not an error. The variants below cover the edges where
//! real failures exist (reading image files, worker IPC, theme loading) plus
//! caller mistakes such as an out-of-range carousel index.

use thiserror::Error;

/// The main error type for Zatalog operations.
///
/// # Examples
///
/// ```
/// use zatalog::ZatalogError;
///
/// let err = ZatalogError::CarouselIndex { index: 4, len: 3 };
/// assert_eq!(err.to_string(), "Carousel index 4 out of range for 3 images");
/// ```
#[derive(Debug, Error)]
pub enum ZatalogError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps `std::io::Error`, typically from reading an image file in the worker.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Staged bytes are not a recognizable image.
    ///
    /// Only data whose magic bytes match a known image format can be staged.
    #[error("Not an image: {0}")]
    NotAnImage(String),

    /// Image file exceeds the configured size limit.
    #[error("Image too large: {size} bytes (limit {limit})")]
    ImageTooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Configured `max_image_bytes`.
        limit: u64,
    },

    /// A carousel jump targeted a slide that does not exist.
    #[error("Carousel index {index} out of range for {len} images")]
    CarouselIndex {
        /// Requested slide.
        index: usize,
        /// Number of images in the carousel.
        len: usize,
    },

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Zatalog operations.
pub type Result<T> = std::result::Result<T, ZatalogError>;
