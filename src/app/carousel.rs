//! Image carousel cursor.
//!
//! A [`Carousel`] is a single position into an item's image sequence, created
//! when a detail view opens and dropped when it closes. Navigation wraps in both
//! directions.
//!
//! # States
//!
//! - **empty** (`n = 0`): no carousel exists; [`Carousel::open`] returns `None`
//! - **single** (`n = 1`): cursor fixed at 0; navigation is hidden and every
//!   transition lands back on 0
//! - **multi** (`n > 1`): cursor anywhere in `0..n`
//!
//! # Example
//!
//! ```
//! use zatalog::app::Carousel;
//!
//! let mut carousel = Carousel::open(3).unwrap();
//! carousel.next();
//! carousel.next();
//! carousel.previous();
//! assert_eq!(carousel.index(), 1);
//!
//! assert!(Carousel::open(0).is_none());
//! ```

use crate::domain::error::{Result, ZatalogError};

/// Cursor into a non-empty image sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// Opens a carousel over `len` images with the cursor on the first one.
    ///
    /// Returns `None` for an empty sequence: nothing is rendered and no
    /// transitions exist.
    #[must_use]
    pub const fn open(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { len, index: 0 })
        }
    }

    /// Current position, always in `0..len`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of images.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false; an empty sequence has no carousel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether previous/next arrows and indicator dots should be shown.
    #[must_use]
    pub const fn shows_navigation(&self) -> bool {
        self.len > 1
    }

    /// Advances one slide, wrapping from the last to the first.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    /// Goes back one slide, wrapping from the first to the last.
    pub fn previous(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Jumps directly to slide `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ZatalogError::CarouselIndex`] when `index >= len`. The cursor
    /// does not move.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(ZatalogError::CarouselIndex {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_n_times_returns_to_start() {
        for n in 1..=7 {
            let mut c = Carousel::open(n).unwrap();
            c.go_to(n / 2).unwrap();
            let start = c.index();
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.index(), start, "cycle failed for n = {n}");
        }
    }

    #[test]
    fn previous_inverts_next() {
        let mut c = Carousel::open(5).unwrap();
        for start in 0..5 {
            c.go_to(start).unwrap();
            c.next();
            c.previous();
            assert_eq!(c.index(), start);
            c.previous();
            c.next();
            assert_eq!(c.index(), start);
        }
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut c = Carousel::open(4).unwrap();
        c.previous();
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn single_image_stays_put() {
        let mut c = Carousel::open(1).unwrap();
        assert!(!c.shows_navigation());
        c.next();
        assert_eq!(c.index(), 0);
        c.previous();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn scenario_next_next_previous() {
        let mut c = Carousel::open(3).unwrap();
        let mut seen = vec![c.index()];
        c.next();
        seen.push(c.index());
        c.next();
        seen.push(c.index());
        c.previous();
        seen.push(c.index());
        assert_eq!(seen, [0, 1, 2, 1]);
    }

    #[test]
    fn go_to_out_of_range_leaves_cursor() {
        let mut c = Carousel::open(3).unwrap();
        c.go_to(2).unwrap();
        let err = c.go_to(3).unwrap_err();
        assert!(matches!(err, ZatalogError::CarouselIndex { index: 3, len: 3 }));
        assert_eq!(c.index(), 2);
    }
}
