//! Grid addressing: the mapping between probe grid coordinates and touch tags.
//!
//! Touch hit-testing reports a single `u8` tag. Tags below
//! [`GRID_TAG_BASE`] belong to fixed controls:
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | 0 | Nothing selected |
//! | 1 | Back button |
//! | 10.. | Grid point `y * cols + x + 10` |
//!
//! The mapping is a bijection over the grid, so
//! `tag_to_point(point_to_tag(x, y)) == Some((x, y))` for every in-range point.

use crate::config::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, GRID_TAG_BASE, MAX_GRID_POINTS};
use crate::error::MeshError;

/// Tag meaning "no selection".
pub const TAG_NONE: u8 = 0;

/// Tag bound to the back button.
pub const TAG_BACK: u8 = 1;

/// Validated probe grid dimensions.
///
/// Both sides are at least 2 and the grid has at most
/// [`MAX_GRID_POINTS`] points.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridDims {
    cols: u8,
    rows: u8,
}

impl GridDims {
    /// The 5x5 grid most printers probe by default.
    pub const DEFAULT: Self = Self {
        cols: DEFAULT_GRID_COLS,
        rows: DEFAULT_GRID_ROWS,
    };

    pub const fn new(
        cols: u8,
        rows: u8,
    ) -> Result<Self, MeshError> {
        if cols < 2 || rows < 2 {
            return Err(MeshError::GridTooSmall { cols, rows });
        }
        let points = cols as u16 * rows as u16;
        if (points as usize) > MAX_GRID_POINTS {
            return Err(MeshError::TooManyPoints { points });
        }
        Ok(Self { cols, rows })
    }

    #[inline]
    pub const fn cols(self) -> u8 { self.cols }

    #[inline]
    pub const fn rows(self) -> u8 { self.rows }

    /// Total number of grid points.
    #[inline]
    pub const fn point_count(self) -> u16 { self.cols as u16 * self.rows as u16 }

    #[inline]
    pub const fn contains(
        self,
        x: u8,
        y: u8,
    ) -> bool {
        x < self.cols && y < self.rows
    }

    /// Row-major index of a point, the layout used by [`MeshGrid`](crate::mesh::MeshGrid).
    #[inline]
    pub const fn index(
        self,
        x: u8,
        y: u8,
    ) -> usize {
        y as usize * self.cols as usize + x as usize
    }

    /// Tag for grid point `(x, y)`.
    ///
    /// The point must be inside the grid; this is checked in debug builds only.
    /// Use [`try_point_to_tag`](Self::try_point_to_tag) for external input.
    #[inline]
    pub fn point_to_tag(
        self,
        x: u8,
        y: u8,
    ) -> u8 {
        debug_assert!(self.contains(x, y), "grid point out of range");
        // Fits: point_count() <= MAX_GRID_POINTS = 255 - GRID_TAG_BASE.
        self.index(x, y) as u8 + GRID_TAG_BASE
    }

    /// Checked variant of [`point_to_tag`](Self::point_to_tag).
    pub fn try_point_to_tag(
        self,
        x: u8,
        y: u8,
    ) -> Option<u8> {
        self.contains(x, y).then(|| self.point_to_tag(x, y))
    }

    /// Grid point addressed by `tag`.
    ///
    /// Returns `None` for control tags (0, 1, ...) and for tags past the last
    /// grid point, so callers never invert a tag that addresses nothing.
    pub fn tag_to_point(
        self,
        tag: u8,
    ) -> Option<(u8, u8)> {
        let offset = u16::from(tag.checked_sub(GRID_TAG_BASE)?);
        if offset >= self.point_count() {
            return None;
        }
        let cols = u16::from(self.cols);
        Some(((offset % cols) as u8, (offset / cols) as u8))
    }

    /// Whether `tag` addresses a grid point.
    #[inline]
    pub fn is_point_tag(
        self,
        tag: u8,
    ) -> bool {
        self.tag_to_point(tag).is_some()
    }

    /// Iterate all points in row-major order.
    pub fn points(self) -> impl Iterator<Item = (u8, u8)> {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| (x, y)))
    }
}

impl Default for GridDims {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Unit Tests
// =============================================================================
