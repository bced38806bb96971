//! Error type for grid configuration and the sample store.
//!
//! Rendering and event handling never fail; only building a grid or writing
//! into a [`MeshGrid`](crate::mesh::MeshGrid) can be rejected.

use thiserror::Error;

/// Errors raised while configuring a grid or storing samples.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeshError {
    /// Normalization divides by `cols - 1` and `rows - 1`.
    #[error("grid {cols}x{rows} is too small, need at least 2x2")]
    GridTooSmall { cols: u8, rows: u8 },

    /// Grid identifiers are `u8` and start at 10.
    #[error("grid has {points} points, at most 245 fit in a u8 tag")]
    TooManyPoints { points: u16 },

    #[error("point ({x}, {y}) is outside the grid")]
    OutOfBounds { x: u8, y: u8 },
}
