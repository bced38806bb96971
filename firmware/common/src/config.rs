//! Screen and mesh configuration.
//!
//! Fixed values are compile-time constants validated with `const` assertions.
//! Grid dimensions are not: they are injected through [`MeshConfig`] so the
//! same code drives any printer's probing grid.

use embedded_graphics::geometry::Size;

use crate::error::MeshError;
use crate::grid::GridDims;

// =============================================================================
// Display Configuration
// =============================================================================

/// Landscape panel width in pixels (FTDI EVE 4.3" class display).
pub const SCREEN_WIDTH: u32 = 480;

/// Landscape panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 272;

/// Gap between cells of the widget layout grid, in pixels.
pub const LAYOUT_MARGIN: u32 = 5;

// =============================================================================
// Mesh Configuration
// =============================================================================

/// Default probing grid columns.
pub const DEFAULT_GRID_COLS: u8 = 5;

/// Default probing grid rows.
pub const DEFAULT_GRID_ROWS: u8 = 5;

/// Horizontal shear applied per unit of normalized row, faking an oblique view.
pub const DEFAULT_SLANT: f32 = 0.5;

/// Identifier of the first grid point. Lower identifiers belong to controls.
pub const GRID_TAG_BASE: u8 = 10;

/// Largest grid whose identifiers still fit in a `u8`.
pub const MAX_GRID_POINTS: usize = (u8::MAX - GRID_TAG_BASE) as usize;

/// Fraction of the viewport the autoscaled height excursion may use.
pub const Z_EXCURSION: f32 = 0.1;

const _: () = assert!(DEFAULT_GRID_COLS >= 2 && DEFAULT_GRID_ROWS >= 2);
const _: () = assert!(DEFAULT_GRID_COLS as usize * DEFAULT_GRID_ROWS as usize <= MAX_GRID_POINTS);

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Panel orientation. Selects the widget layout grid.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// 5x5 layout cells, mesh on the right four columns.
    #[default]
    Landscape,
    /// 2x10 layout cells, mesh in the upper half.
    Portrait,
}

impl Orientation {
    /// Native panel size for this orientation.
    pub const fn screen_size(self) -> Size {
        match self {
            Self::Landscape => Size::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            Self::Portrait => Size::new(SCREEN_HEIGHT, SCREEN_WIDTH),
        }
    }
}

/// Everything the mesh screen needs to know up front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshConfig {
    pub dims: GridDims,
    pub slant: f32,
    pub orientation: Orientation,
    pub screen: Size,
}

impl MeshConfig {
    /// Configuration for a `cols` x `rows` grid with default look and layout.
    pub fn new(
        cols: u8,
        rows: u8,
    ) -> Result<Self, MeshError> {
        Ok(Self {
            dims: GridDims::new(cols, rows)?,
            ..Self::default()
        })
    }

    /// Switch orientation, resetting the screen size to the panel's native one.
    #[must_use]
    pub const fn with_orientation(
        mut self,
        orientation: Orientation,
    ) -> Self {
        self.orientation = orientation;
        self.screen = orientation.screen_size();
        self
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            dims: GridDims::DEFAULT,
            slant: DEFAULT_SLANT,
            orientation: Orientation::Landscape,
            screen: Orientation::Landscape.screen_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MeshConfig::default();
        assert_eq!(config.dims.cols(), DEFAULT_GRID_COLS);
        assert_eq!(config.dims.rows(), DEFAULT_GRID_ROWS);
        assert_eq!(config.slant, DEFAULT_SLANT);
        assert_eq!(config.screen, Size::new(480, 272));
    }

    #[test]
    fn test_config_rejects_bad_grid() {
        assert_eq!(
            MeshConfig::new(1, 5),
            Err(MeshError::GridTooSmall { cols: 1, rows: 5 }),
            "Single-column grid cannot be normalized"
        );
    }

    #[test]
    fn test_with_orientation_swaps_screen() {
        let config = MeshConfig::default().with_orientation(Orientation::Portrait);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.screen, Size::new(272, 480), "Portrait panel is rotated");
    }

    #[test]
    fn test_max_grid_points() {
        assert_eq!(MAX_GRID_POINTS, 245, "Tags 10..=254 address grid points");
    }
}
