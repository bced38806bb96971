//! Widget placement on a coarse cell grid.
//!
//! The screen is split into equal cells (5x5 in landscape, 2x10 in portrait).
//! Widgets are placed at a 1-based `(col, row)` cell and span `(w, h)` cells,
//! inset by [`LAYOUT_MARGIN`] on every side so neighbours never touch.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::config::{LAYOUT_MARGIN, Orientation};

/// Cell grid of one orientation: `(cols, rows)`.
pub const fn cell_grid(orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Landscape => (5, 5),
        Orientation::Portrait => (2, 10),
    }
}

/// Rectangle covering cells `(col, row)` to `(col + w - 1, row + h - 1)`, 1-based.
pub fn cell_rect(
    screen: Size,
    grid: (u32, u32),
    col: u32,
    row: u32,
    w: u32,
    h: u32,
) -> Rectangle {
    let (cols, rows) = grid;
    let x = (col - 1) * screen.width / cols;
    let y = (row - 1) * screen.height / rows;
    let width = w * screen.width / cols;
    let height = h * screen.height / rows;
    Rectangle::new(
        Point::new((x + LAYOUT_MARGIN) as i32, (y + LAYOUT_MARGIN) as i32),
        Size::new(
            width.saturating_sub(2 * LAYOUT_MARGIN),
            height.saturating_sub(2 * LAYOUT_MARGIN),
        ),
    )
}

/// Areas of every widget on the mesh screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScreenLayout {
    /// Viewport of the mesh projection.
    pub mesh: Rectangle,
    /// "Z Value" caption.
    pub z_label: Rectangle,
    /// Height readout of the highlighted point.
    pub z_value: Rectangle,
    /// Back button.
    pub back: Rectangle,
}

impl ScreenLayout {
    pub fn new(
        orientation: Orientation,
        screen: Size,
    ) -> Self {
        let grid = cell_grid(orientation);
        let at = |col, row, w, h| cell_rect(screen, grid, col, row, w, h);
        match orientation {
            Orientation::Landscape => Self {
                mesh: at(2, 1, 4, 5),
                z_label: at(1, 3, 1, 1),
                z_value: at(1, 4, 2, 1),
                back: at(1, 5, 2, 1),
            },
            Orientation::Portrait => Self {
                mesh: at(1, 2, 2, 5),
                z_label: at(1, 8, 1, 1),
                z_value: at(2, 8, 1, 1),
                back: at(1, 10, 2, 1),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
