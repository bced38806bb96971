//! Coordinate transform from grid space to viewport pixels.
//!
//! Three explicit stages:
//!
//! 1. [`normalize`]: grid `(x, y)` to a unit square centered on the origin.
//! 2. [`skew`]: oblique projection; each row shifts right by `slant` and the
//!    height is folded into the vertical axis.
//! 3. [`Projection::place`]: scale and translate into the viewport.
//!
//! The scale is derived from the skewed corners `(0, 0, 0)` and
//! `(cols, rows, 0)` so their horizontal and vertical spans exactly match the
//! viewport size. [`Projection`] holds those derived values and must be
//! rebuilt whenever the viewport or the grid changes.

use embedded_graphics::geometry::Point;
use embedded_graphics::primitives::Rectangle;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::grid::GridDims;

/// Map grid coordinates to `[-0.5, 0.5]` over the grid (first to last point).
#[inline]
pub fn normalize(
    dims: GridDims,
    x: f32,
    y: f32,
) -> (f32, f32) {
    (
        x / f32::from(dims.cols() - 1) - 0.5,
        y / f32::from(dims.rows() - 1) - 0.5,
    )
}

/// Oblique projection of a normalized point at height `z`.
#[inline]
pub fn skew(
    nx: f32,
    ny: f32,
    z: f32,
    slant: f32,
) -> (f32, f32) {
    (nx + ny * slant, ny - z)
}

/// Viewport placement derived for one grid and one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    dims: GridDims,
    slant: f32,
    bounds_min: (f32, f32),
    bounds_max: (f32, f32),
    scale_x: f32,
    scale_y: f32,
    center_x: f32,
    center_y: f32,
}

impl Projection {
    pub fn new(
        dims: GridDims,
        viewport: Rectangle,
        slant: f32,
    ) -> Self {
        let skewed = |x: f32, y: f32| {
            let (nx, ny) = normalize(dims, x, y);
            skew(nx, ny, 0.0, slant)
        };
        let bounds_min = skewed(0.0, 0.0);
        let bounds_max = skewed(f32::from(dims.cols()), f32::from(dims.rows()));

        let width = viewport.size.width as f32;
        let height = viewport.size.height as f32;

        Self {
            dims,
            slant,
            bounds_min,
            bounds_max,
            scale_x: width / (bounds_max.0 - bounds_min.0),
            scale_y: height / (bounds_max.1 - bounds_min.1),
            // Integer half size, as the layout grid works in whole pixels.
            center_x: (viewport.top_left.x + (viewport.size.width / 2) as i32) as f32,
            center_y: (viewport.top_left.y + (viewport.size.height / 2) as i32) as f32,
        }
    }

    /// Skewed position of grid corner `(0, 0, 0)`.
    #[inline]
    pub const fn bounds_min(&self) -> (f32, f32) { self.bounds_min }

    /// Skewed position of grid corner `(cols, rows, 0)`.
    #[inline]
    pub const fn bounds_max(&self) -> (f32, f32) { self.bounds_max }

    #[inline]
    pub const fn scale_x(&self) -> f32 { self.scale_x }

    #[inline]
    pub const fn scale_y(&self) -> f32 { self.scale_y }

    #[inline]
    pub const fn center(&self) -> (f32, f32) { (self.center_x, self.center_y) }

    /// Point size unit that looks the same across aspect ratios and grid densities.
    pub fn base_point_size(&self) -> f32 {
        let longest = f32::from(self.dims.cols().max(self.dims.rows()));
        self.scale_x.min(self.scale_y) / longest
    }

    /// Stage 3: scale and translate a skewed point into the viewport.
    #[inline]
    pub fn place(
        &self,
        px: f32,
        py: f32,
    ) -> (f32, f32) {
        (self.center_x + px * self.scale_x, self.center_y + py * self.scale_y)
    }

    /// Full pipeline for grid point `(x, y)` at scaled height `z`.
    pub fn transform(
        &self,
        x: f32,
        y: f32,
        z: f32,
    ) -> (f32, f32) {
        let (nx, ny) = normalize(self.dims, x, y);
        let (px, py) = skew(nx, ny, z, self.slant);
        self.place(px, py)
    }

    /// [`transform`](Self::transform) rounded to the nearest pixel.
    pub fn to_point(
        &self,
        x: u8,
        y: u8,
        z: f32,
    ) -> Point {
        let (sx, sy) = self.transform(f32::from(x), f32::from(y), z);
        Point::new(sx.round() as i32, sy.round() as i32)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
