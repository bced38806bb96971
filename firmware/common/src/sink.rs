//! Graphics command sink.
//!
//! The renderer emits an ordered display list in the style of FTDI EVE
//! coprocessors: state changes (color, alpha, point size, tag, masks), a
//! context stack, and primitives built from `begin` / `vertex` / `end`.
//! Implementations decide what the commands mean on a concrete display:
//!
//! - [`DisplayList`](crate::display_list::DisplayList) records them.
//! - [`RasterSink`](crate::raster::RasterSink) draws them onto an
//!   `embedded_graphics` target and fills a hit-test [`TagMap`](crate::raster::TagMap).
//!
//! # Context
//!
//! The graphics context holds color, alpha, point size, current tag, tag mask
//! and color mask. `save_context` pushes it, `restore_context` pops it.
//! A vertex emitted while the tag mask is on registers the current tag for
//! hit-testing; a vertex emitted while the color mask is off draws nothing.

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;

/// Primitive assembled from the vertices between `begin` and `end`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primitive {
    /// One filled disc per vertex, radius from `point_size`.
    Points,
    /// Connected 1 px segments between consecutive vertices.
    LineStrip,
}

/// Consumer of display-list commands.
pub trait DisplaySink {
    /// Fill the whole screen and forget every hit-test region.
    fn clear(
        &mut self,
        color: Rgb888,
    );

    fn save_context(&mut self);

    fn restore_context(&mut self);

    fn color_rgb(
        &mut self,
        color: Rgb888,
    );

    /// Coverage for subsequent primitives, 255 = opaque.
    fn color_alpha(
        &mut self,
        alpha: u8,
    );

    /// Point radius in pixels.
    fn point_size(
        &mut self,
        radius: f32,
    );

    /// Enable or disable writes to the hit-test buffer.
    fn tag_mask(
        &mut self,
        enabled: bool,
    );

    /// Enable or disable writes to the color buffer.
    fn color_mask(
        &mut self,
        enabled: bool,
    );

    /// Tag attached to subsequent vertices, text and buttons.
    fn tag(
        &mut self,
        tag: u8,
    );

    fn begin(
        &mut self,
        primitive: Primitive,
    );

    fn vertex(
        &mut self,
        point: Point,
    );

    fn end(&mut self);

    /// Label centered in `area`, in the current color.
    fn text(
        &mut self,
        area: Rectangle,
        label: &str,
    );

    /// Filled button with a centered label, in the current color.
    fn button(
        &mut self,
        area: Rectangle,
        label: &str,
    );
}
