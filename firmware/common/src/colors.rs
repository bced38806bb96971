//! Theme colors for the bed mesh screen.
//!
//! Display-list commands carry [`Rgb888`] so the deviation gradient keeps its
//! full 8-bit resolution. [`RasterSink`](crate::raster::RasterSink) narrows to
//! `Rgb565` only when pixels are written, using the `From` conversion that
//! `embedded_graphics` provides between RGB formats.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white (255, 255, 255). Button labels.
pub const WHITE: Rgb888 = Rgb888::WHITE;

// =============================================================================
// Theme Colors
// =============================================================================

/// Screen background, cleared on every background pass.
pub const BACKGROUND: Rgb888 = Rgb888::new(0x1E, 0x2D, 0x3A);

/// Enabled text on the background. Also the wireframe color of the live mesh.
pub const TEXT: Rgb888 = Rgb888::new(0xE0, 0xE8, 0xEE);

/// Muted gray for the static skeleton drawn behind the live mesh.
pub const SHADOW: Rgb888 = Rgb888::new(0x44, 0x44, 0x44);

/// Fill for action buttons (the "Back" control).
pub const ACTION_BUTTON: Rgb888 = Rgb888::new(0x2F, 0x7E, 0xC4);

/// Build the deviation color for a sample.
///
/// `pos_byte` is `255 - neg_byte` from
/// [`MeshStats::deviation_bytes`](crate::stats::MeshStats::deviation_bytes).
/// Samples at the mean render white, samples at either extreme render pure blue.
#[inline]
pub const fn deviation_color(pos_byte: u8) -> Rgb888 { Rgb888::new(pos_byte, pos_byte, 0xFF) }

/// Blend `fg` over `bg` with 8-bit coverage `alpha` (255 = opaque).
pub fn blend(
    fg: Rgb888,
    bg: Rgb888,
    alpha: u8,
) -> Rgb888 {
    let a = u16::from(alpha);
    let mix = |f: u8, b: u8| ((u16::from(f) * a + u16::from(b) * (255 - a) + 127) / 255) as u8;
    Rgb888::new(mix(fg.r(), bg.r()), mix(fg.g(), bg.g()), mix(fg.b(), bg.b()))
}

// =============================================================================
// Unit Tests
// =============================================================================
