//! Text styles for the raster backend.
//!
//! Labels are centered both ways inside their layout cell, so one alignment
//! style covers every text and button label on the screen.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_12_POINT;

/// Centered horizontally on the anchor, vertically on the glyph middle.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Font for readouts and button labels (`ProFont` 12pt).
/// Usage: `MonoTextStyle::new(LABEL_FONT, color)`
pub const LABEL_FONT: &MonoFont = &PROFONT_12_POINT;
