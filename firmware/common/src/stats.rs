//! Autoscale statistics and the deviation color gradient.
//!
//! One pass over the grid collects mean, min, max and the number of set
//! samples. Unset samples are skipped. `min` and `max` are stored relative to
//! the mean, so `min <= 0 <= max` whenever at least one sample exists.
//!
//! The height scale maps the full deviation range onto [`Z_EXCURSION`] of the
//! normalized viewport, keeping the projection legible for any value range.

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::deviation_color;
use crate::config::Z_EXCURSION;
use crate::mesh::MeshSource;

/// Statistics over the set samples of one grid.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeshStats {
    /// Mean of all set samples.
    pub mean: f32,
    /// Smallest sample minus the mean.
    pub min: f32,
    /// Largest sample minus the mean.
    pub max: f32,
    /// Number of set samples.
    pub count: u16,
}

impl MeshStats {
    /// Statistics for a grid with no set samples.
    pub const EMPTY: Self = Self {
        mean: 0.0,
        min: 0.0,
        max: 0.0,
        count: 0,
    };

    /// Single pass over every grid point.
    pub fn compute(mesh: &dyn MeshSource) -> Self {
        let dims = mesh.dims();
        let mut sum = 0.0f32;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut count = 0u16;

        for (x, y) in dims.points() {
            if let Some(value) = mesh.value(x, y) {
                sum += value;
                min = min.min(value);
                max = max.max(value);
                count += 1;
            }
        }

        if count == 0 {
            return Self::EMPTY;
        }

        let mean = sum / f32::from(count);
        Self {
            mean,
            min: min - mean,
            max: max - mean,
            count,
        }
    }

    /// Height scale applied to raw sample values.
    ///
    /// Falls back to a unit range when every sample is equal (or there are
    /// none), so the result is always finite and positive.
    pub fn scale_z(&self) -> f32 {
        let range = if self.max == self.min { 1.0 } else { 1.0 / (self.max - self.min) };
        range * Z_EXCURSION
    }

    /// Gradient bytes `(neg_byte, pos_byte)` for a sample.
    ///
    /// `neg_byte` grows with the squared deviation relative to the squared
    /// extreme on the same side of the mean and is clamped to `0..=255`.
    /// A zero extreme yields `neg_byte = 0` rather than dividing by zero.
    pub fn deviation_bytes(
        &self,
        value: f32,
    ) -> (u8, u8) {
        let dev = value - self.mean;
        let extreme = if dev < 0.0 { self.min } else { self.max };
        let neg = if extreme == 0.0 {
            0.0
        } else {
            (dev * dev) / (extreme * extreme) * 255.0
        };
        let neg_byte = if neg.is_nan() { 0 } else { neg.clamp(0.0, 255.0) as u8 };
        (neg_byte, 255 - neg_byte)
    }

    /// Display color for a sample: white at the mean, blue at the extremes.
    pub fn deviation_color(
        &self,
        value: f32,
    ) -> Rgb888 {
        deviation_color(self.deviation_bytes(value).1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
