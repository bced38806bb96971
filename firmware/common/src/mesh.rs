//! Sample store: read access to the probed heights.
//!
//! The acquisition side owns the data and writes into it; the renderer and
//! the screen only ever read through [`MeshSource`].

use heapless::Vec;

use crate::config::MAX_GRID_POINTS;
use crate::error::MeshError;
use crate::grid::GridDims;

/// Read-only view of a grid of optional height samples.
pub trait MeshSource {
    /// Dimensions of the grid.
    fn dims(&self) -> GridDims;

    /// Sample at `(x, y)`, or `None` when unset or out of range.
    fn value(
        &self,
        x: u8,
        y: u8,
    ) -> Option<f32>;
}

/// Fixed-capacity grid of height samples.
///
/// Unset samples are stored as NaN and surfaced as `None`.
#[derive(Clone, Debug)]
pub struct MeshGrid {
    dims: GridDims,
    samples: Vec<f32, MAX_GRID_POINTS>,
}

impl MeshGrid {
    /// Create a grid with every sample unset.
    pub fn new(dims: GridDims) -> Self {
        let mut samples = Vec::new();
        // GridDims guarantees point_count() <= MAX_GRID_POINTS.
        samples.resize(usize::from(dims.point_count()), f32::NAN).ok();
        Self { dims, samples }
    }

    /// Build a grid from row-major samples; `None` entries stay unset.
    pub fn from_rows(
        dims: GridDims,
        rows: &[&[Option<f32>]],
    ) -> Result<Self, MeshError> {
        let mut grid = Self::new(dims);
        for (y, row) in rows.iter().enumerate() {
            for (x, sample) in row.iter().enumerate() {
                if let Some(value) = sample {
                    grid.set(x as u8, y as u8, *value)?;
                }
            }
        }
        Ok(grid)
    }

    /// Store a sample. Non-finite values leave the point unset.
    pub fn set(
        &mut self,
        x: u8,
        y: u8,
        value: f32,
    ) -> Result<(), MeshError> {
        if !self.dims.contains(x, y) {
            return Err(MeshError::OutOfBounds { x, y });
        }
        self.samples[self.dims.index(x, y)] = if value.is_finite() { value } else { f32::NAN };
        Ok(())
    }

    /// Mark a sample as unset.
    pub fn clear_point(
        &mut self,
        x: u8,
        y: u8,
    ) -> Result<(), MeshError> {
        self.set(x, y, f32::NAN)
    }

    /// Mark every sample as unset.
    pub fn reset(&mut self) {
        for sample in self.samples.iter_mut() {
            *sample = f32::NAN;
        }
    }

    /// Number of samples that hold a value.
    pub fn valid_count(&self) -> u16 { self.samples.iter().filter(|v| !v.is_nan()).count() as u16 }
}

impl MeshSource for MeshGrid {
    fn dims(&self) -> GridDims { self.dims }

    fn value(
        &self,
        x: u8,
        y: u8,
    ) -> Option<f32> {
        if !self.dims.contains(x, y) {
            return None;
        }
        let value = self.samples[self.dims.index(x, y)];
        (!value.is_nan()).then_some(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unset() {
        let grid = MeshGrid::new(GridDims::DEFAULT);
        assert_eq!(grid.valid_count(), 0, "Fresh grid should have no samples");
        assert_eq!(grid.value(0, 0), None);
        assert_eq!(grid.value(4, 4), None);
    }

    #[test]
    fn test_set_and_read_back() {
        let mut grid = MeshGrid::new(GridDims::DEFAULT);
        grid.set(2, 1, 0.125).unwrap();
        assert_eq!(grid.value(2, 1), Some(0.125));
        assert_eq!(grid.value(1, 2), None, "Axes must not be swapped");
        assert_eq!(grid.valid_count(), 1);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = MeshGrid::new(GridDims::DEFAULT);
        assert_eq!(grid.set(5, 0, 1.0), Err(MeshError::OutOfBounds { x: 5, y: 0 }));
        assert_eq!(grid.value(5, 0), None, "Out of range reads are unset");
    }

    #[test]
    fn test_non_finite_values_stay_unset() {
        let mut grid = MeshGrid::new(GridDims::DEFAULT);
        grid.set(0, 0, f32::INFINITY).unwrap();
        grid.set(1, 0, f32::NAN).unwrap();
        assert_eq!(grid.valid_count(), 0);
    }

    #[test]
    fn test_clear_point_and_reset() {
        let mut grid = MeshGrid::new(GridDims::DEFAULT);
        grid.set(0, 0, 0.1).unwrap();
        grid.set(1, 1, 0.2).unwrap();
        grid.clear_point(0, 0).unwrap();
        assert_eq!(grid.value(0, 0), None);
        assert_eq!(grid.valid_count(), 1);

        grid.reset();
        assert_eq!(grid.valid_count(), 0, "Reset should unset everything");
    }

    #[test]
    fn test_from_rows() {
        let dims = GridDims::new(3, 2).unwrap();
        let grid = MeshGrid::from_rows(dims, &[&[Some(0.1), None, Some(0.3)], &[None, Some(0.5), None]]).unwrap();
        assert_eq!(grid.value(0, 0), Some(0.1));
        assert_eq!(grid.value(1, 0), None);
        assert_eq!(grid.value(2, 0), Some(0.3));
        assert_eq!(grid.value(1, 1), Some(0.5));
        assert_eq!(grid.valid_count(), 3);
    }
}
