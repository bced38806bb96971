//! Fake bed prober.
//!
//! Walks the grid in serpentine order (left to right on even rows, right to
//! left on odd rows), spending [`PROBE_FRAMES`] frames on every point. Each
//! probe reports a start, a few intermediate readings while the nozzle
//! descends, and the final height of a synthetic warped bed.

use bed_mesh_common::GridDims;

use crate::timing::{PROBE_FRAMES, PROBE_READINGS};

/// Height where the descent readings start, above the surface (mm).
const APPROACH_HEIGHT: f32 = 0.5;

/// Events produced while probing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ProbeEvent {
    Started { x: u8, y: u8 },
    Progress { x: u8, y: u8, value: f32 },
    Finished { x: u8, y: u8, value: f32 },
}

pub struct FakeProber {
    dims: GridDims,
    next: u16,
    frame: u32,
}

impl FakeProber {
    pub const fn new(dims: GridDims) -> Self {
        Self {
            dims,
            next: 0,
            frame: 0,
        }
    }

    pub fn restart(&mut self) {
        self.next = 0;
        self.frame = 0;
    }

    #[inline]
    pub const fn is_done(&self) -> bool { self.next >= self.dims.point_count() }

    /// Grid point visited at position `index` of the run.
    fn point(
        &self,
        index: u16,
    ) -> (u8, u8) {
        let cols = u16::from(self.dims.cols());
        let y = index / cols;
        let col = index % cols;
        let x = if y % 2 == 0 { col } else { cols - 1 - col };
        (x as u8, y as u8)
    }

    /// Advance one frame.
    pub fn step(&mut self) -> Option<ProbeEvent> {
        if self.is_done() {
            return None;
        }

        let (x, y) = self.point(self.next);
        let height = surface(self.dims, x, y);
        let frame = self.frame;
        self.frame += 1;

        if frame == 0 {
            return Some(ProbeEvent::Started { x, y });
        }

        if frame >= PROBE_FRAMES {
            self.frame = 0;
            self.next += 1;
            return Some(ProbeEvent::Finished { x, y, value: height });
        }

        let interval = PROBE_FRAMES / (PROBE_READINGS + 1);
        if frame % interval == 0 {
            let remaining = 1.0 - frame as f32 / PROBE_FRAMES as f32;
            return Some(ProbeEvent::Progress {
                x,
                y,
                value: height + APPROACH_HEIGHT * remaining,
            });
        }

        None
    }
}

/// Synthetic bed: a slight tilt, a sagging center and a little ripple (mm).
pub fn surface(
    dims: GridDims,
    x: u8,
    y: u8,
) -> f32 {
    let u = f32::from(x) / f32::from(dims.cols() - 1) - 0.5;
    let v = f32::from(y) / f32::from(dims.rows() - 1) - 0.5;
    let tilt = 0.08 * u - 0.05 * v;
    let sag = -0.12 * (1.0 - 4.0 * (u * u + v * v)).max(0.0);
    let ripple = 0.02 * (7.0 * u).sin() * (5.0 * v).cos();
    tilt + sag + ripple
}
