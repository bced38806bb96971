//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Frames between the start of a probe and its result.
pub const PROBE_FRAMES: u32 = 12;

/// Intermediate readings reported while a probe descends.
pub const PROBE_READINGS: u32 = 3;

const _: () = assert!(PROBE_READINGS < PROBE_FRAMES);
