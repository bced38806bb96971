//! Bed mesh visualization and touch picking for printer touch screens.
//!
//! This crate contains platform-agnostic code shared between the desktop
//! simulator and display firmware:
//!
//! - [`grid`]: Grid dimensions and the point/tag bijection
//! - [`transform`]: Normalize, skew and viewport placement
//! - [`stats`]: Autoscale statistics and deviation colors
//! - [`mesh`]: Sample source trait and a fixed-capacity grid store
//! - [`plot`]: Layered mesh renderer
//! - [`screen`]: Screen state machine driven by touch and probe events
//! - [`sink`]: Display-list command interface
//! - [`display_list`]: Recording sink
//! - [`raster`]: `embedded-graphics` sink and hit-test map
//! - [`layout`]: Widget placement on the cell grid
//! - [`config`]: Screen and mesh configuration
//! - [`log`]: Event ring buffer
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Tests run on the host with `std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
pub mod log;

pub mod colors;
pub mod config;
pub mod display_list;
pub mod error;
pub mod grid;
pub mod layout;
pub mod mesh;
pub mod options;
pub mod plot;
pub mod raster;
pub mod screen;
pub mod sink;
pub mod stats;
pub mod styles;
pub mod transform;

// Re-export commonly used items
pub use config::{MeshConfig, Orientation};
pub use error::MeshError;
pub use grid::{GridDims, TAG_BACK, TAG_NONE};
pub use mesh::{MeshGrid, MeshSource};
pub use options::{DrawOptions, RedrawPass};
pub use plot::MeshPlot;
pub use raster::{RasterSink, TagMap};
pub use screen::{MeshScreen, ProbeState, ScreenHost};
pub use sink::{DisplaySink, Primitive};
