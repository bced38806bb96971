//! Bed mesh touch screen simulator for Windows/Desktop.
//!
//! Runs the mesh screen in an `embedded-graphics-simulator` window while a
//! fake prober fills in the bed mesh.
//!
//! # Controls
//!
//! - Mouse press/release: touch, resolved through the screen's tag map
//! - `R`: restart probing
//! - Back button or closing the window: exit
//!
//! Pass `--portrait` to use the portrait layout.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod host;
mod prober;
mod timing;

use std::thread;
use std::time::Instant;

use bed_mesh_common::stats::MeshStats;
use bed_mesh_common::{
    MeshConfig,
    MeshGrid,
    MeshScreen,
    Orientation,
    ProbeState,
    RasterSink,
    RedrawPass,
    ScreenHost,
    TagMap,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::host::SimHost;
use crate::prober::{FakeProber, ProbeEvent};
use crate::timing::FRAME_TIME;

fn main() {
    let config = if std::env::args().any(|arg| arg == "--portrait") {
        MeshConfig::default().with_orientation(Orientation::Portrait)
    } else {
        MeshConfig::default()
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(config.screen);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Bed Mesh Sim", &output_settings);

    let mut grid = MeshGrid::new(config.dims);
    let mut screen = MeshScreen::new(&config);
    let mut prober = FakeProber::new(config.dims);
    let mut host = SimHost::new();
    let mut tags = TagMap::new();
    let mut log_seen = 0u32;

    screen.on_entry();

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    if screen.on_touch_start(tags.hit_test(point)) {
                        host.request_refresh();
                    }
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    screen.on_touch_end(tags.hit_test(point), &mut host);
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if keycode == Keycode::R {
                        grid.reset();
                        prober.restart();
                        screen.on_entry();
                        host.request_refresh();
                    }
                }
                _ => {}
            }
        }

        if host.should_exit() {
            return;
        }

        // Advance the fake probe run
        match prober.step() {
            Some(ProbeEvent::Started { x, y }) => {
                screen.on_sampling_completion(&mut host, x, y, ProbeState::Started);
            }
            Some(ProbeEvent::Progress { x, y, value }) => {
                screen.on_sampling_progress(&mut host, x, y, value);
            }
            Some(ProbeEvent::Finished { x, y, value }) => {
                if let Err(err) = grid.set(x, y, value) {
                    eprintln!("[probe] {err}");
                }
                screen.on_sampling_completion(&mut host, x, y, ProbeState::Finished);
                if prober.is_done() {
                    let stats = MeshStats::compute(&grid);
                    println!(
                        "[probe] done: {} points, mean {:.3}, range {:.3}..{:.3}",
                        stats.count,
                        stats.mean,
                        stats.mean + stats.min,
                        stats.mean + stats.max
                    );
                }
            }
            None => {}
        }

        for line in screen.log().since(log_seen) {
            println!("[mesh] {line}");
        }
        log_seen = screen.log().pushed();

        if host.take_refresh() {
            let mut sink = RasterSink::new(&mut display, &mut tags);
            screen.on_redraw(&mut sink, RedrawPass::ALL, &grid);
        }

        window.update(&display);

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
