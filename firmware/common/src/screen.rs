//! Bed mesh screen: interaction state and redraw orchestration.
//!
//! # State
//!
//! | Field | Reset on entry | Changed by |
//! |-------|----------------|------------|
//! | `highlighted` | 0 | touch start, probe finished |
//! | `completed` | 0 | probe finished |
//!
//! # Events
//!
//! - **Touch start** on any tag highlights it.
//! - **Touch end** on the back button navigates back; any other tag is left
//!   to the caller.
//! - **Sampling progress** requests a refresh while the screen is active.
//! - **Sampling completion** with [`ProbeState::Finished`] highlights the
//!   probed point and counts it, then is handled as progress.
//!
//! The screen never owns the samples. Every redraw reads them through
//! [`MeshSource`], and navigation and refresh go through [`ScreenHost`].

use core::fmt::Write;

use heapless::String;

use crate::colors::{ACTION_BUTTON, BACKGROUND, SHADOW, TEXT};
use crate::config::MeshConfig;
use crate::grid::{GridDims, TAG_BACK, TAG_NONE};
use crate::layout::ScreenLayout;
use crate::log::EventLog;
use crate::mesh::MeshSource;
use crate::options::{DrawOptions, RedrawPass};
use crate::plot::MeshPlot;
use crate::sink::DisplaySink;

/// Caption above the height readout.
pub const Z_LABEL: &str = "Z Value";

/// Readout shown when the highlighted point has no sample.
pub const NO_VALUE: &str = "-";

/// Readout buffer size. Any finite `f32` fits at three decimals.
pub const READOUT_LENGTH: usize = 48;

/// Back button label.
pub const BACK_LABEL: &str = "Back";

/// Services the screen needs from whoever dispatches its events.
pub trait ScreenHost {
    /// Whether this screen is the one currently shown.
    fn is_active(&self) -> bool;

    /// Schedule a redraw of the active screen.
    fn request_refresh(&mut self);

    /// Return to the previous screen.
    fn go_back(&mut self);
}

/// Probe status reported with a completion event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeState {
    Started,
    Finished,
}

/// State and rendering of the bed mesh screen.
#[derive(Clone, Debug)]
pub struct MeshScreen {
    dims: GridDims,
    layout: ScreenLayout,
    plot: MeshPlot,
    highlighted: u8,
    completed: u16,
    log: EventLog,
}

impl MeshScreen {
    pub fn new(config: &MeshConfig) -> Self {
        let layout = ScreenLayout::new(config.orientation, config.screen);
        Self {
            dims: config.dims,
            layout,
            plot: MeshPlot::new(config.dims, layout.mesh, config.slant),
            highlighted: TAG_NONE,
            completed: 0,
            log: EventLog::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Highlighted tag, 0 when nothing is selected.
    #[inline]
    pub const fn highlighted(&self) -> u8 { self.highlighted }

    /// Finished probe events since entry.
    #[inline]
    pub const fn completed(&self) -> u16 { self.completed }

    /// Whether every grid point has reported back.
    #[inline]
    pub const fn is_complete(&self) -> bool { self.completed >= self.dims.point_count() }

    #[inline]
    pub const fn dims(&self) -> GridDims { self.dims }

    #[inline]
    pub const fn layout(&self) -> &ScreenLayout { &self.layout }

    #[inline]
    pub const fn plot(&self) -> &MeshPlot { &self.plot }

    #[inline]
    pub const fn log(&self) -> &EventLog { &self.log }

    /// Sample under the highlight, `None` when no grid point is highlighted
    /// or the point has no sample yet.
    pub fn highlighted_value(
        &self,
        mesh: &dyn MeshSource,
    ) -> Option<f32> {
        let (x, y) = self.dims.tag_to_point(self.highlighted)?;
        mesh.value(x, y)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn on_entry(&mut self) {
        self.highlighted = TAG_NONE;
        self.completed = 0;
        log_event!(self.log, "mesh screen entered");
    }

    /// Draw the requested layers.
    ///
    /// The background layer ends by selecting the text color, which the
    /// foreground wireframe then uses, so both layers are normally drawn in
    /// one frame.
    pub fn on_redraw(
        &self,
        sink: &mut impl DisplaySink,
        pass: RedrawPass,
        mesh: &dyn MeshSource,
    ) {
        if pass.contains(RedrawPass::BACKGROUND) {
            sink.clear(BACKGROUND);
            sink.color_rgb(SHADOW);
            self.plot.draw(sink, None, DrawOptions::POINTS | DrawOptions::TAGS, TAG_NONE);
            sink.color_rgb(TEXT);
        }

        if pass.contains(RedrawPass::FOREGROUND) {
            let complete = self.is_complete();
            if complete {
                self.draw_readout(sink, mesh);
            }
            let opts = (DrawOptions::POINTS | DrawOptions::HIGHLIGHT | DrawOptions::AUTOSCALE)
                .with_if(DrawOptions::COLORS, complete);
            self.plot.draw(sink, Some(mesh), opts, self.highlighted);
        }
    }

    fn draw_readout(
        &self,
        sink: &mut impl DisplaySink,
        mesh: &dyn MeshSource,
    ) {
        let mut value: String<READOUT_LENGTH> = String::new();
        match self.highlighted_value(mesh) {
            Some(z) => write!(value, "{z:5.3}").ok(),
            None => value.push_str(NO_VALUE).ok(),
        };

        sink.text(self.layout.z_label, Z_LABEL);
        sink.text(self.layout.z_value, &value);

        sink.save_context();
        sink.color_rgb(ACTION_BUTTON);
        sink.tag(TAG_BACK);
        sink.button(self.layout.back, BACK_LABEL);
        sink.tag(TAG_NONE);
        sink.restore_context();
    }

    // =========================================================================
    // Touch
    // =========================================================================

    /// Highlight `tag`. Always handled.
    pub fn on_touch_start(
        &mut self,
        tag: u8,
    ) -> bool {
        self.highlighted = tag;
        log_event!(self.log, "touch start {}", tag);
        true
    }

    /// Returns `true` only for the back button.
    pub fn on_touch_end(
        &mut self,
        tag: u8,
        host: &mut impl ScreenHost,
    ) -> bool {
        match tag {
            TAG_BACK => {
                log_event!(self.log, "back");
                host.go_back();
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// An intermediate reading at `(x, y)`.
    pub fn on_sampling_progress(
        &mut self,
        host: &mut impl ScreenHost,
        _x: u8,
        _y: u8,
        _value: f32,
    ) {
        if host.is_active() {
            host.request_refresh();
        }
    }

    /// A probe at `(x, y)` changed state.
    pub fn on_sampling_completion(
        &mut self,
        host: &mut impl ScreenHost,
        x: u8,
        y: u8,
        state: ProbeState,
    ) {
        if state == ProbeState::Finished {
            match self.dims.try_point_to_tag(x, y) {
                Some(tag) => {
                    self.highlighted = tag;
                    self.completed = self.completed.saturating_add(1);
                    log_event!(self.log, "probed {},{} ({})", x, y, self.completed);
                }
                None => {
                    log_event!(self.log, "probe {},{} outside grid", x, y);
                }
            }
        }
        self.on_sampling_progress(host, x, y, 0.0);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
