//! Recording sink.
//!
//! Stores every command in a fixed-capacity buffer so the exact output of the
//! renderer can be inspected. Commands beyond capacity are counted and dropped.

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use crate::sink::{DisplaySink, Primitive};

/// Maximum stored length of a text or button label.
///
/// Matches the screen's readout buffer so a height is never cut off.
pub const LABEL_LENGTH: usize = crate::screen::READOUT_LENGTH;

/// One recorded display-list command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Clear(Rgb888),
    SaveContext,
    RestoreContext,
    ColorRgb(Rgb888),
    ColorAlpha(u8),
    PointSize(f32),
    TagMask(bool),
    ColorMask(bool),
    Tag(u8),
    Begin(Primitive),
    Vertex(Point),
    End,
    Text(Rectangle, String<LABEL_LENGTH>),
    Button(Rectangle, String<LABEL_LENGTH>),
}

/// Display list holding up to `N` commands.
#[derive(Default)]
pub struct DisplayList<const N: usize> {
    commands: Vec<Command, N>,
    dropped: usize,
}

impl<const N: usize> DisplayList<N> {
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            dropped: 0,
        }
    }

    /// Recorded commands in emission order.
    pub fn commands(&self) -> &[Command] { &self.commands }

    /// Number of commands lost to a full buffer.
    #[inline]
    pub const fn dropped(&self) -> usize { self.dropped }

    pub fn clear_list(&mut self) {
        self.commands.clear();
        self.dropped = 0;
    }

    /// Line segments drawn by every line strip, as vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let mut in_strip = false;
        let mut previous: Option<Point> = None;
        self.commands.iter().filter_map(move |command| {
            match command {
                Command::Begin(primitive) => {
                    in_strip = *primitive == Primitive::LineStrip;
                    previous = None;
                }
                Command::End => {
                    in_strip = false;
                    previous = None;
                }
                Command::Vertex(point) if in_strip => {
                    let segment = previous.map(|start| (start, *point));
                    previous = Some(*point);
                    return segment;
                }
                _ => {}
            }
            None
        })
    }

    /// Labels of every text and button command.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            Command::Text(_, label) | Command::Button(_, label) => Some(label.as_str()),
            _ => None,
        })
    }

    fn record(
        &mut self,
        command: Command,
    ) {
        if self.commands.push(command).is_err() {
            self.dropped += 1;
        }
    }
}

/// Copy a label, truncating at a character boundary when it does not fit.
fn label(text: &str) -> String<LABEL_LENGTH> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl<const N: usize> DisplaySink for DisplayList<N> {
    fn clear(
        &mut self,
        color: Rgb888,
    ) {
        self.record(Command::Clear(color));
    }

    fn save_context(&mut self) { self.record(Command::SaveContext); }

    fn restore_context(&mut self) { self.record(Command::RestoreContext); }

    fn color_rgb(
        &mut self,
        color: Rgb888,
    ) {
        self.record(Command::ColorRgb(color));
    }

    fn color_alpha(
        &mut self,
        alpha: u8,
    ) {
        self.record(Command::ColorAlpha(alpha));
    }

    fn point_size(
        &mut self,
        radius: f32,
    ) {
        self.record(Command::PointSize(radius));
    }

    fn tag_mask(
        &mut self,
        enabled: bool,
    ) {
        self.record(Command::TagMask(enabled));
    }

    fn color_mask(
        &mut self,
        enabled: bool,
    ) {
        self.record(Command::ColorMask(enabled));
    }

    fn tag(
        &mut self,
        tag: u8,
    ) {
        self.record(Command::Tag(tag));
    }

    fn begin(
        &mut self,
        primitive: Primitive,
    ) {
        self.record(Command::Begin(primitive));
    }

    fn vertex(
        &mut self,
        point: Point,
    ) {
        self.record(Command::Vertex(point));
    }

    fn end(&mut self) { self.record(Command::End); }

    fn text(
        &mut self,
        area: Rectangle,
        text: &str,
    ) {
        self.record(Command::Text(area, label(text)));
    }

    fn button(
        &mut self,
        area: Rectangle,
        text: &str,
    ) {
        self.record(Command::Button(area, label(text)));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
