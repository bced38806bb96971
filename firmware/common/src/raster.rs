//! Raster backend: executes display-list commands on an `embedded_graphics`
//! target and records touch regions in a [`TagMap`].
//!
//! # Semantics
//!
//! - Colors are composed in [`Rgb888`], blended against the last clear color
//!   using the context alpha, and narrowed to [`Rgb565`] per pixel.
//! - `Points` become filled discs, `LineStrip` becomes 1 px segments.
//! - With the color mask off nothing is drawn, but tag regions are still
//!   recorded. That is how invisible touch targets are made.
//! - With the tag mask on, every point, text and button carrying a non-zero
//!   tag adds a region. Line strips never add regions.
//! - Later regions cover earlier ones: [`TagMap::hit_test`] searches newest
//!   first.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, ContainsPoint, Line, Primitive as _, PrimitiveStyle, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::Text;
use heapless::Vec;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::{BACKGROUND, WHITE, blend};
use crate::grid::TAG_NONE;
use crate::sink::{DisplaySink, Primitive};
use crate::styles::{CENTERED, LABEL_FONT};

// =============================================================================
// Configuration
// =============================================================================

/// Maximum nesting of `save_context`.
pub const CONTEXT_DEPTH: usize = 8;

/// Maximum number of touch regions per frame (largest grid plus controls).
pub const TAG_REGIONS: usize = 256;

/// Corner radius of buttons, in pixels.
const BUTTON_RADIUS: u32 = 4;

// =============================================================================
// Touch Regions
// =============================================================================

/// Area covered by one touch target.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HitShape {
    Circle(Circle),
    Rect(Rectangle),
}

impl HitShape {
    pub fn contains(
        &self,
        point: Point,
    ) -> bool {
        match self {
            Self::Circle(circle) => circle.contains(point),
            Self::Rect(rect) => rect.contains(point),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HitRegion {
    pub shape: HitShape,
    pub tag: u8,
}

/// Touch regions recorded while drawing, in draw order.
#[derive(Clone, Debug, Default)]
pub struct TagMap {
    regions: Vec<HitRegion, TAG_REGIONS>,
    dropped: usize,
}

impl TagMap {
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
            dropped: 0,
        }
    }

    pub fn push(
        &mut self,
        region: HitRegion,
    ) {
        if self.regions.push(region).is_err() {
            self.dropped += 1;
        }
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.dropped = 0;
    }

    /// Tag of the topmost region containing `point`, or 0.
    pub fn hit_test(
        &self,
        point: Point,
    ) -> u8 {
        self.regions
            .iter()
            .rev()
            .find(|region| region.shape.contains(point))
            .map_or(TAG_NONE, |region| region.tag)
    }

    pub fn regions(&self) -> &[HitRegion] { &self.regions }

    /// Regions lost because the map was full.
    #[inline]
    pub const fn dropped(&self) -> usize { self.dropped }
}

// =============================================================================
// Graphics Context
// =============================================================================

#[derive(Clone, Copy, PartialEq, Debug)]
struct Context {
    color: Rgb888,
    alpha: u8,
    point_radius: f32,
    tag: u8,
    tag_mask: bool,
    color_mask: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            color: WHITE,
            alpha: u8::MAX,
            point_radius: 1.0,
            tag: TAG_NONE,
            tag_mask: true,
            color_mask: true,
        }
    }
}

// =============================================================================
// Raster Sink
// =============================================================================

/// Draws display-list commands onto `display`.
pub struct RasterSink<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: &'a mut D,
    tags: &'a mut TagMap,
    background: Rgb888,
    stack: Vec<Context, CONTEXT_DEPTH>,
    ctx: Context,
    primitive: Option<Primitive>,
    last_vertex: Option<Point>,
}

impl<'a, D> RasterSink<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Start a frame. `tags` keeps its regions until the next `clear`.
    pub fn new(
        display: &'a mut D,
        tags: &'a mut TagMap,
    ) -> Self {
        Self {
            display,
            tags,
            background: BACKGROUND,
            stack: Vec::new(),
            ctx: Context::default(),
            primitive: None,
            last_vertex: None,
        }
    }

    /// Current color after alpha blending, in panel format.
    fn pixel_color(&self) -> Rgb565 { Rgb565::from(blend(self.ctx.color, self.background, self.ctx.alpha)) }

    fn tagging(&self) -> bool { self.ctx.tag_mask && self.ctx.tag != TAG_NONE }

    fn draw_point(
        &mut self,
        center: Point,
    ) {
        let diameter = ((self.ctx.point_radius * 2.0).round() as u32).max(1);
        let circle = Circle::with_center(center, diameter);

        if self.ctx.color_mask {
            circle
                .into_styled(PrimitiveStyle::with_fill(self.pixel_color()))
                .draw(self.display)
                .ok();
        }
        if self.tagging() {
            self.tags.push(HitRegion {
                shape: HitShape::Circle(circle),
                tag: self.ctx.tag,
            });
        }
    }

    fn draw_segment_to(
        &mut self,
        end: Point,
    ) {
        if let Some(start) = self.last_vertex
            && self.ctx.color_mask
        {
            Line::new(start, end)
                .into_styled(PrimitiveStyle::with_stroke(self.pixel_color(), 1))
                .draw(self.display)
                .ok();
        }
        self.last_vertex = Some(end);
    }

    fn draw_label(
        &mut self,
        area: Rectangle,
        label: &str,
        color: Rgb565,
    ) {
        Text::with_text_style(label, area.center(), MonoTextStyle::new(LABEL_FONT, color), CENTERED)
            .draw(self.display)
            .ok();
    }

    fn tag_area(
        &mut self,
        area: Rectangle,
    ) {
        if self.tagging() {
            self.tags.push(HitRegion {
                shape: HitShape::Rect(area),
                tag: self.ctx.tag,
            });
        }
    }
}

impl<D> DisplaySink for RasterSink<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(
        &mut self,
        color: Rgb888,
    ) {
        self.display.clear(Rgb565::from(color)).ok();
        self.background = color;
        self.tags.clear();
    }

    fn save_context(&mut self) { self.stack.push(self.ctx).ok(); }

    fn restore_context(&mut self) {
        if let Some(ctx) = self.stack.pop() {
            self.ctx = ctx;
        }
    }

    fn color_rgb(
        &mut self,
        color: Rgb888,
    ) {
        self.ctx.color = color;
    }

    fn color_alpha(
        &mut self,
        alpha: u8,
    ) {
        self.ctx.alpha = alpha;
    }

    fn point_size(
        &mut self,
        radius: f32,
    ) {
        self.ctx.point_radius = radius;
    }

    fn tag_mask(
        &mut self,
        enabled: bool,
    ) {
        self.ctx.tag_mask = enabled;
    }

    fn color_mask(
        &mut self,
        enabled: bool,
    ) {
        self.ctx.color_mask = enabled;
    }

    fn tag(
        &mut self,
        tag: u8,
    ) {
        self.ctx.tag = tag;
    }

    fn begin(
        &mut self,
        primitive: Primitive,
    ) {
        self.primitive = Some(primitive);
        self.last_vertex = None;
    }

    fn vertex(
        &mut self,
        point: Point,
    ) {
        match self.primitive {
            Some(Primitive::Points) => self.draw_point(point),
            Some(Primitive::LineStrip) => self.draw_segment_to(point),
            None => {}
        }
    }

    fn end(&mut self) {
        self.primitive = None;
        self.last_vertex = None;
    }

    fn text(
        &mut self,
        area: Rectangle,
        label: &str,
    ) {
        if self.ctx.color_mask {
            let color = self.pixel_color();
            self.draw_label(area, label, color);
        }
        self.tag_area(area);
    }

    fn button(
        &mut self,
        area: Rectangle,
        label: &str,
    ) {
        if self.ctx.color_mask {
            RoundedRectangle::with_equal_corners(area, Size::new(BUTTON_RADIUS, BUTTON_RADIUS))
                .into_styled(PrimitiveStyle::with_fill(self.pixel_color()))
                .draw(self.display)
                .ok();
            self.draw_label(area, label, Rgb565::from(WHITE));
        }
        self.tag_area(area);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::BLACK;

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn test_points_register_tags() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.point_size(4.0);
        sink.tag(12);
        sink.begin(Primitive::Points);
        sink.vertex(Point::new(20, 20));
        sink.end();

        assert_eq!(tags.hit_test(Point::new(20, 20)), 12);
        assert_eq!(tags.hit_test(Point::new(22, 21)), 12, "Anywhere inside the disc");
        assert_eq!(tags.hit_test(Point::new(40, 40)), TAG_NONE);
    }

    #[test]
    fn test_tag_mask_off_registers_nothing() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.tag_mask(false);
        sink.tag(12);
        sink.begin(Primitive::Points);
        sink.vertex(Point::new(20, 20));
        sink.end();

        assert!(tags.regions().is_empty());
    }

    #[test]
    fn test_color_mask_off_draws_nothing() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.color_mask(false);
        sink.point_size(5.0);
        sink.tag(15);
        sink.begin(Primitive::Points);
        sink.vertex(Point::new(10, 10));
        sink.end();

        assert_eq!(display.get_pixel(Point::new(10, 10)), None, "Invisible point must not draw");
        assert_eq!(tags.hit_test(Point::new(10, 10)), 15, "Invisible point still takes touches");
    }

    #[test]
    fn test_later_regions_win() {
        let mut tags = TagMap::new();
        let area = Rectangle::new(Point::zero(), Size::new(10, 10));
        tags.push(HitRegion {
            shape: HitShape::Rect(area),
            tag: 1,
        });
        tags.push(HitRegion {
            shape: HitShape::Circle(Circle::with_center(Point::new(5, 5), 4)),
            tag: 20,
        });
        assert_eq!(tags.hit_test(Point::new(5, 5)), 20, "Topmost region wins");
        assert_eq!(tags.hit_test(Point::new(0, 0)), 1);
    }

    #[test]
    fn test_line_strip_draws_segments() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.color_rgb(WHITE);
        sink.tag(30);
        sink.begin(Primitive::LineStrip);
        sink.vertex(Point::new(0, 0));
        sink.vertex(Point::new(10, 0));
        sink.vertex(Point::new(10, 10));
        sink.end();

        assert_eq!(display.get_pixel(Point::new(5, 0)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(10, 5)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(5, 5)), None);
        assert!(tags.regions().is_empty(), "Lines never take touches");
    }

    #[test]
    fn test_restore_context() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.color_rgb(WHITE);
        sink.save_context();
        sink.color_rgb(BLACK);
        sink.restore_context();
        sink.begin(Primitive::Points);
        sink.vertex(Point::new(30, 30));
        sink.end();

        assert_eq!(display.get_pixel(Point::new(30, 30)), Some(Rgb565::WHITE), "Color restored");
    }

    #[test]
    fn test_restore_on_empty_stack_keeps_context() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.color_rgb(BLACK);
        sink.restore_context();
        sink.begin(Primitive::Points);
        sink.vertex(Point::new(30, 30));
        sink.end();

        assert_eq!(display.get_pixel(Point::new(30, 30)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_alpha_blends_with_background() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.clear(BLACK);
        sink.color_rgb(WHITE);
        sink.color_alpha(128);
        sink.begin(Primitive::Points);
        sink.vertex(Point::new(30, 30));
        sink.end();

        let expected = Rgb565::from(Rgb888::new(128, 128, 128));
        assert_eq!(display.get_pixel(Point::new(30, 30)), Some(expected));
    }

    #[test]
    fn test_clear_forgets_regions() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.tag(1);
        sink.button(Rectangle::new(Point::new(0, 0), Size::new(20, 10)), "Back");
        sink.clear(BLACK);

        assert!(tags.regions().is_empty());
    }

    #[test]
    fn test_button_takes_touches() {
        let mut display = display();
        let mut tags = TagMap::new();
        let mut sink = RasterSink::new(&mut display, &mut tags);

        sink.color_rgb(Rgb888::new(0, 0, 255));
        sink.tag(1);
        sink.button(Rectangle::new(Point::new(0, 40), Size::new(60, 20)), "Back");

        assert_eq!(display.get_pixel(Point::new(5, 50)), Some(Rgb565::BLUE), "Filled body");
        assert_eq!(display.get_pixel(Point::new(0, 40)), None, "Rounded corner");
        assert_eq!(tags.hit_test(Point::new(30, 50)), 1);
        assert_eq!(tags.hit_test(Point::new(30, 30)), TAG_NONE);
    }

    #[test]
    fn test_tag_map_overflow_counted() {
        let mut tags = TagMap::new();
        let region = HitRegion {
            shape: HitShape::Rect(Rectangle::new(Point::zero(), Size::new(1, 1))),
            tag: 10,
        };
        for _ in 0..=TAG_REGIONS {
            tags.push(region);
        }
        assert_eq!(tags.regions().len(), TAG_REGIONS);
        assert_eq!(tags.dropped(), 1);
    }
}
