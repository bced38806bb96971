//! Mesh renderer.
//!
//! Emits the layered mesh drawing into a [`DisplaySink`]:
//!
//! 1. Wireframe: each set sample is joined to its right and lower set
//!    neighbours with one line strip (right, self, below). Segments never
//!    cross an unset sample.
//! 2. Points (optional): one disc per set sample, row by row, optionally
//!    colored by deviation. With colors on, every row runs in its own
//!    saved context so point colors do not leak.
//! 3. Tags (optional): invisible enlarged discs at every grid point, set or
//!    not, each carrying its grid tag.
//! 4. Highlight (optional): a translucent disc over the highlighted point.
//!
//! Without sample data every point counts as set at height 0. That is the
//! static skeleton drawn behind the live mesh.
//!
//! Point sizes follow the display-list convention of 1/16 pixel units: the
//! base size is truncated to a whole number and scaled by 2 (points), 10
//! (tags) or 6 (highlight) sixteenths.

use embedded_graphics::geometry::Point;
use embedded_graphics::primitives::Rectangle;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::grid::GridDims;
use crate::mesh::MeshSource;
use crate::options::DrawOptions;
use crate::sink::{DisplaySink, Primitive};
use crate::stats::MeshStats;
use crate::transform::Projection;

/// Sixteenths of a pixel per point-size unit.
const POINT_SIZE_UNITS: f32 = 16.0;

/// Point size multiplier for sample points.
const POINT_MULT: f32 = 2.0;

/// Point size multiplier for touch targets.
const TAG_MULT: f32 = 10.0;

/// Point size multiplier for the highlight marker.
const HIGHLIGHT_MULT: f32 = 6.0;

/// Alpha of the highlight marker.
const HIGHLIGHT_ALPHA: u8 = 128;

/// Renderer for one grid inside one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPlot {
    dims: GridDims,
    slant: f32,
    projection: Projection,
}

impl MeshPlot {
    pub fn new(
        dims: GridDims,
        viewport: Rectangle,
        slant: f32,
    ) -> Self {
        Self {
            dims,
            slant,
            projection: Projection::new(dims, viewport, slant),
        }
    }

    /// Move or resize the viewport. Rebuilds the projection.
    pub fn set_viewport(
        &mut self,
        viewport: Rectangle,
    ) {
        self.projection = Projection::new(self.dims, viewport, self.slant);
    }

    #[inline]
    pub const fn dims(&self) -> GridDims { self.dims }

    #[inline]
    pub const fn projection(&self) -> &Projection { &self.projection }

    /// Base point size in whole display units.
    fn base_size(&self) -> f32 { self.projection.base_point_size().floor() }

    fn point_radius(
        &self,
        mult: f32,
    ) -> f32 {
        self.base_size() * mult / POINT_SIZE_UNITS
    }

    /// Draw the mesh. `data = None` draws the skeleton.
    ///
    /// `highlighted` is only drawn when it addresses a grid point.
    pub fn draw(
        &self,
        sink: &mut impl DisplaySink,
        data: Option<&dyn MeshSource>,
        opts: DrawOptions,
        highlighted: u8,
    ) {
        let dims = self.dims;
        let (cols, rows) = (dims.cols(), dims.rows());

        let stats = match data {
            Some(mesh) if opts.contains(DrawOptions::AUTOSCALE) => MeshStats::compute(mesh),
            // Colors without autoscale stay neutral.
            _ => MeshStats::EMPTY,
        };
        // Unscaled heights are not drawn; only autoscale lifts the mesh.
        let scale_z = if opts.contains(DrawOptions::AUTOSCALE) { stats.scale_z() } else { 0.0 };

        let is_set = |x: u8, y: u8| data.is_none_or(|mesh| mesh.value(x, y).is_some());
        let value = |x: u8, y: u8| data.and_then(|mesh| mesh.value(x, y)).unwrap_or(0.0);
        let vertex = |x: u8, y: u8| -> Point { self.projection.to_point(x, y, value(x, y) * scale_z) };

        sink.save_context();
        sink.tag_mask(false);
        sink.save_context();

        for y in 0..rows {
            for x in 0..cols {
                if !is_set(x, y) {
                    continue;
                }
                let right = x + 1 < cols && is_set(x + 1, y);
                let below = y + 1 < rows && is_set(x, y + 1);
                if right || below {
                    sink.begin(Primitive::LineStrip);
                    if right {
                        sink.vertex(vertex(x + 1, y));
                    }
                    sink.vertex(vertex(x, y));
                    if below {
                        sink.vertex(vertex(x, y + 1));
                    }
                }
            }

            if opts.contains(DrawOptions::POINTS) {
                sink.point_size(self.point_radius(POINT_MULT));
                sink.begin(Primitive::Points);
                for x in 0..cols {
                    if !is_set(x, y) {
                        continue;
                    }
                    if opts.contains(DrawOptions::COLORS) {
                        sink.color_rgb(stats.deviation_color(value(x, y)));
                    }
                    sink.vertex(vertex(x, y));
                }
                if opts.contains(DrawOptions::COLORS) {
                    sink.restore_context();
                    sink.save_context();
                }
            }
        }

        sink.restore_context();
        sink.tag_mask(true);

        if opts.contains(DrawOptions::TAGS) {
            sink.color_mask(false);
            sink.point_size(self.point_radius(TAG_MULT));
            sink.begin(Primitive::Points);
            for (x, y) in dims.points() {
                sink.tag(dims.point_to_tag(x, y));
                sink.vertex(vertex(x, y));
            }
            sink.color_mask(true);
        }

        if opts.contains(DrawOptions::HIGHLIGHT)
            && let Some((x, y)) = dims.tag_to_point(highlighted)
        {
            sink.color_alpha(HIGHLIGHT_ALPHA);
            sink.point_size(self.point_radius(HIGHLIGHT_MULT));
            sink.begin(Primitive::Points);
            sink.tag(highlighted);
            sink.vertex(vertex(x, y));
        }

        sink.end();
        sink.restore_context();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::geometry::Size;

    use super::*;
    use crate::display_list::{Command, DisplayList};
    use crate::mesh::MeshGrid;

    type List = DisplayList<1024>;

    fn dims_3x3() -> GridDims { GridDims::new(3, 3).unwrap() }

    fn plot_3x3() -> MeshPlot { MeshPlot::new(dims_3x3(), Rectangle::new(Point::new(50, 20), Size::new(300, 200)), 0.5) }

    fn grid_3x3(samples: [Option<f32>; 9]) -> MeshGrid {
        MeshGrid::from_rows(dims_3x3(), &[&samples[0..3], &samples[3..6], &samples[6..9]]).unwrap()
    }

    fn draw(
        plot: &MeshPlot,
        data: Option<&dyn MeshSource>,
        opts: DrawOptions,
        highlighted: u8,
    ) -> List {
        let mut list = List::new();
        plot.draw(&mut list, data, opts, highlighted);
        assert_eq!(list.dropped(), 0, "Test display list too small");
        list
    }

    fn count(
        list: &List,
        command: &Command,
    ) -> usize {
        list.commands().iter().filter(|c| *c == command).count()
    }

    fn vertices(list: &List) -> std::vec::Vec<Point> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                Command::Vertex(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_wireframe_skips_unset_center() {
        let plot = plot_3x3();
        let z = Some(0.0);
        let grid = grid_3x3([z, z, z, z, None, z, z, z, z]);
        let list = draw(&plot, Some(&grid), DrawOptions::NONE, 0);

        let center = plot.projection().to_point(1, 1, 0.0);
        let segments: std::vec::Vec<_> = list.segments().collect();
        assert_eq!(segments.len(), 8, "All edges around the hole should be drawn");
        for (a, b) in &segments {
            assert_ne!(*a, center, "No segment may touch the unset center");
            assert_ne!(*b, center, "No segment may touch the unset center");
        }
    }

    #[test]
    fn test_skeleton_connects_every_point() {
        let plot = plot_3x3();
        let list = draw(&plot, None, DrawOptions::NONE, 0);
        assert_eq!(list.segments().count(), 12, "3x3 lattice has 12 edges");
    }

    #[test]
    fn test_strip_order_right_self_below() {
        let plot = plot_3x3();
        let list = draw(&plot, None, DrawOptions::NONE, 0);
        let p = |x, y| plot.projection().to_point(x, y, 0.0);
        assert_eq!(
            &list.commands()[3..7],
            &[
                Command::Begin(Primitive::LineStrip),
                Command::Vertex(p(1, 0)),
                Command::Vertex(p(0, 0)),
                Command::Vertex(p(0, 1)),
            ]
        );
    }

    #[test]
    fn test_context_framing() {
        let plot = plot_3x3();
        let opts = DrawOptions::POINTS | DrawOptions::COLORS | DrawOptions::TAGS | DrawOptions::HIGHLIGHT;
        let list = draw(&plot, None, opts, 14);
        let commands = list.commands();

        assert_eq!(
            &commands[..3],
            &[Command::SaveContext, Command::TagMask(false), Command::SaveContext],
            "Touch writes are off while drawing the visible mesh"
        );
        assert_eq!(&commands[commands.len() - 2..], &[Command::End, Command::RestoreContext]);
        assert_eq!(
            count(&list, &Command::SaveContext),
            count(&list, &Command::RestoreContext),
            "Context stack must balance"
        );
    }

    #[test]
    fn test_colors_wrap_each_row() {
        let plot = plot_3x3();
        let s = Some(0.1);
        let grid = grid_3x3([s, s, s, s, Some(0.3), s, s, s, s]);
        let list = draw(&plot, Some(&grid), DrawOptions::POINTS | DrawOptions::COLORS | DrawOptions::AUTOSCALE, 0);

        assert_eq!(count(&list, &Command::RestoreContext), 3 + 2, "One restore per row plus framing");
        let colors = list.commands().iter().filter(|c| matches!(c, Command::ColorRgb(_))).count();
        assert_eq!(colors, 9, "Every set point gets its own color");
    }

    #[test]
    fn test_colors_neutral_without_autoscale() {
        let plot = plot_3x3();
        let s = Some(0.1);
        let grid = grid_3x3([s, s, s, s, Some(0.3), s, s, s, s]);
        let list = draw(&plot, Some(&grid), DrawOptions::POINTS | DrawOptions::COLORS, 0);

        let colors: std::vec::Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::ColorRgb(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 9);
        assert!(
            colors.iter().all(|c| *c == crate::colors::WHITE),
            "Without autoscale there is no mean to deviate from"
        );
    }

    #[test]
    fn test_points_skip_unset_samples() {
        let plot = plot_3x3();
        let grid = grid_3x3([Some(0.0), None, None, None, None, None, None, None, Some(0.0)]);
        let list = draw(&plot, Some(&grid), DrawOptions::POINTS, 0);
        assert_eq!(vertices(&list).len(), 2, "Isolated samples have no wireframe, only points");
        assert_eq!(list.segments().count(), 0);
    }

    #[test]
    fn test_tags_cover_every_point() {
        let plot = plot_3x3();
        let grid = grid_3x3([None, None, None, None, Some(0.2), None, None, None, None]);
        let list = draw(&plot, Some(&grid), DrawOptions::TAGS, 0);

        let commands = list.commands();
        let start = commands.iter().position(|c| *c == Command::ColorMask(false)).unwrap();
        let end = commands.iter().position(|c| *c == Command::ColorMask(true)).unwrap();
        let tags: std::vec::Vec<u8> = commands[start..end]
            .iter()
            .filter_map(|c| match c {
                Command::Tag(tag) => Some(*tag),
                _ => None,
            })
            .collect();
        assert_eq!(tags, (10..19).collect::<std::vec::Vec<u8>>(), "Unset points are still touchable");
    }

    #[test]
    fn test_point_sizes() {
        let plot = plot_3x3();
        // scale = 300 / 2.25 = 200 / 1.5 = 133.3; base = trunc(133.3 / 3) = 44
        let list = draw(&plot, None, DrawOptions::POINTS | DrawOptions::TAGS | DrawOptions::HIGHLIGHT, 10);
        assert_eq!(count(&list, &Command::PointSize(5.5)), 3, "44 * 2 / 16 per row");
        assert_eq!(count(&list, &Command::PointSize(27.5)), 1, "44 * 10 / 16");
        assert_eq!(count(&list, &Command::PointSize(16.5)), 1, "44 * 6 / 16");
    }

    #[test]
    fn test_highlight_requires_grid_tag() {
        let plot = plot_3x3();
        for tag in [0, 1, 9, 19] {
            let list = draw(&plot, None, DrawOptions::HIGHLIGHT, tag);
            assert_eq!(count(&list, &Command::ColorAlpha(HIGHLIGHT_ALPHA)), 0, "Tag {tag} is not a grid point");
        }

        let list = draw(&plot, None, DrawOptions::HIGHLIGHT, 14);
        let commands = list.commands();
        let at = commands.iter().position(|c| *c == Command::ColorAlpha(HIGHLIGHT_ALPHA)).unwrap();
        assert_eq!(commands[at + 3], Command::Tag(14), "Highlight keeps its tag");
        assert_eq!(commands[at + 4], Command::Vertex(plot.projection().to_point(1, 1, 0.0)));
    }

    #[test]
    fn test_autoscale_lifts_high_samples() {
        let plot = plot_3x3();
        let z = Some(0.0);
        let grid = grid_3x3([z, z, z, z, Some(1.0), z, z, z, z]);

        // mean = 1/9, range = 1.0, so the peak sits 0.1 above the plane.
        let lifted = plot.projection().to_point(1, 1, 0.1);
        let flat = plot.projection().to_point(1, 1, 0.0);
        assert!(lifted.y < flat.y);

        let scaled = draw(&plot, Some(&grid), DrawOptions::POINTS | DrawOptions::AUTOSCALE, 0);
        assert!(vertices(&scaled).contains(&lifted));

        let unscaled = draw(&plot, Some(&grid), DrawOptions::POINTS, 0);
        assert!(vertices(&unscaled).contains(&flat), "Without autoscale the mesh is flat");
        assert!(!vertices(&unscaled).contains(&lifted));
    }

    #[test]
    fn test_set_viewport_moves_projection() {
        let mut plot = plot_3x3();
        let before = plot.projection().to_point(0, 0, 0.0);
        plot.set_viewport(Rectangle::new(Point::new(150, 20), Size::new(300, 200)));
        let after = plot.projection().to_point(0, 0, 0.0);
        assert_eq!(after - before, Point::new(100, 0));
    }
}
