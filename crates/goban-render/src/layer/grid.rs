//! Grid layer: board background, lines and star points

use goban_board::Vertex;
use goban_geometry::{star_points, GeometryProvider, Rect};

use super::{draw_artwork, LayerContent, LayerKind, PaintContext};
use crate::{ArtworkKind, LayerCanvas};

/// Static board grid. Only scale and asset changes affect it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayer;

impl GridLayer {
    /// Canvas rects of every grid line
    fn line_rects(geometry: &dyn GeometryProvider) -> Vec<Rect> {
        let size = geometry.board_size();
        let width = geometry.line_width();
        let half = width / 2.0;

        let (left, top) = geometry.point_position(Vertex::new(0, size - 1));
        let (right, bottom) = geometry.point_position(Vertex::new(size - 1, 0));

        let mut rects = Vec::with_capacity(size as usize * 2);
        for i in 0..size {
            // Vertical line through column i, horizontal line through row i
            let (x, _) = geometry.point_position(Vertex::new(i, 0));
            rects.push(Rect::from_edges(x - half, top - half, x + half, bottom + half));
            let (_, y) = geometry.point_position(Vertex::new(0, i));
            rects.push(Rect::from_edges(left - half, y - half, right + half, y + half));
        }
        rects
    }
}

impl LayerContent for GridLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Grid
    }

    fn paint(&self, canvas: &mut LayerCanvas<'_>, cx: &mut PaintContext<'_>) {
        let theme = cx.artwork.theme();
        let region = canvas.canvas_region();

        canvas.fill_rect(region, theme.background);

        for line in Self::line_rects(cx.geometry) {
            if line.intersects(&region) {
                canvas.fill_rect(line, theme.line);
            }
        }

        for point in star_points(cx.geometry.board_size()) {
            let rect = cx.geometry.canvas_rect_for_point(point);
            if rect.intersects(&region) {
                draw_artwork(canvas, cx, ArtworkKind::StarPoint, rect);
            }
        }
    }
}
