//! Cross-hair layer
//!
//! Shows a translucent stone of the side to move at the highlighted point.
//! Only the highlighted point is remembered, and only while it is on this
//! tile; stone colors are read from the board at paint time.

use goban_board::Vertex;
use goban_geometry::Rect;

use super::{draw_artwork, LayerContent, LayerContext, LayerKind, PaintContext};
use crate::{ArtworkKind, Damage, LayerCanvas};

/// Single-feature layer following the cross-hair
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossHairLayer {
    point: Option<Vertex>,
}

impl CrossHairLayer {
    /// Highlighted point, if it is on this tile
    pub fn point(&self) -> Option<Vertex> {
        self.point
    }

    /// Remember the point if it lands on this tile; returns its tile-local rect
    fn locate(&mut self, point: Option<Vertex>, cx: &LayerContext<'_>) -> Rect {
        let rect = point.map_or(Rect::EMPTY, |p| cx.local_rect_for_point(p));
        self.point = if rect.is_empty() { None } else { point };
        rect
    }
}

impl LayerContent for CrossHairLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::CrossHair
    }

    fn cross_hair_changed(&mut self, point: Option<Vertex>, cx: &LayerContext<'_>) -> Damage {
        Damage::Track(self.locate(point, cx))
    }

    fn board_reset(&mut self, cx: &LayerContext<'_>) -> Damage {
        Damage::Track(self.locate(None, cx))
    }

    fn scale_changed(&mut self, cx: &LayerContext<'_>) -> Damage {
        Damage::Retrack(self.locate(cx.cross_hair, cx))
    }

    fn assets_changed(&mut self, cx: &LayerContext<'_>) -> Damage {
        Damage::Retrack(self.locate(cx.cross_hair, cx))
    }

    fn attached(&mut self, cx: &LayerContext<'_>) -> Rect {
        self.locate(cx.cross_hair, cx)
    }

    fn paint(&self, canvas: &mut LayerCanvas<'_>, cx: &mut PaintContext<'_>) {
        // Nothing remembered: this is an erase frame
        let Some(point) = self.point else {
            return;
        };
        let kind = ArtworkKind::CrossHairStone(cx.board.next_color());
        let rect = cx.geometry.canvas_rect_for_point(point);
        draw_artwork(canvas, cx, kind, rect);
    }
}
