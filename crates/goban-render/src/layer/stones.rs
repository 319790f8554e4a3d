//! Stone field layer

use goban_board::{FeatureKind, Vertex};

use super::{draw_artwork, LayerContent, LayerContext, LayerKind, PaintContext};
use crate::{ArtworkKind, Damage, LayerCanvas};

/// Every stone on the board
#[derive(Debug, Clone, Copy, Default)]
pub struct StonesLayer;

impl StonesLayer {
    fn stone_changed(point: Vertex, kind: FeatureKind, cx: &LayerContext<'_>) -> Damage {
        match kind {
            FeatureKind::Stone(_) => Damage::Region(cx.local_rect_for_point(point)),
            FeatureKind::Marker(_) => Damage::None,
        }
    }
}

impl LayerContent for StonesLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Stones
    }

    fn board_reset(&mut self, _cx: &LayerContext<'_>) -> Damage {
        Damage::WholeTile
    }

    fn feature_placed(&mut self, point: Vertex, kind: FeatureKind, cx: &LayerContext<'_>) -> Damage {
        Self::stone_changed(point, kind, cx)
    }

    fn feature_removed(&mut self, point: Vertex, kind: FeatureKind, cx: &LayerContext<'_>) -> Damage {
        Self::stone_changed(point, kind, cx)
    }

    fn paint(&self, canvas: &mut LayerCanvas<'_>, cx: &mut PaintContext<'_>) {
        for point in cx.geometry.points_in_rect(canvas.canvas_region()) {
            if let Some(color) = cx.board.stone_at(point) {
                let rect = cx.geometry.canvas_rect_for_point(point);
                draw_artwork(canvas, cx, ArtworkKind::Stone(color), rect);
            }
        }
    }
}
