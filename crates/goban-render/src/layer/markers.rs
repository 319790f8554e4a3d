//! Marker layer: symbols and the last-move highlight

use goban_board::{FeatureKind, Vertex};

use super::{draw_artwork, LayerContent, LayerContext, LayerKind, PaintContext};
use crate::{ArtworkKind, Damage, LayerCanvas};

/// Symbol markers drawn over stones
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkersLayer;

impl MarkersLayer {
    fn feature_changed(point: Vertex, kind: FeatureKind, cx: &LayerContext<'_>) -> Damage {
        // Marker colors depend on the stone underneath, so stones matter too
        match kind {
            FeatureKind::Marker(_) | FeatureKind::Stone(_) => Damage::Region(cx.local_rect_for_point(point)),
        }
    }
}

impl LayerContent for MarkersLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Markers
    }

    fn board_reset(&mut self, _cx: &LayerContext<'_>) -> Damage {
        Damage::WholeTile
    }

    fn feature_placed(&mut self, point: Vertex, kind: FeatureKind, cx: &LayerContext<'_>) -> Damage {
        Self::feature_changed(point, kind, cx)
    }

    fn feature_removed(&mut self, point: Vertex, kind: FeatureKind, cx: &LayerContext<'_>) -> Damage {
        Self::feature_changed(point, kind, cx)
    }

    fn paint(&self, canvas: &mut LayerCanvas<'_>, cx: &mut PaintContext<'_>) {
        for point in cx.geometry.points_in_rect(canvas.canvas_region()) {
            let Some(marker) = cx.board.marker_at(point) else {
                continue;
            };
            let kind = ArtworkKind::Marker { marker, on: cx.board.stone_at(point) };
            let rect = cx.geometry.canvas_rect_for_point(point);
            draw_artwork(canvas, cx, kind, rect);
        }
    }
}
