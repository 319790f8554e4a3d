//! Layer delegates
//!
//! A tile paints a fixed stack of layers back-to-front. Each layer is a
//! `LayerDelegate`: the shared dirty-rect state machine plus a
//! `LayerContent` variant that decides which events matter and what to draw.
//!
//! Variants override only the event hooks they care about; every hook has a
//! default, so dispatch never checks for capabilities.

mod cross_hair;
mod grid;
mod markers;
mod stones;

pub use cross_hair::CrossHairLayer;
pub use grid::GridLayer;
pub use markers::MarkersLayer;
pub use stones::StonesLayer;

use std::fmt;

use goban_board::{BoardState, FeatureKind, Vertex};
use goban_geometry::{GeometryProvider, Rect};
use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use crate::surface::{clear_region, pixmap_bounds};
use crate::{ArtworkRenderer, BoardEvent, Damage, DirtyState, DrawableCache, LayerCanvas, Redraw};

/// The closed set of layer types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Grid,
    Stones,
    Markers,
    CrossHair,
}

impl LayerKind {
    /// Default stack, back to front
    pub const DEFAULT_STACK: [LayerKind; 4] = [
        LayerKind::Grid,
        LayerKind::Stones,
        LayerKind::Markers,
        LayerKind::CrossHair,
    ];

    /// Create the content for this layer type
    pub fn create(self) -> Box<dyn LayerContent> {
        match self {
            LayerKind::Grid => Box::new(GridLayer),
            LayerKind::Stones => Box::new(StonesLayer),
            LayerKind::Markers => Box::new(MarkersLayer),
            LayerKind::CrossHair => Box::new(CrossHairLayer::default()),
        }
    }
}

/// Geometry available while handling a notification
pub struct LayerContext<'a> {
    pub geometry: &'a dyn GeometryProvider,
    /// Canvas rect of the owning tile
    pub tile_rect: Rect,
    /// Point currently under the cross-hair
    pub cross_hair: Option<Vertex>,
}

impl<'a> LayerContext<'a> {
    /// Tile bounds in tile-local coordinates
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tile_rect.width, self.tile_rect.height)
    }

    /// Tile-local rect of a feature on a point, empty if off-tile
    pub fn local_rect_for_point(&self, point: Vertex) -> Rect {
        let canvas_rect = self.geometry.canvas_rect_for_point(point);
        self.geometry.tile_local_rect(canvas_rect, self.tile_rect)
    }
}

/// Everything a paint routine may use
pub struct PaintContext<'a> {
    pub geometry: &'a dyn GeometryProvider,
    pub board: &'a dyn BoardState,
    pub cache: &'a mut DrawableCache,
    pub artwork: &'a dyn ArtworkRenderer,
}

/// Variant-specific behavior of a layer
pub trait LayerContent {
    fn kind(&self) -> LayerKind;

    /// Dispatch an event to the matching hook
    fn notify(&mut self, event: &BoardEvent, cx: &LayerContext<'_>) -> Damage {
        match *event {
            BoardEvent::CrossHairChanged(point) => self.cross_hair_changed(point, cx),
            BoardEvent::BoardReset => self.board_reset(cx),
            BoardEvent::ScaleChanged => self.scale_changed(cx),
            BoardEvent::AssetsChanged => self.assets_changed(cx),
            BoardEvent::FeaturePlaced { point, kind } => self.feature_placed(point, kind, cx),
            BoardEvent::FeatureRemoved { point, kind } => self.feature_removed(point, kind, cx),
        }
    }

    fn cross_hair_changed(&mut self, _point: Option<Vertex>, _cx: &LayerContext<'_>) -> Damage {
        Damage::None
    }

    fn board_reset(&mut self, _cx: &LayerContext<'_>) -> Damage {
        Damage::None
    }

    /// All canvas geometry moved
    fn scale_changed(&mut self, _cx: &LayerContext<'_>) -> Damage {
        Damage::WholeTile
    }

    /// Cached artwork was dropped and colors may differ
    fn assets_changed(&mut self, _cx: &LayerContext<'_>) -> Damage {
        Damage::WholeTile
    }

    fn feature_placed(&mut self, _point: Vertex, _kind: FeatureKind, _cx: &LayerContext<'_>) -> Damage {
        Damage::None
    }

    fn feature_removed(&mut self, _point: Vertex, _kind: FeatureKind, _cx: &LayerContext<'_>) -> Damage {
        Damage::None
    }

    /// The tile was (re)attached to a coordinate. Returns the tile-local rect
    /// of the tracked feature, if the layer tracks one.
    fn attached(&mut self, _cx: &LayerContext<'_>) -> Rect {
        Rect::EMPTY
    }

    /// Draw content inside the canvas region of `canvas`. The region has
    /// already been cleared.
    fn paint(&self, canvas: &mut LayerCanvas<'_>, cx: &mut PaintContext<'_>);
}

/// One layer of one tile
pub struct LayerDelegate {
    state: DirtyState,
    content: Box<dyn LayerContent>,
}

impl LayerDelegate {
    pub fn new(kind: LayerKind) -> Self {
        Self::with_content(kind.create())
    }

    /// Wrap custom content
    pub fn with_content(content: Box<dyn LayerContent>) -> Self {
        Self { state: DirtyState::new(), content }
    }

    pub fn kind(&self) -> LayerKind {
        self.content.kind()
    }

    pub fn state(&self) -> &DirtyState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn pending(&self) -> Option<Redraw> {
        self.state.pending()
    }

    pub fn previous_drawing_rect(&self) -> Rect {
        self.state.previous_drawing_rect()
    }

    /// Handle an event; returns the redraw to request from the tile
    pub fn notify(&mut self, event: &BoardEvent, cx: &LayerContext<'_>) -> Option<Redraw> {
        let damage = self.content.notify(event, cx);
        let redraw = self.state.apply(damage, cx.bounds());
        if redraw.is_some() {
            tracing::trace!("{:?} layer damaged by {:?}: {:?}", self.kind(), event, redraw);
        }
        redraw
    }

    /// Attach to a (new) tile position. Always fully dirty afterwards.
    pub fn attach(&mut self, cx: &LayerContext<'_>) -> Redraw {
        let target = self.content.attached(cx).intersection(&cx.bounds());
        self.state.reset(target);
        Redraw::WholeTile
    }

    /// Paint into the layer backing if dirty. Returns `true` if it painted.
    pub fn paint(&mut self, backing: &mut Pixmap, tile_rect: Rect, cx: &mut PaintContext<'_>) -> bool {
        let Some(redraw) = self.state.take() else {
            return false;
        };

        let region = redraw.resolve(pixmap_bounds(backing));
        if region.is_empty() {
            return false;
        }
        clear_region(backing, region);

        let mut canvas = LayerCanvas::new(backing, tile_rect, region);
        self.content.paint(&mut canvas, cx);
        true
    }
}

impl fmt::Debug for LayerDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerDelegate")
            .field("kind", &self.kind())
            .field("state", &self.state)
            .finish()
    }
}

/// Draw cached artwork, rendering it on a miss. Failures are logged and the
/// feature is skipped for this paint.
pub(crate) fn draw_artwork(
    canvas: &mut LayerCanvas<'_>,
    cx: &mut PaintContext<'_>,
    kind: crate::ArtworkKind,
    canvas_rect: Rect,
) {
    match cx.cache.get_or_render(kind, cx.artwork, cx.geometry) {
        Ok(drawable) => canvas.draw(drawable, canvas_rect),
        Err(err) => tracing::warn!("Skipping {:?}: {}", kind, err),
    }
}
