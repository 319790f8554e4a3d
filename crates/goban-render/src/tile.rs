//! Render tile
//!
//! A tile covers one fixed-size square of the board canvas. It owns the
//! composited surface shown by the host plus one transparent backing per
//! layer in its stack.

use std::fmt;

use goban_board::Vertex;
use goban_geometry::{GeometryProvider, Rect, TileCoord};
use tiny_skia::Pixmap;

use crate::layer::{LayerContext, LayerDelegate, LayerKind, PaintContext};
use crate::surface::{composite, new_pixmap, pixmap_bounds};
use crate::{BoardEvent, Redraw, RenderError};

/// One slot of the layer stack
struct TileLayer {
    delegate: LayerDelegate,
    backing: Pixmap,
}

/// A tile and its layer stack
pub struct Tile {
    coord: TileCoord,
    /// Canvas rect covered by this tile
    rect: Rect,
    layers: Vec<TileLayer>,
    surface: Pixmap,
    /// Pending display region, `None` when up to date
    display_region: Option<Redraw>,
}

impl Tile {
    /// Allocate a tile of `pixels` x `pixels` with the given layer stack,
    /// back to front.
    ///
    /// The tile starts fully dirty but its delegates are not attached; call
    /// [`Tile::attach`] before painting.
    pub fn new(coord: TileCoord, rect: Rect, kinds: &[LayerKind], pixels: u32) -> Result<Self, RenderError> {
        assert!(pixels > 0, "tile size must be positive");

        let layers = kinds
            .iter()
            .map(|&kind| {
                Ok(TileLayer {
                    delegate: LayerDelegate::new(kind),
                    backing: new_pixmap(pixels, pixels)?,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(Self {
            coord,
            rect,
            layers,
            surface: new_pixmap(pixels, pixels)?,
            display_region: Some(Redraw::WholeTile),
        })
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Canvas rect covered by this tile
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Composited pixels, valid where no display is pending
    pub fn surface(&self) -> &Pixmap {
        &self.surface
    }

    /// Tile bounds in its own pixels
    pub fn bounds(&self) -> Rect {
        pixmap_bounds(&self.surface)
    }

    /// Delegates back to front
    pub fn delegates(&self) -> impl Iterator<Item = &LayerDelegate> {
        self.layers.iter().map(|layer| &layer.delegate)
    }

    pub fn delegate(&self, kind: LayerKind) -> Option<&LayerDelegate> {
        self.delegates().find(|delegate| delegate.kind() == kind)
    }

    /// Whether the host should call [`Tile::display`]
    pub fn needs_display(&self) -> bool {
        self.display_region.is_some()
    }

    /// Region waiting to be displayed
    pub fn display_region(&self) -> Option<Redraw> {
        self.display_region
    }

    /// Mark a region needing display, merged with anything pending
    pub fn set_needs_display(&mut self, redraw: Redraw) {
        self.display_region = Some(match self.display_region {
            Some(pending) => pending.union(redraw),
            None => redraw,
        });
    }

    fn context<'a>(&self, geometry: &'a dyn GeometryProvider, cross_hair: Option<Vertex>) -> LayerContext<'a> {
        LayerContext { geometry, tile_rect: self.rect, cross_hair }
    }

    /// Bind the tile to a coordinate.
    ///
    /// Old pixels are discarded and every delegate becomes fully dirty,
    /// whether the tile is fresh or reused.
    pub fn attach(&mut self, coord: TileCoord, geometry: &dyn GeometryProvider, cross_hair: Option<Vertex>) {
        self.coord = coord;
        self.rect = geometry.canvas_rect_for_tile(coord);

        self.surface.fill(tiny_skia::Color::TRANSPARENT);
        let cx = self.context(geometry, cross_hair);
        for layer in &mut self.layers {
            layer.backing.fill(tiny_skia::Color::TRANSPARENT);
            layer.delegate.attach(&cx);
        }
        self.display_region = Some(Redraw::WholeTile);
    }

    /// Forward an event to the layer stack. Returns the display request it
    /// caused, if any.
    pub fn notify(
        &mut self,
        event: &BoardEvent,
        geometry: &dyn GeometryProvider,
        cross_hair: Option<Vertex>,
    ) -> Option<Redraw> {
        let cx = self.context(geometry, cross_hair);
        let requested = self
            .layers
            .iter_mut()
            .filter_map(|layer| layer.delegate.notify(event, &cx))
            .reduce(Redraw::union)?;

        self.set_needs_display(requested);
        Some(requested)
    }

    /// Paint dirty layers and composite the pending region. Returns the
    /// number of layers painted.
    pub fn display(&mut self, cx: &mut PaintContext<'_>) -> usize {
        let Some(redraw) = self.display_region.take() else {
            return 0;
        };

        let mut painted = 0;
        for layer in &mut self.layers {
            if layer.delegate.paint(&mut layer.backing, self.rect, cx) {
                painted += 1;
            }
        }

        let region = redraw.resolve(self.bounds());
        composite(&mut self.surface, self.layers.iter().map(|layer| &layer.backing), region);

        tracing::trace!("Displayed tile {:?}: {} layers over {:?}", self.coord, painted, region);
        painted
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("coord", &self.coord)
            .field("rect", &self.rect)
            .field("layers", &self.layers.iter().map(|l| &l.delegate).collect::<Vec<_>>())
            .field("display_region", &self.display_region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawableCache, SkiaArtwork};
    use goban_board::{Board, StoneColor};
    use goban_geometry::BoardMetrics;

    fn metrics() -> BoardMetrics {
        BoardMetrics::new(9, 20.0, 100)
    }

    fn attached(metrics: &BoardMetrics) -> Tile {
        let coord = TileCoord::new(0, 0);
        let mut tile = Tile::new(coord, Rect::EMPTY, &LayerKind::DEFAULT_STACK, 100).unwrap();
        tile.attach(coord, metrics, None);
        tile
    }

    #[test]
    fn test_attach_marks_all_fully_dirty() {
        let metrics = metrics();
        let tile = attached(&metrics);
        assert_eq!(tile.rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tile.display_region(), Some(Redraw::WholeTile));
        assert!(tile.delegates().all(|d| d.state().is_fully_dirty()));
    }

    #[test]
    fn test_display_cleans_everything() {
        let metrics = metrics();
        let board = Board::new(9).unwrap();
        let artwork = SkiaArtwork::default();
        let mut cache = DrawableCache::new();
        let mut tile = attached(&metrics);

        let mut cx = PaintContext { geometry: &metrics, board: &board, cache: &mut cache, artwork: &artwork };
        assert_eq!(tile.display(&mut cx), 4);
        assert!(!tile.needs_display());
        assert!(tile.delegates().all(|d| !d.is_dirty()));

        // Nothing left to do
        assert_eq!(tile.display(&mut cx), 0);
    }

    #[test]
    fn test_notify_merges_display_region() {
        let metrics = metrics();
        let board = Board::new(9).unwrap();
        let artwork = SkiaArtwork::default();
        let mut cache = DrawableCache::new();
        let mut tile = attached(&metrics);
        let mut cx = PaintContext { geometry: &metrics, board: &board, cache: &mut cache, artwork: &artwork };
        tile.display(&mut cx);

        // A1 sits at canvas (20, 180): off this tile
        let off = BoardEvent::stone_placed(Vertex::new(0, 0), StoneColor::Black);
        assert_eq!(tile.notify(&off, &metrics, None), None);
        assert!(!tile.needs_display());

        // A9 sits at canvas (20, 20)
        let on = BoardEvent::stone_placed(Vertex::new(0, 8), StoneColor::Black);
        let expected = Redraw::Region(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(tile.notify(&on, &metrics, None), Some(expected));
        assert_eq!(tile.display_region(), Some(expected));
    }
}
