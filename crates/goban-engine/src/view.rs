//! Board view - main entry point
//!
//! Owns the board, its metrics, the drawable cache and the tile manager, and
//! turns user-level operations into board mutations followed by event
//! broadcasts. Artwork is invalidated before `ScaleChanged`/`AssetsChanged`
//! go out, so the next paint pass re-renders it at the new scale or theme.

use goban_board::{Board, BoardError, BoardState, MarkerKind, StoneColor, Vertex};
use goban_geometry::{BoardMetrics, GeometryProvider, Rect, Size};
use goban_render::{
    BoardEvent, DrawableCache, FrameStats, PaintContext, RenderError, SkiaArtwork, Theme, TileManager,
    ViewportChange,
};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::{Config, ConfigError};

/// A scrollable, zoomable view of one board
#[derive(Debug)]
pub struct BoardView {
    config: Config,
    board: Board,
    metrics: BoardMetrics,
    cache: DrawableCache,
    artwork: SkiaArtwork,
    tiles: TileManager,
}

impl BoardView {
    /// Create an empty view. Nothing is visible until a viewport is set.
    pub fn new(config: Config) -> Result<Self, ViewError> {
        config.validate()?;

        let board = Board::new(config.board_size)?;
        let metrics = BoardMetrics::new(config.board_size, config.base_cell_size, config.tile_size)
            .with_scale_range(config.min_scale, config.max_scale);
        let tiles = TileManager::new(config.tile_size, config.layers.clone(), config.max_pooled_tiles);

        tracing::info!(
            "Board view {}x{}: {} px tiles, {} layers",
            config.board_size, config.board_size, config.tile_size, config.layers.len()
        );

        Ok(Self {
            artwork: SkiaArtwork::new(config.theme.clone()),
            config,
            board,
            metrics,
            cache: DrawableCache::new(),
            tiles,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn metrics(&self) -> &BoardMetrics {
        &self.metrics
    }

    pub fn cache(&self) -> &DrawableCache {
        &self.cache
    }

    pub fn tiles(&self) -> &TileManager {
        &self.tiles
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Size of the whole board canvas at the current scale
    pub fn canvas_size(&self) -> Size {
        self.metrics.canvas_size()
    }

    pub fn viewport(&self) -> Rect {
        self.tiles.viewport()
    }

    pub fn cross_hair(&self) -> Option<Vertex> {
        self.tiles.cross_hair()
    }

    fn broadcast(&mut self, event: BoardEvent) {
        let tiles = self.tiles.notify(&event, &self.metrics);
        tracing::trace!("{:?} reached {} tiles", event, tiles);
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    /// Show a canvas rect
    pub fn set_viewport(&mut self, viewport: Rect) -> Result<ViewportChange, ViewError> {
        Ok(self.tiles.set_viewport(viewport, &self.metrics)?)
    }

    /// Move the viewport by an offset
    pub fn scroll_by(&mut self, dx: f32, dy: f32) -> Result<ViewportChange, ViewError> {
        let viewport = self.viewport().translate(dx, dy);
        self.set_viewport(viewport)
    }

    /// Change the zoom scale. Returns `true` if the canvas geometry changed.
    pub fn zoom(&mut self, scale: f32) -> Result<bool, ViewError> {
        if !self.metrics.set_scale(scale) {
            return Ok(false);
        }
        self.drop_artwork();
        self.broadcast(BoardEvent::ScaleChanged);
        self.tiles.refresh(&self.metrics)?;
        Ok(true)
    }

    /// Swap the color theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.artwork.set_theme(theme.clone());
        self.config.theme = theme;
        self.drop_artwork();
        self.broadcast(BoardEvent::AssetsChanged);
    }

    fn drop_artwork(&mut self) {
        tracing::debug!(
            "Dropping {} drawables ({} bytes, hit rate {:.2})",
            self.cache.len(),
            self.cache.memory_usage(),
            self.cache.stats().hit_rate()
        );
        self.cache.invalidate_all();
    }

    // ========================================================================
    // Board
    // ========================================================================

    /// Play a move for the side to move.
    ///
    /// A cross-hair on the played point is hidden; anywhere else it is
    /// repainted for the new side to move.
    pub fn play(&mut self, point: Vertex) -> Result<StoneColor, ViewError> {
        let (color, previous) = self.board.play(point)?;
        self.broadcast(BoardEvent::stone_placed(point, color));
        if let Some(previous) = previous {
            self.broadcast(BoardEvent::marker_removed(previous, MarkerKind::LastMove));
        }
        self.broadcast(BoardEvent::marker_placed(point, MarkerKind::LastMove));
        if self.cross_hair() == Some(point) {
            self.broadcast(BoardEvent::CrossHairChanged(None));
        } else {
            self.redraw_cross_hair();
        }
        Ok(color)
    }

    /// Put a setup stone on an empty point
    pub fn place_stone(&mut self, point: Vertex, color: StoneColor) -> Result<(), ViewError> {
        self.board.place(point, color)?;
        self.broadcast(BoardEvent::stone_placed(point, color));
        Ok(())
    }

    /// Remove a stone, returning its color
    pub fn remove_stone(&mut self, point: Vertex) -> Result<Option<StoneColor>, ViewError> {
        let was_last_move = self.board.last_move() == Some(point);
        let Some(color) = self.board.remove(point)? else {
            return Ok(None);
        };
        self.broadcast(BoardEvent::stone_removed(point, color));
        if was_last_move {
            self.broadcast(BoardEvent::marker_removed(point, MarkerKind::LastMove));
        }
        Ok(Some(color))
    }

    /// Set or clear a marker, returning the previous one
    pub fn set_marker(&mut self, point: Vertex, marker: Option<MarkerKind>) -> Result<Option<MarkerKind>, ViewError> {
        let previous = self.board.set_marker(point, marker)?;
        if previous == marker {
            return Ok(previous);
        }
        if let Some(old) = previous {
            self.broadcast(BoardEvent::marker_removed(point, old));
        }
        if let Some(new) = marker {
            self.broadcast(BoardEvent::marker_placed(point, new));
        }
        Ok(previous)
    }

    /// Override the side to move (changes the cross-hair stone)
    pub fn set_next_color(&mut self, color: StoneColor) {
        if self.board.next_color() == color {
            return;
        }
        self.board.set_next_color(color);
        self.redraw_cross_hair();
    }

    /// Highlight a point, or hide the cross-hair
    pub fn set_cross_hair(&mut self, point: Option<Vertex>) -> Result<(), ViewError> {
        if let Some(point) = point {
            if !self.board.contains(point) {
                return Err(BoardError::OutOfRange { vertex: point, size: self.board.size() }.into());
            }
        }
        self.broadcast(BoardEvent::CrossHairChanged(point));
        Ok(())
    }

    /// Move the cross-hair to the point nearest a canvas position. Returns the
    /// highlighted point.
    pub fn hover(&mut self, x: f32, y: f32) -> Option<Vertex> {
        let point = self.metrics.point_at(x, y);
        self.broadcast(BoardEvent::CrossHairChanged(point));
        point
    }

    /// Empty the board
    pub fn reset(&mut self) {
        self.board.clear();
        self.broadcast(BoardEvent::BoardReset);
    }

    /// The cross-hair stone shows the side to move; repaint it in place
    fn redraw_cross_hair(&mut self) {
        if let Some(point) = self.cross_hair() {
            self.broadcast(BoardEvent::CrossHairChanged(None));
            self.broadcast(BoardEvent::CrossHairChanged(Some(point)));
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Whether a paint pass has work to do
    pub fn needs_render(&self) -> bool {
        self.tiles.needs_display()
    }

    /// Run one paint pass over every tile needing display
    pub fn render(&mut self) -> FrameStats {
        let mut cx = PaintContext {
            geometry: &self.metrics,
            board: &self.board,
            cache: &mut self.cache,
            artwork: &self.artwork,
        };
        self.tiles.display(&mut cx)
    }

    /// Paint pending changes and composite the visible tiles into one
    /// viewport-sized image
    pub fn snapshot(&mut self) -> Result<Pixmap, ViewError> {
        self.render();

        let viewport = self.viewport().round_out();
        let (width, height) = (viewport.width as u32, viewport.height as u32);
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;

        for tile in self.tiles.tiles() {
            let origin = tile.rect().translate(-viewport.x, -viewport.y);
            pixmap.draw_pixmap(
                origin.x.round() as i32,
                origin.y.round() as i32,
                tile.surface().as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        Ok(pixmap)
    }
}

/// Board view errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
