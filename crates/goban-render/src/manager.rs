//! Tile manager
//!
//! Keeps exactly the tiles that intersect the viewport attached, recycles the
//! rest through a [`TilePool`], and broadcasts board events to every attached
//! tile. Tiles are kept in a `BTreeMap`, so iteration (and painting) is in
//! row-major coordinate order.

use std::collections::{BTreeMap, BTreeSet};

use goban_board::Vertex;
use goban_geometry::{GeometryProvider, Rect, TileCoord};

use crate::layer::{LayerKind, PaintContext};
use crate::{BoardEvent, Redraw, RenderError, Tile, TilePool, TilePoolStats};

/// Tiles attached and detached by a viewport change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportChange {
    pub attached: Vec<TileCoord>,
    pub detached: Vec<TileCoord>,
}

impl ViewportChange {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }
}

/// Work done by one paint pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub tiles_painted: usize,
    pub layers_painted: usize,
}

/// Tile manager statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileManagerStats {
    /// Tiles currently attached
    pub attached: usize,
    /// Parked tiles and pool traffic
    pub pool: TilePoolStats,
    /// Tiles allocated over the manager's lifetime
    pub allocated: u64,
    /// Attaches served from the pool
    pub reused: u64,
    /// Tiles detached into the pool
    pub recycled: u64,
}

/// Owner of all visible tiles
#[derive(Debug)]
pub struct TileManager {
    tiles: BTreeMap<TileCoord, Tile>,
    pool: TilePool,
    layer_kinds: Vec<LayerKind>,
    tile_size: u32,
    viewport: Rect,
    cross_hair: Option<Vertex>,
    allocated: u64,
    reused: u64,
    recycled: u64,
}

impl TileManager {
    /// Create a manager for square tiles of `tile_size` pixels with the
    /// given layer stack (back to front).
    pub fn new(tile_size: u32, layer_kinds: Vec<LayerKind>, max_pooled: usize) -> Self {
        assert!(tile_size > 0, "tile size must be positive");
        Self {
            tiles: BTreeMap::new(),
            pool: TilePool::new(max_pooled),
            layer_kinds,
            tile_size,
            viewport: Rect::EMPTY,
            cross_hair: None,
            allocated: 0,
            reused: 0,
            recycled: 0,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn layer_kinds(&self) -> &[LayerKind] {
        &self.layer_kinds
    }

    /// Canvas rect currently shown
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Point last reported under the cross-hair
    pub fn cross_hair(&self) -> Option<Vertex> {
        self.cross_hair
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// Attached tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Show a new canvas rect.
    ///
    /// Tiles that no longer intersect it are detached into the pool; newly
    /// needed coordinates take a tile from the pool (or allocate one) and
    /// attach it fully dirty.
    pub fn set_viewport(
        &mut self,
        viewport: Rect,
        geometry: &dyn GeometryProvider,
    ) -> Result<ViewportChange, RenderError> {
        debug_assert_eq!(geometry.tile_size(), self.tile_size as f32, "geometry tile size mismatch");
        self.viewport = viewport;

        let required: BTreeSet<TileCoord> = geometry.tiles_in_rect(viewport).into_iter().collect();
        let mut change = ViewportChange::default();

        let leaving: Vec<TileCoord> = self.tiles.keys().filter(|c| !required.contains(c)).copied().collect();
        for coord in leaving {
            if let Some(tile) = self.tiles.remove(&coord) {
                self.pool.checkin(tile);
                self.recycled += 1;
                change.detached.push(coord);
            }
        }

        for &coord in &required {
            if self.tiles.contains_key(&coord) {
                continue;
            }
            let mut tile = match self.pool.checkout() {
                Some(tile) => {
                    self.reused += 1;
                    tile
                }
                None => {
                    self.allocated += 1;
                    let rect = geometry.canvas_rect_for_tile(coord);
                    Tile::new(coord, rect, &self.layer_kinds, self.tile_size)?
                }
            };
            tile.attach(coord, geometry, self.cross_hair);
            self.tiles.insert(coord, tile);
            change.attached.push(coord);
        }

        if !change.is_empty() {
            tracing::debug!(
                "Viewport {:?}: attached {}, detached {}, {} visible, pool hit rate {:.2}",
                viewport,
                change.attached.len(),
                change.detached.len(),
                self.tiles.len(),
                self.pool.stats().hit_rate()
            );
        }
        Ok(change)
    }

    /// Recompute the visible tiles for the current viewport, e.g. after the
    /// canvas grew or shrank
    pub fn refresh(&mut self, geometry: &dyn GeometryProvider) -> Result<ViewportChange, RenderError> {
        self.set_viewport(self.viewport, geometry)
    }

    /// Broadcast an event to every attached tile. Returns the number of tiles
    /// that requested display.
    pub fn notify(&mut self, event: &BoardEvent, geometry: &dyn GeometryProvider) -> usize {
        if let BoardEvent::CrossHairChanged(point) = *event {
            self.cross_hair = point;
        }
        if matches!(event, BoardEvent::BoardReset) {
            self.cross_hair = None;
        }

        let cross_hair = self.cross_hair;
        self.tiles
            .values_mut()
            .filter_map(|tile| tile.notify(event, geometry, cross_hair))
            .count()
    }

    /// Regions waiting to be displayed, by tile
    pub fn pending_display(&self) -> Vec<(TileCoord, Redraw)> {
        self.tiles
            .iter()
            .filter_map(|(&coord, tile)| tile.display_region().map(|redraw| (coord, redraw)))
            .collect()
    }

    /// Whether any tile needs display
    pub fn needs_display(&self) -> bool {
        self.tiles.values().any(Tile::needs_display)
    }

    /// Paint every tile that needs display
    pub fn display(&mut self, cx: &mut PaintContext<'_>) -> FrameStats {
        let mut stats = FrameStats::default();
        for tile in self.tiles.values_mut() {
            if !tile.needs_display() {
                continue;
            }
            stats.layers_painted += tile.display(cx);
            stats.tiles_painted += 1;
        }
        if stats.tiles_painted > 0 {
            tracing::trace!("Frame: {:?}", stats);
        }
        stats
    }

    /// Drop every parked tile
    pub fn clear_pool(&mut self) {
        self.pool.clear();
    }

    pub fn stats(&self) -> TileManagerStats {
        TileManagerStats {
            attached: self.tiles.len(),
            pool: self.pool.stats(),
            allocated: self.allocated,
            reused: self.reused,
            recycled: self.recycled,
        }
    }
}
