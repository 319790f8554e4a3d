//! Tile reuse pool
//!
//! Tiles leaving the viewport are parked here, detached from their
//! coordinate, and handed out again when a new coordinate becomes visible.
//! A reused tile keeps its allocated surfaces; its delegates are reset on
//! attach.

use crate::Tile;

/// Bounded pool of detached tiles
#[derive(Debug)]
pub struct TilePool {
    free: Vec<Tile>,
    max_pooled: usize,
    hits: u64,
    misses: u64,
    dropped: u64,
}

impl TilePool {
    /// Create a pool holding at most `max_pooled` tiles
    pub fn new(max_pooled: usize) -> Self {
        Self {
            free: Vec::with_capacity(max_pooled),
            max_pooled,
            hits: 0,
            misses: 0,
            dropped: 0,
        }
    }

    /// Take a parked tile, if any
    pub fn checkout(&mut self) -> Option<Tile> {
        match self.free.pop() {
            Some(tile) => {
                self.hits += 1;
                Some(tile)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Park a detached tile. Dropped when the pool is full.
    pub fn checkin(&mut self, tile: Tile) {
        if self.free.len() >= self.max_pooled {
            self.dropped += 1;
            tracing::debug!("Tile pool full, dropping tile from {:?}", tile.coord());
            return;
        }
        self.free.push(tile);
    }

    /// Drop every parked tile
    pub fn clear(&mut self) {
        self.free.clear();
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_pooled
    }

    pub fn stats(&self) -> TilePoolStats {
        TilePoolStats {
            pooled: self.free.len(),
            hits: self.hits,
            misses: self.misses,
            dropped: self.dropped,
        }
    }
}

impl Default for TilePool {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Tile pool statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TilePoolStats {
    pub pooled: usize,
    pub hits: u64,
    pub misses: u64,
    pub dropped: u64,
}

impl TilePoolStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
