//! Drawable cache
//!
//! Pre-rendered cell-sized artwork shared by every tile. The cache owns each
//! drawable exclusively; paint routines borrow one for the duration of a
//! single draw call. Entries are only ever dropped by `set` (replacement) or
//! by explicit invalidation, never recomputed behind the caller's back.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use goban_board::{MarkerKind, StoneColor};
use goban_geometry::GeometryProvider;
use tiny_skia::Pixmap;

use crate::{ArtworkRenderer, RenderError};

/// Artwork type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkKind {
    Stone(StoneColor),
    /// Translucent stone under the cross-hair
    CrossHairStone(StoneColor),
    StarPoint,
    /// Marker symbol, colored to contrast with the stone beneath it
    Marker { marker: MarkerKind, on: Option<StoneColor> },
}

/// A piece of pre-rendered artwork
pub struct Drawable {
    kind: ArtworkKind,
    pixmap: Pixmap,
}

impl Drawable {
    pub fn new(kind: ArtworkKind, pixmap: Pixmap) -> Self {
        Self { kind, pixmap }
    }

    pub fn kind(&self) -> ArtworkKind {
        self.kind
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Memory size in bytes
    pub fn memory_size(&self) -> usize {
        self.pixmap.data().len()
    }
}

impl fmt::Debug for Drawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawable")
            .field("kind", &self.kind)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub invalidations: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 { 0.0 } else { self.hits as f64 / lookups as f64 }
    }
}

/// Store of pre-rendered artwork keyed by type.
///
/// Not synchronized; only the rendering pass touches it.
#[derive(Default)]
pub struct DrawableCache {
    entries: HashMap<ArtworkKind, Drawable>,
    stats: CacheStats,
}

impl DrawableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up artwork without side effects
    pub fn get(&self, kind: ArtworkKind) -> Option<&Drawable> {
        self.entries.get(&kind)
    }

    /// Store artwork, dropping any previous entry of the same type
    pub fn set(&mut self, kind: ArtworkKind, drawable: Drawable) {
        self.stats.insertions += 1;
        if self.entries.insert(kind, drawable).is_some() {
            tracing::trace!("Replaced cached artwork {:?}", kind);
        }
    }

    /// Drop one entry. Returns `true` if there was one.
    pub fn invalidate(&mut self, kind: ArtworkKind) -> bool {
        let removed = self.entries.remove(&kind).is_some();
        if removed {
            self.stats.invalidations += 1;
        }
        removed
    }

    /// Drop every entry
    pub fn invalidate_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        tracing::debug!("Invalidating {} cached drawables", self.entries.len());
        self.stats.invalidations += self.entries.len() as u64;
        self.entries.clear();
    }

    /// Look up artwork, rendering and storing it on a miss.
    ///
    /// Render failures are returned and nothing is stored, so the next call
    /// tries again.
    pub fn get_or_render(
        &mut self,
        kind: ArtworkKind,
        renderer: &dyn ArtworkRenderer,
        geometry: &dyn GeometryProvider,
    ) -> Result<&Drawable, RenderError> {
        match self.entries.entry(kind) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let drawable = renderer.render(kind, geometry)?;
                tracing::debug!(
                    "Rendered {:?} ({}x{})",
                    kind, drawable.width(), drawable.height()
                );
                self.stats.insertions += 1;
                Ok(entry.insert(drawable))
            }
        }
    }

    pub fn contains(&self, kind: ArtworkKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes held by cached drawables
    pub fn memory_usage(&self) -> usize {
        self.entries.values().map(Drawable::memory_size).sum()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl fmt::Debug for DrawableCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawableCache")
            .field("entries", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkiaArtwork;
    use goban_geometry::BoardMetrics;

    fn drawable(kind: ArtworkKind, size: u32) -> Drawable {
        Drawable::new(kind, Pixmap::new(size, size).unwrap())
    }

    const BLACK: ArtworkKind = ArtworkKind::Stone(StoneColor::Black);
    const WHITE: ArtworkKind = ArtworkKind::Stone(StoneColor::White);

    #[test]
    fn test_get_returns_same_drawable() {
        let mut cache = DrawableCache::new();
        cache.set(BLACK, drawable(BLACK, 8));

        let first = cache.get(BLACK).unwrap() as *const Drawable;
        let second = cache.get(BLACK).unwrap() as *const Drawable;
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_replaces_entry() {
        let mut cache = DrawableCache::new();
        cache.set(BLACK, drawable(BLACK, 8));
        cache.set(BLACK, drawable(BLACK, 16));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(BLACK).unwrap().width(), 16);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = DrawableCache::new();
        cache.set(BLACK, drawable(BLACK, 8));
        cache.set(WHITE, drawable(WHITE, 8));

        assert!(cache.invalidate(BLACK));
        assert!(!cache.invalidate(BLACK));
        assert!(cache.get(BLACK).is_none());
        assert!(cache.get(WHITE).is_some());

        cache.invalidate_all();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 2);
    }

    #[test]
    fn test_get_or_render_counts_misses_once() {
        let metrics = BoardMetrics::new(9, 20.0, 64);
        let artwork = SkiaArtwork::default();
        let mut cache = DrawableCache::new();

        let first = cache.get_or_render(WHITE, &artwork, &metrics).unwrap() as *const Drawable;
        let second = cache.get_or_render(WHITE, &artwork, &metrics).unwrap() as *const Drawable;
        assert_eq!(first, second);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.get(WHITE).unwrap().width(), 20);
        assert_eq!(cache.stats().hit_rate(), 0.5);
        assert_eq!(cache.memory_usage(), 20 * 20 * 4);
    }
}
