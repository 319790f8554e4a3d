//! Dirty-rect state machine
//!
//! Every layer delegate owns one `DirtyState`. It is either clean or dirty;
//! a dirty state carries at most one pending rectangle (tile-local), or no
//! rectangle at all, meaning the whole tile. The "needs redraw" flag and the
//! rectangle are separate fields so that "whole tile" can never be confused
//! with "nothing to do".
//!
//! Single-feature layers (the cross-hair) describe their geometry with
//! `Damage::Track`; the state keeps the rect drawn by the last completed paint
//! and the rect requested since, and derives the region that must be repainted
//! to erase the old content and draw the new one. Multi-feature layers report
//! `Damage::Region` and simply accumulate.

use goban_geometry::Rect;

/// What a notification did to a layer's content
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Damage {
    /// Nothing this layer draws changed
    None,
    /// The single tracked feature now occupies this tile-local rect (empty if
    /// absent or off-tile)
    Track(Rect),
    /// Content inside this tile-local rect changed
    Region(Rect),
    /// Everything must be redrawn
    WholeTile,
    /// Everything must be redrawn and the tracked feature now occupies this
    /// tile-local rect
    Retrack(Rect),
}

/// Region a layer or tile must repaint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Redraw {
    Region(Rect),
    WholeTile,
}

impl Redraw {
    /// Merge two requests into the smallest covering request
    pub fn union(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Region(a), Redraw::Region(b)) => Redraw::Region(a.union(&b)),
            _ => Redraw::WholeTile,
        }
    }

    /// Resolve to a concrete rect inside the given bounds
    pub fn resolve(self, bounds: Rect) -> Rect {
        match self {
            Redraw::Region(rect) => rect.intersection(&bounds),
            Redraw::WholeTile => bounds,
        }
    }
}

/// Per-layer dirty tracking
#[derive(Debug, Clone, PartialEq)]
pub struct DirtyState {
    needs_redraw: bool,
    /// `None` while dirty means the whole tile
    region: Option<Rect>,
    /// Rect covered by the tracked feature at the last completed paint
    drawn: Rect,
    /// Rect the tracked feature has been moved to since
    target: Rect,
}

impl Default for DirtyState {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyState {
    /// Clean state with nothing drawn
    pub fn new() -> Self {
        Self {
            needs_redraw: false,
            region: None,
            drawn: Rect::EMPTY,
            target: Rect::EMPTY,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.needs_redraw
    }

    /// Whole-tile redraw pending
    pub fn is_fully_dirty(&self) -> bool {
        self.needs_redraw && self.region.is_none()
    }

    /// Pending redraw, if any
    pub fn pending(&self) -> Option<Redraw> {
        if !self.needs_redraw {
            return None;
        }
        Some(match self.region {
            Some(rect) => Redraw::Region(rect),
            None => Redraw::WholeTile,
        })
    }

    /// Region painted for the tracked feature by the last completed paint
    pub fn previous_drawing_rect(&self) -> Rect {
        self.drawn
    }

    /// Region the tracked feature will occupy after the next paint
    pub fn target_rect(&self) -> Rect {
        self.target
    }

    /// Apply a notification's damage.
    ///
    /// Returns the redraw request to forward to the tile, or `None` if the
    /// damage was a no-op or is already covered by a pending whole-tile
    /// redraw.
    pub fn apply(&mut self, damage: Damage, bounds: Rect) -> Option<Redraw> {
        match damage {
            Damage::None => None,
            Damage::Track(rect) => self.track(rect.intersection(&bounds)),
            Damage::Region(rect) => self.mark_region(rect.intersection(&bounds)),
            Damage::WholeTile => self.mark_whole_tile(),
            Damage::Retrack(rect) => {
                self.target = rect.intersection(&bounds);
                self.mark_whole_tile()
            }
        }
    }

    fn track(&mut self, new_rect: Rect) -> Option<Redraw> {
        if new_rect == self.target {
            return None;
        }
        // Erase what is on screen, draw the new geometry
        let dirty = self.drawn.union(&new_rect);
        self.target = new_rect;
        self.mark_region(dirty)
    }

    /// Accumulate a region; empty regions are ignored
    pub fn mark_region(&mut self, rect: Rect) -> Option<Redraw> {
        if rect.is_empty() {
            return None;
        }
        if !self.needs_redraw {
            self.needs_redraw = true;
            self.region = Some(rect);
            return Some(Redraw::Region(rect));
        }
        match self.region {
            // Already covers the whole tile
            None => None,
            Some(pending) => {
                let merged = pending.union(&rect);
                self.region = Some(merged);
                (merged != pending).then_some(Redraw::Region(rect))
            }
        }
    }

    /// Request a whole-tile redraw
    pub fn mark_whole_tile(&mut self) -> Option<Redraw> {
        if self.is_fully_dirty() {
            return None;
        }
        self.needs_redraw = true;
        self.region = None;
        Some(Redraw::WholeTile)
    }

    /// Forget everything on screen and request a whole-tile redraw. Used when
    /// the backing surface no longer holds this layer's pixels.
    pub fn reset(&mut self, target: Rect) {
        self.drawn = Rect::EMPTY;
        self.target = target;
        self.needs_redraw = true;
        self.region = None;
    }

    /// Start a paint: return the pending redraw and become clean.
    ///
    /// The tracked target becomes the drawn rect, so call this only when the
    /// paint is actually going to happen.
    pub fn take(&mut self) -> Option<Redraw> {
        let redraw = self.pending()?;
        self.needs_redraw = false;
        self.region = None;
        self.drawn = self.target;
        Some(redraw)
    }
}
