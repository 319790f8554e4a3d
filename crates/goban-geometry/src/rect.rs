//! Rectangle algebra
//!
//! Canvas and tile-local rectangles share one type. A rectangle with no
//! area is "empty"; every empty rectangle compares equal to `Rect::EMPTY`
//! after passing through `union`/`intersection`.

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// The empty rectangle
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create from edges, empty if inverted
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        if right > left && bottom > top {
            Self::new(left, top, right - left, bottom - top)
        } else {
            Self::EMPTY
        }
    }

    /// Rectangle at the origin with the given size
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// No area (also true for negative sizes)
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if overlaps with another rect
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty() && !other.is_empty() &&
        self.x < other.right() &&
        self.right() > other.x &&
        self.y < other.bottom() &&
        self.bottom() > other.y
    }

    /// Overlapping part of both rects, `EMPTY` if they do not overlap
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.intersects(other) {
            return Rect::EMPTY;
        }
        Rect::from_edges(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Smallest rect containing both.
    ///
    /// An empty operand contributes nothing: the result is the other operand.
    pub fn union(&self, other: &Rect) -> Rect {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Rect::EMPTY,
            (true, false) => *other,
            (false, true) => *self,
            (false, false) => Rect::from_edges(
                self.x.min(other.x),
                self.y.min(other.y),
                self.right().max(other.right()),
                self.bottom().max(other.bottom()),
            ),
        }
    }

    /// Check if `other` lies entirely inside this rect. Empty rects are
    /// contained everywhere.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty() || (
            other.x >= self.x &&
            other.y >= self.y &&
            other.right() <= self.right() &&
            other.bottom() <= self.bottom()
        )
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move by an offset
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow to whole pixels
    pub fn round_out(&self) -> Rect {
        if self.is_empty() {
            return Rect::EMPTY;
        }
        Rect::from_edges(self.x.floor(), self.y.floor(), self.right().ceil(), self.bottom().ceil())
    }
}

/// Width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_with_empty() {
        let r = Rect::new(80.0, 80.0, 20.0, 20.0);
        assert_eq!(r.union(&Rect::EMPTY), r);
        assert_eq!(Rect::EMPTY.union(&r), r);
        assert_eq!(Rect::EMPTY.union(&Rect::EMPTY), Rect::EMPTY);
    }

    #[test]
    fn test_union_bounding_box() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_intersection() {
        let tile = Rect::new(0.0, 0.0, 100.0, 100.0);
        let feature = Rect::new(90.0, 90.0, 20.0, 20.0);
        assert_eq!(tile.intersection(&feature), Rect::new(90.0, 90.0, 10.0, 10.0));

        let outside = Rect::new(100.0, 0.0, 20.0, 20.0);
        assert_eq!(tile.intersection(&outside), Rect::EMPTY);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_round_out() {
        let r = Rect::new(1.5, 2.25, 3.0, 3.5);
        assert_eq!(r.round_out(), Rect::new(1.0, 2.0, 4.0, 4.0));
    }

    #[test]
    fn test_contains_rect() {
        let tile = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(tile.contains_rect(&Rect::new(80.0, 80.0, 20.0, 20.0)));
        assert!(!tile.contains_rect(&Rect::new(80.0, 80.0, 21.0, 20.0)));
        assert!(tile.contains_rect(&Rect::EMPTY));
    }
}
