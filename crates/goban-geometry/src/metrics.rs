//! Board metrics
//!
//! Reference `GeometryProvider`. The grid is surrounded by a margin of one
//! cell; cell sizes are kept even so that every feature rect lands on whole
//! pixels. Derived values are recomputed eagerly whenever the scale changes.

use goban_board::Vertex;

use crate::{GeometryProvider, Size};

/// Smallest cell size in pixels
const MIN_CELL_SIZE: f32 = 2.0;

/// Board-to-canvas metrics at a given zoom scale
#[derive(Debug, Clone, PartialEq)]
pub struct BoardMetrics {
    board_size: u8,
    base_cell_size: f32,
    tile_size: u32,
    scale: f32,
    min_scale: f32,
    max_scale: f32,
    // Derived
    cell_size: f32,
    canvas_size: Size,
    line_width: f32,
}

impl BoardMetrics {
    /// Create metrics at scale 1.0.
    ///
    /// Sizes must be validated by the caller; zero sizes are a setup bug.
    pub fn new(board_size: u8, base_cell_size: f32, tile_size: u32) -> Self {
        assert!(board_size > 1, "board size must be at least 2");
        assert!(base_cell_size.is_finite() && base_cell_size > 0.0, "cell size must be positive");
        assert!(tile_size > 0, "tile size must be positive");

        let mut metrics = Self {
            board_size,
            base_cell_size,
            tile_size,
            scale: 1.0,
            min_scale: 1.0,
            max_scale: 1.0,
            cell_size: 0.0,
            canvas_size: Size::default(),
            line_width: 0.0,
        };
        metrics.update_derived();
        metrics
    }

    /// Allow zooming within a range
    pub fn with_scale_range(mut self, min_scale: f32, max_scale: f32) -> Self {
        assert!(min_scale > 0.0 && min_scale <= max_scale, "invalid scale range");
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale = self.scale.clamp(min_scale, max_scale);
        self.update_derived();
        self
    }

    /// Current zoom scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Allowed zoom range
    pub fn scale_range(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    /// Change the zoom scale (clamped to the allowed range).
    ///
    /// Returns `true` if the cell size changed, which is the only case in
    /// which any canvas geometry changes.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let old_cell = self.cell_size;
        self.scale = scale.clamp(self.min_scale, self.max_scale);
        self.update_derived();

        let changed = self.cell_size != old_cell;
        if changed {
            tracing::debug!(
                "Scale {:.2}: cell {} px, canvas {}x{}",
                self.scale, self.cell_size, self.canvas_size.width, self.canvas_size.height
            );
        }
        changed
    }

    /// Margin between the canvas edge and the outermost lines
    pub fn margin(&self) -> f32 {
        self.cell_size
    }

    fn update_derived(&mut self) {
        let raw = self.base_cell_size * self.scale;
        self.cell_size = ((raw / 2.0).floor() * 2.0).max(MIN_CELL_SIZE);

        let extent = (self.board_size as f32 - 1.0) * self.cell_size + 2.0 * self.margin();
        self.canvas_size = Size::new(extent, extent);
        self.line_width = (self.cell_size / 20.0).round().max(1.0);
    }
}

impl GeometryProvider for BoardMetrics {
    fn board_size(&self) -> u8 {
        self.board_size
    }

    fn tile_size(&self) -> f32 {
        self.tile_size as f32
    }

    fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn point_position(&self, point: Vertex) -> (f32, f32) {
        let margin = self.margin();
        let row_from_top = (self.board_size - 1).saturating_sub(point.y);
        (
            margin + point.x as f32 * self.cell_size,
            margin + row_from_top as f32 * self.cell_size,
        )
    }

    fn point_at(&self, x: f32, y: f32) -> Option<Vertex> {
        if !crate::Rect::from_size(self.canvas_size).contains_point(x, y) {
            return None;
        }
        let margin = self.margin();
        let col = ((x - margin) / self.cell_size).round();
        let row = ((y - margin) / self.cell_size).round();
        let last = (self.board_size - 1) as f32;

        if !(0.0..=last).contains(&col) || !(0.0..=last).contains(&row) {
            return None;
        }
        Some(Vertex::new(col as u8, (last - row) as u8))
    }

    fn points_in_rect(&self, rect: crate::Rect) -> Vec<Vertex> {
        if rect.is_empty() {
            return Vec::new();
        }

        // A feature at column c spans [margin + (c - 0.5) * cell, margin + (c + 0.5) * cell)
        let margin = self.margin();
        let cell = self.cell_size;
        let last = self.board_size as i32 - 1;
        let lo = |edge: f32| (((edge - margin) / cell) - 0.5).floor() as i32 + 1;
        let hi = |edge: f32| (((edge - margin) / cell) + 0.5).ceil() as i32 - 1;

        let col_range = lo(rect.x).max(0)..=hi(rect.right()).min(last);
        let row_range = lo(rect.y).max(0)..=hi(rect.bottom()).min(last);

        let mut points = Vec::new();
        for row in row_range {
            for col in col_range.clone() {
                points.push(Vertex::new(col as u8, (last - row) as u8));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rect, TileCoord};

    fn metrics() -> BoardMetrics {
        BoardMetrics::new(19, 20.0, 128)
    }

    #[test]
    fn test_canvas_size() {
        let m = metrics();
        // 18 gaps plus one cell of margin on each side
        assert_eq!(m.canvas_size(), Size::new(400.0, 400.0));
        assert_eq!(m.tile_grid(), (4, 4));
    }

    #[test]
    fn test_point_position_bottom_left_origin() {
        let m = metrics();
        assert_eq!(m.point_position(Vertex::new(0, 0)), (20.0, 380.0));
        assert_eq!(m.point_position(Vertex::new(18, 18)), (380.0, 20.0));
        assert_eq!(m.canvas_rect_for_point(Vertex::new(0, 18)), Rect::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn test_point_at() {
        let m = metrics();
        assert_eq!(m.point_at(21.0, 379.0), Some(Vertex::new(0, 0)));
        assert_eq!(m.point_at(200.0, 200.0), Some(Vertex::new(9, 9)));
        assert_eq!(m.point_at(2.0, 2.0), None);
        assert_eq!(m.point_at(399.0, 200.0), None);
        assert_eq!(m.point_at(-1.0, 200.0), None);
        assert_eq!(m.point_at(f32::NAN, 200.0), None);
    }

    #[test]
    fn test_scale_keeps_even_cells() {
        let mut m = metrics().with_scale_range(0.5, 3.0);
        assert!(m.set_scale(1.55));
        assert_eq!(m.cell_size(), 30.0);
        assert!(!m.set_scale(1.52));
        assert!(m.set_scale(10.0));
        assert_eq!(m.scale(), 3.0);
        assert_eq!(m.cell_size(), 60.0);
    }

    #[test]
    fn test_tiles_in_rect() {
        let m = metrics();
        let tiles = m.tiles_in_rect(Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(tiles, vec![TileCoord::new(0, 0), TileCoord::new(1, 0)]);

        // Clipped to the canvas
        let tiles = m.tiles_in_rect(Rect::new(300.0, 300.0, 1000.0, 1000.0));
        assert_eq!(tiles.len(), 4);
        assert!(m.tiles_in_rect(Rect::new(500.0, 500.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_points_in_rect_matches_naive_scan() {
        let m = metrics();
        let rects = [
            Rect::new(0.0, 0.0, 128.0, 128.0),
            Rect::new(128.0, 256.0, 128.0, 128.0),
            Rect::new(29.0, 29.0, 2.0, 2.0),
            Rect::new(30.0, 30.0, 20.0, 20.0),
            Rect::new(390.0, 0.0, 10.0, 400.0),
        ];
        for rect in rects {
            let mut fast = m.points_in_rect(rect);
            let mut naive: Vec<_> = Vertex::all(19)
                .filter(|&v| m.canvas_rect_for_point(v).intersects(&rect))
                .collect();
            fast.sort();
            naive.sort();
            assert_eq!(fast, naive, "{rect:?}");
        }
    }
}
