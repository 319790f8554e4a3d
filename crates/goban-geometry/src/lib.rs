//! Goban Geometry - Board To Canvas Mapping
//!
//! The board is drawn on a logical canvas that is split into square tiles.
//! This crate provides:
//! - `Rect`/`Size` rectangle algebra used for dirty regions
//! - `TileCoord` tile grid coordinates
//! - The `GeometryProvider` interface consumed by the renderer
//! - `BoardMetrics`, a reference metrics service with zoom support

mod metrics;
mod rect;

pub use metrics::BoardMetrics;
pub use rect::{Rect, Size};

use goban_board::Vertex;

/// Tile grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub row: u32,
    pub col: u32,
}

impl TileCoord {
    pub fn new(col: u32, row: u32) -> Self {
        Self { row, col }
    }
}

/// Maps logical board coordinates to canvas rectangles and back.
///
/// Implementors supply the primitive measurements; the tile and rectangle
/// helpers are derived from them.
pub trait GeometryProvider {
    /// Number of lines on each side of the board
    fn board_size(&self) -> u8;

    /// Edge length of one (square) tile
    fn tile_size(&self) -> f32;

    /// Size of the whole canvas at the current scale
    fn canvas_size(&self) -> Size;

    /// Distance between two adjacent lines, also the size of one stone
    fn cell_size(&self) -> f32;

    /// Width of a grid line
    fn line_width(&self) -> f32;

    /// Canvas position of an intersection
    fn point_position(&self, point: Vertex) -> (f32, f32);

    /// Intersection nearest to a canvas position, if it lies on the board
    fn point_at(&self, x: f32, y: f32) -> Option<Vertex>;

    /// Canvas rect of a feature drawn on a point: one cell centered on the
    /// intersection
    fn canvas_rect_for_point(&self, point: Vertex) -> Rect {
        let (cx, cy) = self.point_position(point);
        let cell = self.cell_size();
        Rect::new(cx - cell / 2.0, cy - cell / 2.0, cell, cell)
    }

    /// Canvas rect covered by a tile
    fn canvas_rect_for_tile(&self, coord: TileCoord) -> Rect {
        let size = self.tile_size();
        Rect::new(coord.col as f32 * size, coord.row as f32 * size, size, size)
    }

    /// Clip a canvas rect to a tile and express it in tile-local coordinates
    fn tile_local_rect(&self, canvas_rect: Rect, tile_rect: Rect) -> Rect {
        let clipped = canvas_rect.intersection(&tile_rect);
        if clipped.is_empty() {
            return Rect::EMPTY;
        }
        clipped.translate(-tile_rect.x, -tile_rect.y)
    }

    /// Number of tile columns and rows needed to cover the canvas
    fn tile_grid(&self) -> (u32, u32) {
        let size = self.tile_size();
        let canvas = self.canvas_size();
        (
            (canvas.width / size).ceil().max(0.0) as u32,
            (canvas.height / size).ceil().max(0.0) as u32,
        )
    }

    /// Tiles intersecting a canvas rect, row by row
    fn tiles_in_rect(&self, rect: Rect) -> Vec<TileCoord> {
        let visible = rect.intersection(&Rect::from_size(self.canvas_size()));
        if visible.is_empty() {
            return Vec::new();
        }

        let size = self.tile_size();
        let (cols, rows) = self.tile_grid();
        let start_col = (visible.x / size).floor() as u32;
        let start_row = (visible.y / size).floor() as u32;
        let end_col = ((visible.right() / size).ceil() as u32).min(cols);
        let end_row = ((visible.bottom() / size).ceil() as u32).min(rows);

        let mut coords = Vec::new();
        for row in start_row..end_row {
            for col in start_col..end_col {
                coords.push(TileCoord::new(col, row));
            }
        }
        coords
    }

    /// Intersections whose feature rect overlaps a canvas rect
    fn points_in_rect(&self, rect: Rect) -> Vec<Vertex> {
        Vertex::all(self.board_size())
            .filter(|&v| self.canvas_rect_for_point(v).intersects(&rect))
            .collect()
    }
}

/// Traditional star points ("hoshi") for a board size
pub fn star_points(board_size: u8) -> Vec<Vertex> {
    if board_size < 7 {
        return Vec::new();
    }

    let edge = if board_size >= 13 { 3 } else { 2 };
    let far = board_size - 1 - edge;
    let center = board_size / 2;
    let odd = board_size % 2 == 1;

    let mut lines = vec![edge, far];
    if odd && board_size >= 15 {
        lines.insert(1, center);
    }

    let mut points: Vec<Vertex> = lines
        .iter()
        .flat_map(|&y| lines.iter().map(move |&x| Vertex::new(x, y)))
        .collect();

    if odd && board_size < 15 {
        points.push(Vertex::new(center, center));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_points() {
        assert_eq!(star_points(19).len(), 9);
        assert!(star_points(19).contains(&Vertex::new(9, 9)));
        assert!(star_points(19).contains(&Vertex::new(3, 15)));

        let nine = star_points(9);
        assert_eq!(nine.len(), 5);
        assert!(nine.contains(&Vertex::new(2, 6)));
        assert!(nine.contains(&Vertex::new(4, 4)));

        assert_eq!(star_points(13).len(), 5);
        assert!(star_points(5).is_empty());
    }

    #[test]
    fn test_tile_coord_order_is_row_major() {
        let mut coords = vec![TileCoord::new(1, 0), TileCoord::new(0, 1), TileCoord::new(0, 0)];
        coords.sort();
        assert_eq!(coords, vec![TileCoord::new(0, 0), TileCoord::new(1, 0), TileCoord::new(0, 1)]);
    }
}
