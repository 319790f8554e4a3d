//! In-memory board
//!
//! Holds stones and markers for a single game position. There are no rules
//! here: no captures, no ko, no suicide checks.

use crate::{BoardError, BoardState, MarkerKind, StoneColor, Vertex, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Minimal board state
#[derive(Debug, Clone)]
pub struct Board {
    size: u8,
    stones: Vec<Option<StoneColor>>,
    markers: Vec<Option<MarkerKind>>,
    next: StoneColor,
    last_move: Option<Vertex>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: u8) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::UnsupportedSize(size));
        }
        let points = size as usize * size as usize;
        Ok(Self {
            size,
            stones: vec![None; points],
            markers: vec![None; points],
            next: StoneColor::Black,
            last_move: None,
        })
    }

    fn check(&self, point: Vertex) -> Result<usize, BoardError> {
        if self.contains(point) {
            Ok(point.index(self.size))
        } else {
            Err(BoardError::OutOfRange { vertex: point, size: self.size })
        }
    }

    /// Play a move for the side to move.
    ///
    /// Returns the color that was played and the previous last move.
    pub fn play(&mut self, point: Vertex) -> Result<(StoneColor, Option<Vertex>), BoardError> {
        let color = self.next;
        self.place(point, color)?;
        let previous = self.last_move.replace(point);
        self.next = color.opposite();
        tracing::trace!("{:?} played {}", color, point);
        Ok((color, previous))
    }

    /// Put a setup stone on an empty point
    pub fn place(&mut self, point: Vertex, color: StoneColor) -> Result<(), BoardError> {
        let idx = self.check(point)?;
        if self.stones[idx].is_some() {
            return Err(BoardError::Occupied(point));
        }
        self.stones[idx] = Some(color);
        Ok(())
    }

    /// Remove a stone, returning it
    pub fn remove(&mut self, point: Vertex) -> Result<Option<StoneColor>, BoardError> {
        let idx = self.check(point)?;
        let removed = self.stones[idx].take();
        if removed.is_some() && self.last_move == Some(point) {
            self.last_move = None;
        }
        Ok(removed)
    }

    /// Set or clear the marker on a point, returning the previous one
    pub fn set_marker(&mut self, point: Vertex, marker: Option<MarkerKind>) -> Result<Option<MarkerKind>, BoardError> {
        let idx = self.check(point)?;
        Ok(std::mem::replace(&mut self.markers[idx], marker))
    }

    /// Remove every stone and marker
    pub fn clear(&mut self) {
        self.stones.fill(None);
        self.markers.fill(None);
        self.next = StoneColor::Black;
        self.last_move = None;
    }

    /// Override the side to move
    pub fn set_next_color(&mut self, color: StoneColor) {
        self.next = color;
    }

    /// Most recent move
    pub fn last_move(&self) -> Option<Vertex> {
        self.last_move
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.stones.iter().filter(|s| s.is_some()).count()
    }
}

impl BoardState for Board {
    fn size(&self) -> u8 {
        self.size
    }

    fn stone_at(&self, point: Vertex) -> Option<StoneColor> {
        self.check(point).ok().and_then(|idx| self.stones[idx])
    }

    /// Explicit markers win over the implicit last-move marker
    fn marker_at(&self, point: Vertex) -> Option<MarkerKind> {
        let idx = self.check(point).ok()?;
        self.markers[idx].or_else(|| {
            (self.last_move == Some(point)).then_some(MarkerKind::LastMove)
        })
    }

    fn next_color(&self) -> StoneColor {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_sizes() {
        assert!(Board::new(19).is_ok());
        assert!(Board::new(25).is_ok());
        assert_eq!(Board::new(1).unwrap_err(), BoardError::UnsupportedSize(1));
        assert_eq!(Board::new(26).unwrap_err(), BoardError::UnsupportedSize(26));
    }

    #[test]
    fn test_play_alternates() {
        let mut board = Board::new(9).unwrap();
        let (first, prev) = board.play(Vertex::new(2, 2)).unwrap();
        assert_eq!(first, StoneColor::Black);
        assert_eq!(prev, None);

        let (second, prev) = board.play(Vertex::new(6, 6)).unwrap();
        assert_eq!(second, StoneColor::White);
        assert_eq!(prev, Some(Vertex::new(2, 2)));
        assert_eq!(board.next_color(), StoneColor::Black);
        assert_eq!(board.stone_count(), 2);
    }

    #[test]
    fn test_last_move_marker() {
        let mut board = Board::new(9).unwrap();
        board.play(Vertex::new(4, 4)).unwrap();
        assert_eq!(board.marker_at(Vertex::new(4, 4)), Some(MarkerKind::LastMove));

        board.set_marker(Vertex::new(4, 4), Some(MarkerKind::Triangle)).unwrap();
        assert_eq!(board.marker_at(Vertex::new(4, 4)), Some(MarkerKind::Triangle));

        board.remove(Vertex::new(4, 4)).unwrap();
        assert_eq!(board.last_move(), None);
    }

    #[test]
    fn test_occupied_and_out_of_range() {
        let mut board = Board::new(9).unwrap();
        board.place(Vertex::new(0, 0), StoneColor::White).unwrap();
        assert_eq!(
            board.place(Vertex::new(0, 0), StoneColor::Black),
            Err(BoardError::Occupied(Vertex::new(0, 0)))
        );
        assert!(board.play(Vertex::new(9, 0)).is_err());
        assert_eq!(board.stone_at(Vertex::new(9, 9)), None);
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new(9).unwrap();
        board.play(Vertex::new(1, 1)).unwrap();
        board.set_marker(Vertex::new(2, 2), Some(MarkerKind::Circle)).unwrap();
        board.clear();
        assert_eq!(board.stone_count(), 0);
        assert_eq!(board.marker_at(Vertex::new(2, 2)), None);
        assert_eq!(board.next_color(), StoneColor::Black);
    }
}
