//! Board point identifiers

use std::fmt;
use std::str::FromStr;

use crate::{BoardError, MAX_BOARD_SIZE};

/// Column letters in Go notation ("I" is skipped)
pub const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Intersection on the board.
///
/// Zero-based: `x` counts columns from the left edge, `y` counts lines from
/// the bottom edge, so `Vertex::new(0, 0)` is "A1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub x: u8,
    pub y: u8,
}

impl Vertex {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Parse Go notation and check the result against a board size
    pub fn parse(notation: &str, board_size: u8) -> Result<Self, BoardError> {
        let vertex: Vertex = notation.parse()?;
        if vertex.x >= board_size || vertex.y >= board_size {
            return Err(BoardError::OutOfRange { vertex, size: board_size });
        }
        Ok(vertex)
    }

    /// Iterate over every vertex of a board, row by row from the bottom
    pub fn all(board_size: u8) -> impl Iterator<Item = Vertex> {
        (0..board_size).flat_map(move |y| (0..board_size).map(move |x| Vertex::new(x, y)))
    }

    /// Index into a row-major array for a board of the given size
    pub fn index(self, board_size: u8) -> usize {
        self.y as usize * board_size as usize + self.x as usize
    }
}

impl FromStr for Vertex {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidNotation(s.to_string());
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();

        let x = COLUMN_LETTERS
            .iter()
            .position(|&c| c as char == letter)
            .ok_or_else(invalid)?;

        let line: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if line == 0 || line > MAX_BOARD_SIZE {
            return Err(invalid());
        }

        Ok(Vertex::new(x as u8, line - 1))
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COLUMN_LETTERS.get(self.x as usize) {
            Some(&letter) => write!(f, "{}{}", letter as char, self.y as u32 + 1),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        assert_eq!("A1".parse::<Vertex>().unwrap(), Vertex::new(0, 0));
        assert_eq!("d4".parse::<Vertex>().unwrap(), Vertex::new(3, 3));
        assert_eq!("J10".parse::<Vertex>().unwrap(), Vertex::new(8, 9));
        assert_eq!("T19".parse::<Vertex>().unwrap(), Vertex::new(18, 18));
    }

    #[test]
    fn test_parse_rejects_i_column() {
        assert!("I5".parse::<Vertex>().is_err());
    }

    #[test]
    fn test_parse_with_board_size() {
        assert!(Vertex::parse("K10", 9).is_err());
        assert_eq!(Vertex::parse("E5", 9).unwrap(), Vertex::new(4, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vertex::new(7, 2).to_string(), "H3");
        assert_eq!(Vertex::new(8, 2).to_string(), "J3");
    }

    #[test]
    fn test_all_vertices() {
        let all: Vec<_> = Vertex::all(3).collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], Vertex::new(0, 0));
        assert_eq!(all[4], Vertex::new(1, 1));
        assert_eq!(Vertex::new(2, 1).index(3), 5);
    }
}
