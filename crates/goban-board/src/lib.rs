//! Goban Board - Board State Identifiers
//!
//! The renderer never owns game state. It refers to board positions through
//! stable `Vertex` identifiers and reads stones and markers through the
//! `BoardState` trait.
//!
//! This crate provides:
//! - `Vertex` identifiers with Go notation parsing ("D4", "Q16")
//! - Stone colors, marker kinds and the feature kinds carried by board events
//! - The `BoardState` read interface consumed by the renderer
//! - `Board`, a minimal in-memory board without game rules

mod board;
mod vertex;

pub use board::Board;
pub use vertex::{Vertex, COLUMN_LETTERS};

/// Smallest supported board
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest supported board (limited by the column letters)
pub const MAX_BOARD_SIZE: u8 = 25;

/// Stone color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoneColor {
    Black,
    White,
}

impl StoneColor {
    /// The other color
    pub const fn opposite(self) -> Self {
        match self {
            StoneColor::Black => StoneColor::White,
            StoneColor::White => StoneColor::Black,
        }
    }
}

/// Symbol drawn on top of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Circle,
    Square,
    Triangle,
    Cross,
    /// Highlights the most recent move
    LastMove,
}

/// Anything that can be placed on or removed from a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Stone(StoneColor),
    Marker(MarkerKind),
}

/// Board errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Unsupported board size: {0}")]
    UnsupportedSize(u8),

    #[error("Vertex {vertex} is outside a {size}x{size} board")]
    OutOfRange { vertex: Vertex, size: u8 },

    #[error("Point {0} is already occupied")]
    Occupied(Vertex),

    #[error("Invalid vertex notation: {0}")]
    InvalidNotation(String),
}

/// Read access to the canonical board state.
///
/// Implemented by whatever owns the game. The renderer only ever queries it
/// during a paint pass and never keeps references into it.
pub trait BoardState {
    /// Number of lines on each side
    fn size(&self) -> u8;

    /// Stone on a point, if any
    fn stone_at(&self, point: Vertex) -> Option<StoneColor>;

    /// Marker on a point, if any
    fn marker_at(&self, point: Vertex) -> Option<MarkerKind>;

    /// Color of the stone the next move would place
    fn next_color(&self) -> StoneColor;

    /// Check if a vertex lies on the board
    fn contains(&self, point: Vertex) -> bool {
        point.x < self.size() && point.y < self.size()
    }
}
