//! Board events
//!
//! The closed set of notifications the renderer reacts to. They describe
//! *what* changed; every layer decides on its own which pixels that affects.

use goban_board::{FeatureKind, MarkerKind, StoneColor, Vertex};

/// Board-state change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// The cross-hair moved to a point, or was hidden
    CrossHairChanged(Option<Vertex>),
    /// Every stone and marker may have changed
    BoardReset,
    /// Zoom changed; all canvas geometry is different
    ScaleChanged,
    /// Theme or other artwork inputs changed
    AssetsChanged,
    /// A stone or marker appeared on a point
    FeaturePlaced { point: Vertex, kind: FeatureKind },
    /// A stone or marker disappeared from a point
    FeatureRemoved { point: Vertex, kind: FeatureKind },
}

impl BoardEvent {
    pub fn stone_placed(point: Vertex, color: StoneColor) -> Self {
        BoardEvent::FeaturePlaced { point, kind: FeatureKind::Stone(color) }
    }

    pub fn stone_removed(point: Vertex, color: StoneColor) -> Self {
        BoardEvent::FeatureRemoved { point, kind: FeatureKind::Stone(color) }
    }

    pub fn marker_placed(point: Vertex, marker: MarkerKind) -> Self {
        BoardEvent::FeaturePlaced { point, kind: FeatureKind::Marker(marker) }
    }

    pub fn marker_removed(point: Vertex, marker: MarkerKind) -> Self {
        BoardEvent::FeatureRemoved { point, kind: FeatureKind::Marker(marker) }
    }

    /// Events after which cached artwork no longer matches the canvas
    pub fn invalidates_artwork(&self) -> bool {
        matches!(self, BoardEvent::ScaleChanged | BoardEvent::AssetsChanged)
    }
}
