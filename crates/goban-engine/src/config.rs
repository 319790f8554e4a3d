//! View Configuration

use goban_board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use goban_render::{LayerKind, Theme};
use serde::{Deserialize, Serialize};

/// Board view configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lines per side
    pub board_size: u8,

    /// Tile edge in pixels. Fixed for the lifetime of a view.
    pub tile_size: u32,

    /// Cell size in pixels at scale 1.0
    pub base_cell_size: f32,

    /// Zoom range
    pub min_scale: f32,
    pub max_scale: f32,

    /// Tiles kept for reuse after leaving the viewport
    pub max_pooled_tiles: usize,

    /// Layer stack, back to front
    pub layers: Vec<LayerKind>,

    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: 19,
            tile_size: 256,
            base_cell_size: 32.0,
            min_scale: 0.25,
            max_scale: 4.0,
            max_pooled_tiles: 16,
            layers: LayerKind::DEFAULT_STACK.to_vec(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn with_board_size(mut self, board_size: u8) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_cell_size(mut self, base_cell_size: f32) -> Self {
        self.base_cell_size = base_cell_size;
        self
    }

    pub fn with_scale_range(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_max_pooled_tiles(mut self, max_pooled_tiles: usize) -> Self {
        self.max_pooled_tiles = max_pooled_tiles;
        self
    }

    pub fn with_layers(mut self, layers: Vec<LayerKind>) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Reject degenerate geometry before anything is allocated
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if !(self.base_cell_size.is_finite() && self.base_cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.base_cell_size));
        }

        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::ScaleRange { min, max });
        }

        if self.layers.is_empty() {
            return Err(ConfigError::EmptyLayerStack);
        }
        for (i, kind) in self.layers.iter().enumerate() {
            if self.layers[..i].contains(kind) {
                return Err(ConfigError::DuplicateLayer(*kind));
            }
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported board size: {0}")]
    BoardSize(u8),

    #[error("Tile size must be positive")]
    ZeroTileSize,

    #[error("Cell size must be positive and finite, got {0}")]
    CellSize(f32),

    #[error("Invalid zoom range {min}..={max}")]
    ScaleRange { min: f32, max: f32 },

    #[error("Layer stack is empty")]
    EmptyLayerStack,

    #[error("Layer {0:?} appears more than once")]
    DuplicateLayer(LayerKind),
}
