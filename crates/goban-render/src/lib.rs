//! Goban Render - Tiled Board Renderer
//!
//! CPU rendering of a Go board using tiny-skia. The canvas is split into
//! fixed-size tiles; each tile owns a stack of paint layers that track their
//! own dirty rectangles, so a board change only repaints the pixels it
//! affects.
//!
//! This crate provides:
//! - Board events broadcast to every visible tile
//! - `DrawableCache`, the shared store of pre-rendered cell-sized artwork
//! - `SkiaArtwork`, the default artwork renderer, and its `Theme`
//! - `DirtyState`, the per-layer dirty-rect state machine
//! - Layer delegates: grid, stones, markers, cross-hair
//! - `Tile`, `TilePool` and `TileManager`

mod artwork;
mod cache;
mod dirty;
mod event;
mod pool;
mod surface;
mod tile;
pub mod layer;
pub mod manager;

pub use artwork::{ArtworkRenderer, SkiaArtwork, Theme};
pub use cache::{ArtworkKind, CacheStats, Drawable, DrawableCache};
pub use dirty::{Damage, DirtyState, Redraw};
pub use event::BoardEvent;
pub use layer::{LayerContent, LayerContext, LayerDelegate, LayerKind, PaintContext};
pub use manager::{FrameStats, TileManager, TileManagerStats, ViewportChange};
pub use pool::{TilePool, TilePoolStats};
pub use surface::LayerCanvas;
pub use tile::Tile;

use serde::{Deserialize, Serialize};

/// Color (RGBA)
///
/// Serialized as a hex string, e.g. `"#dcb35c"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        let byte = |shift: u32| (value >> shift) as u8;

        match digits.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xf) as u8 * 17;
                Some(Self::rgb(nibble(8), nibble(4), nibble(0)))
            }
            6 => Some(Self::rgb(byte(16), byte(8), byte(0))),
            8 => Some(Self::rgba(byte(24), byte(16), byte(8), byte(0))),
            _ => None,
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Self::from_hex(&hex).ok_or(RenderError::InvalidColor(hex))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Render errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Degenerate artwork geometry for {0:?}")]
    DegenerateArtwork(ArtworkKind),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}
