//! Artwork rendering
//!
//! Produces the cell-sized drawables stored in the `DrawableCache`. Called
//! only on a cache miss, so the cost of anti-aliased path filling is paid
//! once per artwork type and scale.

use goban_board::{MarkerKind, StoneColor};
use goban_geometry::GeometryProvider;
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::{ArtworkKind, Color, Drawable, RenderError};

/// Renders one piece of artwork sized for a single board cell
pub trait ArtworkRenderer {
    /// Render artwork for the current metrics
    fn render(&self, kind: ArtworkKind, geometry: &dyn GeometryProvider) -> Result<Drawable, RenderError>;

    /// Colors shared with directly painted content (background, grid lines)
    fn theme(&self) -> &Theme;
}

/// Board colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub line: Color,
    pub black_stone: Color,
    pub white_stone: Color,
    /// Marker color on empty points and white stones
    pub marker_dark: Color,
    /// Marker color on black stones
    pub marker_light: Color,
    pub last_move: Color,
    /// Alpha of the cross-hair stone
    pub cross_hair_alpha: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xdc, 0xb3, 0x5c),
            line: Color::rgb(0x20, 0x1a, 0x10),
            black_stone: Color::rgb(0x10, 0x10, 0x10),
            white_stone: Color::rgb(0xf4, 0xf4, 0xf0),
            marker_dark: Color::BLACK,
            marker_light: Color::WHITE,
            last_move: Color::rgb(0xd0, 0x20, 0x20),
            cross_hair_alpha: 128,
        }
    }
}

impl Theme {
    /// Flat black-and-white theme
    pub fn high_contrast() -> Self {
        Self {
            background: Color::WHITE,
            line: Color::BLACK,
            black_stone: Color::BLACK,
            white_stone: Color::WHITE,
            marker_dark: Color::BLACK,
            marker_light: Color::WHITE,
            last_move: Color::rgb(0, 0, 0xff),
            cross_hair_alpha: 160,
        }
    }

    fn stone(&self, color: StoneColor) -> Color {
        match color {
            StoneColor::Black => self.black_stone,
            StoneColor::White => self.white_stone,
        }
    }

    fn marker_on(&self, stone: Option<StoneColor>) -> Color {
        match stone {
            Some(StoneColor::Black) => self.marker_light,
            _ => self.marker_dark,
        }
    }
}

/// Default artwork renderer built on tiny-skia paths
#[derive(Debug, Clone, Default)]
pub struct SkiaArtwork {
    theme: Theme,
}

impl SkiaArtwork {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Swap the theme. Cached artwork must be invalidated by the caller.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        paint
    }

    fn draw_stone(&self, pixmap: &mut Pixmap, color: StoneColor, alpha: u8, size: f32) {
        let center = size / 2.0;
        let Some(circle) = PathBuilder::from_circle(center, center, center - 0.5) else {
            return;
        };

        let fill = self.theme.stone(color).with_alpha(alpha);
        pixmap.fill_path(&circle, &Self::paint(fill), FillRule::Winding, Transform::identity(), None);

        // White stones need an outline to stand out from a light board
        if color == StoneColor::White {
            let outline = self.theme.line.with_alpha(alpha);
            let stroke = Stroke { width: (size / 32.0).max(1.0), ..Stroke::default() };
            pixmap.stroke_path(&circle, &Self::paint(outline), &stroke, Transform::identity(), None);
        }
    }

    fn draw_star_point(&self, pixmap: &mut Pixmap, size: f32) {
        let center = size / 2.0;
        let radius = (size * 0.1).max(1.5);
        if let Some(dot) = PathBuilder::from_circle(center, center, radius) {
            pixmap.fill_path(&dot, &Self::paint(self.theme.line), FillRule::Winding, Transform::identity(), None);
        }
    }

    fn draw_marker(&self, pixmap: &mut Pixmap, marker: MarkerKind, on: Option<StoneColor>, size: f32) {
        let c = size / 2.0;
        let color = match marker {
            MarkerKind::LastMove => self.theme.last_move,
            _ => self.theme.marker_on(on),
        };
        let paint = Self::paint(color);
        let stroke = Stroke { width: (size / 16.0).max(1.0), ..Stroke::default() };

        let path = match marker {
            MarkerKind::Circle => PathBuilder::from_circle(c, c, size * 0.25),
            MarkerKind::Square => {
                let half = size * 0.22;
                tiny_skia::Rect::from_ltrb(c - half, c - half, c + half, c + half).map(PathBuilder::from_rect)
            }
            MarkerKind::Triangle => {
                let r = size * 0.28;
                let mut pb = PathBuilder::new();
                pb.move_to(c, c - r);
                pb.line_to(c + r * 0.866, c + r * 0.5);
                pb.line_to(c - r * 0.866, c + r * 0.5);
                pb.close();
                pb.finish()
            }
            MarkerKind::Cross => {
                let r = size * 0.2;
                let mut pb = PathBuilder::new();
                pb.move_to(c - r, c - r);
                pb.line_to(c + r, c + r);
                pb.move_to(c + r, c - r);
                pb.line_to(c - r, c + r);
                pb.finish()
            }
            MarkerKind::LastMove => {
                // Filled, not stroked
                if let Some(dot) = PathBuilder::from_circle(c, c, size * 0.15) {
                    pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
                }
                return;
            }
        };

        if let Some(path) = path {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

impl ArtworkRenderer for SkiaArtwork {
    fn render(&self, kind: ArtworkKind, geometry: &dyn GeometryProvider) -> Result<Drawable, RenderError> {
        let cell = geometry.cell_size();
        if !(cell.is_finite() && cell >= 1.0) {
            return Err(RenderError::DegenerateArtwork(kind));
        }

        let side = cell.round() as u32;
        let mut pixmap = Pixmap::new(side, side)
            .ok_or(RenderError::SurfaceAllocation { width: side, height: side })?;
        let size = side as f32;

        match kind {
            ArtworkKind::Stone(color) => self.draw_stone(&mut pixmap, color, 255, size),
            ArtworkKind::CrossHairStone(color) => {
                self.draw_stone(&mut pixmap, color, self.theme.cross_hair_alpha, size)
            }
            ArtworkKind::StarPoint => self.draw_star_point(&mut pixmap, size),
            ArtworkKind::Marker { marker, on } => self.draw_marker(&mut pixmap, marker, on, size),
        }

        Ok(Drawable::new(kind, pixmap))
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}
