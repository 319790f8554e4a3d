//! Surface helpers
//!
//! Thin wrappers over tiny-skia pixmaps. Layer content is drawn in canvas
//! coordinates and translated to tile-local pixels here, clipped to the
//! region being repainted.

use goban_geometry::Rect;
use tiny_skia::{BlendMode, FillRule, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::{Color, Drawable, RenderError};

/// Allocate a transparent pixmap
pub(crate) fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })
}

/// Bounds of a pixmap in its own coordinates
pub(crate) fn pixmap_bounds(pixmap: &Pixmap) -> Rect {
    Rect::new(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

/// Mask admitting only `region`, or `None` if the region covers the pixmap
pub(crate) fn clip_mask(pixmap: &Pixmap, region: Rect) -> Option<Mask> {
    let region = region.round_out();
    if region.contains_rect(&pixmap_bounds(pixmap)) {
        return None;
    }
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    let path = PathBuilder::from_rect(to_skia_rect(region)?);
    mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
    Some(mask)
}

/// Make a region fully transparent
pub(crate) fn clear_region(pixmap: &mut Pixmap, region: Rect) {
    let region = region.round_out();
    if region.contains_rect(&pixmap_bounds(pixmap)) {
        pixmap.fill(tiny_skia::Color::TRANSPARENT);
        return;
    }
    if let Some(rect) = to_skia_rect(region) {
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

/// Replace `region` of `target` with the back-to-front composite of `layers`
pub(crate) fn composite<'a>(target: &mut Pixmap, layers: impl Iterator<Item = &'a Pixmap>, region: Rect) {
    if region.is_empty() {
        return;
    }
    clear_region(target, region);
    let mask = clip_mask(target, region);
    for layer in layers {
        target.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), mask.as_ref());
    }
}

/// Drawing target for one layer paint.
///
/// Accepts canvas coordinates and clips everything to the region being
/// repainted.
pub struct LayerCanvas<'a> {
    pixmap: &'a mut Pixmap,
    tile_rect: Rect,
    region: Rect,
    clip: Option<Mask>,
}

impl<'a> LayerCanvas<'a> {
    /// Wrap a layer backing. `region` is tile-local.
    pub fn new(pixmap: &'a mut Pixmap, tile_rect: Rect, region: Rect) -> Self {
        let clip = clip_mask(pixmap, region);
        Self { pixmap, tile_rect, region, clip }
    }

    /// Canvas rect of the owning tile
    pub fn tile_rect(&self) -> Rect {
        self.tile_rect
    }

    /// Region being repainted, in canvas coordinates
    pub fn canvas_region(&self) -> Rect {
        self.region.translate(self.tile_rect.x, self.tile_rect.y)
    }

    fn to_local(&self, canvas_rect: Rect) -> Rect {
        canvas_rect.translate(-self.tile_rect.x, -self.tile_rect.y)
    }

    /// Composite a drawable so that it covers `canvas_rect`
    pub fn draw(&mut self, drawable: &Drawable, canvas_rect: Rect) {
        if !canvas_rect.intersects(&self.canvas_region()) {
            return;
        }
        let local = self.to_local(canvas_rect);
        self.pixmap.draw_pixmap(
            local.x.round() as i32,
            local.y.round() as i32,
            drawable.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            self.clip.as_ref(),
        );
    }

    /// Fill a canvas rect with a solid color.
    ///
    /// Rects are axis-aligned, so edges snap to whole pixels instead of
    /// being anti-aliased; a 1 px line centred on a pixel boundary covers
    /// one full pixel column.
    pub fn fill_rect(&mut self, canvas_rect: Rect, color: Color) {
        let local = self.to_local(canvas_rect).intersection(&self.region);
        let Some(rect) = to_skia_rect(local) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), self.clip.as_ref());
    }
}
