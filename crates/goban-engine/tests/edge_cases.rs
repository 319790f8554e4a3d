//! Edge case tests for goban-engine

use goban_engine::board::{BoardState, MarkerKind, StoneColor, Vertex};
use goban_engine::geometry::{GeometryProvider, Rect, TileCoord};
use goban_engine::render::{ArtworkKind, LayerKind, Redraw, Theme};
use goban_engine::*;

/// 9x9 at cell 20: 200x200 canvas, 2x2 tiles of 100
fn small_config() -> Config {
    Config::default().with_board_size(9).with_cell_size(20.0).with_tile_size(100)
}

fn showing_all() -> BoardView {
    let mut view = BoardView::new(small_config()).unwrap();
    view.set_viewport(Rect::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    view.render();
    view
}

fn parse(notation: &str) -> Vertex {
    notation.parse().unwrap()
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_json_round_trip() {
    let config = small_config().with_theme(Theme::high_contrast()).with_layers(vec![LayerKind::Grid]);
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_oversized_board_rejected() {
    let err = BoardView::new(Config::default().with_board_size(26)).unwrap_err();
    assert_eq!(err, ViewError::Config(ConfigError::BoardSize(26)));
}

#[test]
fn test_custom_layer_stack() {
    let config = small_config().with_layers(vec![LayerKind::Grid, LayerKind::CrossHair]);
    let mut view = BoardView::new(config).unwrap();
    view.set_viewport(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    assert_eq!(view.render().layers_painted, 2);

    // No stone layer: placing a stone repaints nothing
    view.place_stone(parse("C7"), StoneColor::Black).unwrap();
    assert!(!view.needs_render());
}

// ============================================================================
// BOARD OPERATIONS
// ============================================================================

#[test]
fn test_occupied_point_is_an_error_and_silent() {
    let mut view = showing_all();
    view.place_stone(parse("E5"), StoneColor::White).unwrap();
    view.render();

    let err = view.place_stone(parse("E5"), StoneColor::Black).unwrap_err();
    assert!(matches!(err, ViewError::Board(_)));
    assert!(!view.needs_render());
}

#[test]
fn test_removing_empty_point_is_silent() {
    let mut view = showing_all();
    assert_eq!(view.remove_stone(parse("A1")).unwrap(), None);
    assert!(!view.needs_render());
}

#[test]
fn test_removing_last_move_clears_marker() {
    let mut view = showing_all();
    let point = parse("C3");
    view.play(point).unwrap();
    view.render();

    assert_eq!(view.remove_stone(point).unwrap(), Some(StoneColor::Black));
    assert_eq!(view.board().marker_at(point), None);
    assert_eq!(view.board().last_move(), None);
}

#[test]
fn test_reset_repaints_every_tile_and_hides_cross_hair() {
    let mut view = showing_all();
    view.play(parse("E5")).unwrap();
    view.set_cross_hair(Some(parse("B2"))).unwrap();
    view.render();

    view.reset();
    assert_eq!(view.cross_hair(), None);
    assert_eq!(view.board().stone_count(), 0);
    assert_eq!(view.render().tiles_painted, 4);
}

#[test]
fn test_play_updates_cross_hair_color() {
    let mut view = showing_all();
    view.set_cross_hair(Some(parse("B8"))).unwrap();
    view.render();

    view.play(parse("H2")).unwrap();
    // H2 is on tile (1, 1); the cross-hair on (0, 0) must also repaint
    let pending: Vec<TileCoord> = view.tiles().pending_display().into_iter().map(|(c, _)| c).collect();
    assert!(pending.contains(&TileCoord::new(0, 0)));
    assert!(pending.contains(&TileCoord::new(1, 1)));

    view.render();
    assert!(view.cache().contains(ArtworkKind::CrossHairStone(StoneColor::White)));
}

#[test]
fn test_hover_maps_canvas_to_point() {
    let mut view = showing_all();
    assert_eq!(view.hover(41.0, 179.0), Some(parse("B1")));
    assert_eq!(view.cross_hair(), Some(parse("B1")));
    assert_eq!(view.hover(2.0, 2.0), None);
    assert_eq!(view.cross_hair(), None);
}

// ============================================================================
// VIEWPORT AND ZOOM
// ============================================================================

#[test]
fn test_scroll_reuses_tiles() {
    let mut view = BoardView::new(small_config()).unwrap();
    view.set_viewport(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    view.render();

    let change = view.scroll_by(100.0, 0.0).unwrap();
    assert_eq!(change.detached, vec![TileCoord::new(0, 0)]);
    assert_eq!(change.attached, vec![TileCoord::new(1, 0)]);
    assert_eq!(view.tiles().stats().reused, 1);
}

#[test]
fn test_zoom_out_of_range_is_clamped() {
    let mut view = showing_all();
    assert!(view.zoom(100.0).unwrap());
    assert_eq!(view.metrics().scale(), 4.0);
    assert_eq!(view.metrics().cell_size(), 80.0);
}

#[test]
fn test_zoomed_out_grid_has_crisp_lines() {
    let mut view = BoardView::new(Config::default()).unwrap();
    view.set_viewport(Rect::new(0.0, 0.0, 640.0, 480.0)).unwrap();
    view.render();

    assert!(view.zoom(0.75).unwrap());
    assert_eq!(view.metrics().cell_size(), 24.0);
    assert_eq!(view.metrics().line_width(), 1.0);
    assert!(view.render().tiles_painted > 0);

    // Column B runs through x = 48
    let image = view.snapshot().unwrap();
    let line = image.pixel(48, 100).unwrap();
    let left = image.pixel(47, 100).unwrap();
    let right = image.pixel(49, 100).unwrap();
    assert_eq!(line.alpha(), 255);
    assert!(line.red() < 0x40);
    assert_eq!(left, right);
    assert!(left.red() > 0xc0);
}

#[test]
fn test_small_cells_render_every_tile() {
    let mut view = BoardView::new(small_config()).unwrap();
    view.set_viewport(Rect::new(0.0, 0.0, 200.0, 200.0)).unwrap();
    assert_eq!(view.metrics().line_width(), 1.0);
    assert_eq!(view.render().tiles_painted, 4);
    assert!(!view.needs_render());
}

#[test]
fn test_zoom_in_attaches_more_tiles() {
    let mut view = BoardView::new(small_config()).unwrap();
    view.set_viewport(Rect::new(0.0, 0.0, 400.0, 400.0)).unwrap();
    assert_eq!(view.tiles().len(), 4);

    view.zoom(2.0).unwrap();
    assert_eq!(view.tiles().len(), 16);
    assert!(view.tiles().tiles().all(|t| t.display_region() == Some(Redraw::WholeTile)));
}

#[test]
fn test_theme_change_repaints_everything() {
    let mut view = showing_all();
    view.set_theme(Theme::high_contrast());
    assert!(view.cache().is_empty());
    assert_eq!(view.render().tiles_painted, 4);
    assert_eq!(view.theme(), &Theme::high_contrast());
}

// ============================================================================
// SNAPSHOT
// ============================================================================

#[test]
fn test_snapshot_matches_viewport() {
    let mut view = showing_all();
    view.scroll_by(50.0, 50.0).unwrap();
    let image = view.snapshot().unwrap();
    assert_eq!((image.width(), image.height()), (200, 200));
}

#[test]
fn test_snapshot_shows_stone() {
    let mut view = showing_all();
    let point = parse("D6");
    let (x, y) = view.metrics().point_position(point);
    let before = view.snapshot().unwrap().pixel(x as u32 + 3, y as u32 + 3).unwrap();

    view.place_stone(point, StoneColor::Black).unwrap();
    let after = view.snapshot().unwrap().pixel(x as u32 + 3, y as u32 + 3).unwrap();
    assert_ne!(before, after);
    assert!(after.red() < 0x40);
}

#[test]
fn test_hover_trail_is_fully_erased() {
    let mut view = showing_all();
    let clean = view.snapshot().unwrap();

    view.hover(80.0, 80.0);
    view.render();
    view.hover(100.0, 100.0);
    view.hover(120.0, 60.0);
    view.hover(0.0, 0.0);
    let after = view.snapshot().unwrap();
    assert!(after.data() == clean.data());
}

#[test]
fn test_empty_viewport_snapshot_fails() {
    let mut view = BoardView::new(small_config()).unwrap();
    assert!(matches!(view.snapshot(), Err(ViewError::Render(_))));
}
