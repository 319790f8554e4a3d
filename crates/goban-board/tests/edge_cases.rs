//! Edge case tests for goban-board

use goban_board::*;

// ============================================================================
// VERTEX NOTATION
// ============================================================================

#[test]
fn test_notation_rejects_garbage() {
    assert!("".parse::<Vertex>().is_err());
    assert!("A".parse::<Vertex>().is_err());
    assert!("A0".parse::<Vertex>().is_err());
    assert!("A26".parse::<Vertex>().is_err());
    assert!("11".parse::<Vertex>().is_err());
    assert!("A-1".parse::<Vertex>().is_err());
}

#[test]
fn test_notation_accepts_whitespace_and_lowercase() {
    assert_eq!(" q16 ".parse::<Vertex>().unwrap(), Vertex::new(15, 15));
}

#[test]
fn test_notation_display_parse_agree_on_largest_board() {
    for vertex in Vertex::all(MAX_BOARD_SIZE) {
        let text = vertex.to_string();
        assert_eq!(Vertex::parse(&text, MAX_BOARD_SIZE).unwrap(), vertex, "{text}");
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

#[test]
fn test_contains_uses_board_size() {
    let board = Board::new(MIN_BOARD_SIZE).unwrap();
    assert!(board.contains(Vertex::new(1, 1)));
    assert!(!board.contains(Vertex::new(2, 0)));
}

#[test]
fn test_remove_empty_point() {
    let mut board = Board::new(9).unwrap();
    assert_eq!(board.remove(Vertex::new(3, 3)), Ok(None));
}

#[test]
fn test_marker_replacement_returns_previous() {
    let mut board = Board::new(9).unwrap();
    let point = Vertex::new(5, 5);
    assert_eq!(board.set_marker(point, Some(MarkerKind::Square)), Ok(None));
    assert_eq!(board.set_marker(point, Some(MarkerKind::Cross)), Ok(Some(MarkerKind::Square)));
    assert_eq!(board.set_marker(point, None), Ok(Some(MarkerKind::Cross)));
    assert_eq!(board.marker_at(point), None);
}

#[test]
fn test_board_state_as_trait_object() {
    let mut board = Board::new(13).unwrap();
    board.place(Vertex::new(3, 3), StoneColor::White).unwrap();
    board.set_next_color(StoneColor::White);

    let state: &dyn BoardState = &board;
    assert_eq!(state.size(), 13);
    assert_eq!(state.stone_at(Vertex::new(3, 3)), Some(StoneColor::White));
    assert_eq!(state.next_color(), StoneColor::White);
}
