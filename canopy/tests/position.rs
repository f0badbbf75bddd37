use canopy::{Placement, PositionConfig, Rect, Size, TriggerEvent, compute_position};

fn viewport() -> Rect {
    Rect::new(0, 0, 100, 40)
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_bottom_start_below_anchor() {
    let anchor = Rect::new(10, 5, 20, 1);
    let rect = compute_position(
        viewport(),
        anchor,
        Size::new(30, 10),
        &PositionConfig::default(),
    );
    assert_eq!(rect, Rect::new(10, 6, 30, 10));
}

#[test]
fn test_offset_adds_gap_on_main_axis() {
    let anchor = Rect::new(10, 5, 20, 1);
    let config = PositionConfig {
        offset: 2,
        ..PositionConfig::default()
    };
    let rect = compute_position(viewport(), anchor, Size::new(30, 10), &config);
    assert_eq!(rect.y, 8);
}

#[test]
fn test_right_start_beside_anchor() {
    let anchor = Rect::new(10, 5, 20, 1);
    let config = PositionConfig {
        placement: Placement::RightStart,
        flip: false,
        ..PositionConfig::default()
    };
    let rect = compute_position(viewport(), anchor, Size::new(30, 10), &config);
    assert_eq!(rect, Rect::new(30, 5, 30, 10));
}

// ============================================================================
// Flip
// ============================================================================

#[test]
fn test_flip_falls_back_to_top_when_cramped_below() {
    // Anchor near the bottom edge: 10 rows of content cannot fit below.
    let anchor = Rect::new(10, 35, 20, 1);
    let rect = compute_position(
        viewport(),
        anchor,
        Size::new(30, 10),
        &PositionConfig::default(),
    );
    assert_eq!(rect, Rect::new(10, 25, 30, 10));
}

#[test]
fn test_no_flip_when_it_fits() {
    let anchor = Rect::new(10, 5, 20, 1);
    let rect = compute_position(
        viewport(),
        anchor,
        Size::new(30, 10),
        &PositionConfig::default(),
    );
    assert_eq!(rect.y, 6);
}

#[test]
fn test_flip_disabled_stays_on_preferred_side() {
    let anchor = Rect::new(10, 35, 20, 1);
    let config = PositionConfig {
        flip: false,
        ..PositionConfig::default()
    };
    let rect = compute_position(viewport(), anchor, Size::new(30, 10), &config);
    // Clamped into the viewport instead of flipped.
    assert_eq!(rect.y, 30);
}

#[test]
fn test_flip_skipped_when_opposite_side_also_cramped() {
    // Tiny viewport: content fits on neither side, so the preferred side
    // is kept and clamped.
    let small = Rect::new(0, 0, 100, 8);
    let anchor = Rect::new(10, 4, 20, 1);
    let rect = compute_position(small, anchor, Size::new(30, 6), &PositionConfig::default());
    assert_eq!(rect.y, 2);
}

// ============================================================================
// Shift
// ============================================================================

#[test]
fn test_shift_clamps_cross_axis() {
    // Anchor near the right edge with a wide dropdown.
    let anchor = Rect::new(90, 5, 8, 1);
    let config = PositionConfig {
        shift: true,
        ..PositionConfig::default()
    };
    let rect = compute_position(viewport(), anchor, Size::new(30, 10), &config);
    assert_eq!(rect.x, 70);
}

#[test]
fn test_context_menu_defaults() {
    let config = PositionConfig::for_trigger(TriggerEvent::ContextMenu);
    assert_eq!(config.placement, Placement::RightStart);
    assert_eq!(config.offset, 1);
    assert!(config.shift);
    assert!(!config.flip);
}

#[test]
fn test_oversized_content_is_clamped_to_viewport() {
    let anchor = Rect::new(10, 5, 20, 1);
    let rect = compute_position(
        viewport(),
        anchor,
        Size::new(200, 80),
        &PositionConfig::default(),
    );
    assert_eq!(rect.size(), Size::new(100, 40));
}
