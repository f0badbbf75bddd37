use canopy::OverlayManager;
use trellis::events::SelectEvent;
use trellis::select::{BindingKind, ClosePolicy, Select, SelectConfig};
use trellis::tree::OptionSpec;

fn single_xy() -> Select {
    Select::new(
        &[OptionSpec::leaf("X"), OptionSpec::leaf("Y")],
        SelectConfig::default(),
        OverlayManager::new(),
    )
    .unwrap()
}

fn multi_xy() -> Select {
    Select::new(
        &[OptionSpec::leaf("X"), OptionSpec::leaf("Y")],
        SelectConfig::default().multi(true),
        OverlayManager::new(),
    )
    .unwrap()
}

fn selected_ids(select: &Select) -> Vec<String> {
    select
        .selected()
        .iter()
        .map(|item| item.id().to_string())
        .collect()
}

// ============================================================================
// Single-select
// ============================================================================

#[test]
fn test_first_leaf_selected_after_build() {
    let select = single_xy();
    assert_eq!(selected_ids(&select), ["X"]);
}

#[test]
fn test_single_select_replaces_previous() {
    let select = single_xy();
    let snapshot = select.select_option("Y").unwrap();
    assert_eq!(snapshot.id(), "Y");
    assert!(snapshot.is_selected());
    assert_eq!(selected_ids(&select), ["Y"]);
}

#[test]
fn test_selection_change_emits_both_events() {
    let select = single_xy();
    select.select_option("Y");
    let events = select.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SelectEvent::Selected(item) if item.id() == "Y")));
    assert!(events
        .iter()
        .any(|e| matches!(e, SelectEvent::SelectionChanged(item) if item.id() == "Y")));
}

#[test]
fn test_reselect_emits_selected_only() {
    let select = single_xy();
    select.select_option("Y");
    select.take_events();

    select.select_option("Y");
    let events = select.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SelectEvent::Selected(item) if item.id() == "Y")));
    assert!(!events
        .iter()
        .any(|e| matches!(e, SelectEvent::SelectionChanged(_))));
}

#[test]
fn test_unknown_id_is_silent_noop() {
    let select = single_xy();
    select.take_events();
    assert!(select.select_option("nope").is_none());
    assert!(select.take_events().is_empty());
    assert_eq!(selected_ids(&select), ["X"]);
}

#[test]
fn test_disabled_option_is_silent_noop() {
    let select = Select::new(
        &[OptionSpec::leaf("A").disabled(true), OptionSpec::leaf("B")],
        SelectConfig::default(),
        OverlayManager::new(),
    )
    .unwrap();
    select.take_events();
    assert!(select.select_option("A").is_none());
    assert!(select.take_events().is_empty());
    assert_eq!(selected_ids(&select), ["B"]);
}

#[test]
fn test_menu_id_is_not_selectable() {
    let select = Select::new(
        &[OptionSpec::menu("M", vec![OptionSpec::leaf("C")])],
        SelectConfig::default(),
        OverlayManager::new(),
    )
    .unwrap();
    assert!(select.select_option("M").is_none());
}

// ============================================================================
// Multi-select
// ============================================================================

#[test]
fn test_multi_starts_with_nothing_selected() {
    let select = multi_xy();
    assert!(select.selected().is_empty());
}

#[test]
fn test_multi_accumulates_and_toggles() {
    let select = multi_xy();
    select.select_option("X");
    select.select_option("Y");
    assert_eq!(selected_ids(&select), ["X", "Y"]);

    select.select_option("X");
    assert_eq!(selected_ids(&select), ["Y"]);
}

#[test]
fn test_multi_leaf_survives_single_selection() {
    // A per-option multi leaf coexists with the single-select slot.
    let select = Select::new(
        &[
            OptionSpec::leaf("tag").multi(true),
            OptionSpec::leaf("X").selected(),
            OptionSpec::leaf("Y"),
        ],
        SelectConfig::default(),
        OverlayManager::new(),
    )
    .unwrap();
    select.select_option("tag");
    select.select_option("Y");
    assert_eq!(selected_ids(&select), ["tag", "Y"]);
}

// ============================================================================
// Menu has_selected propagation
// ============================================================================

#[test]
fn test_menu_reflects_descendant_selection() {
    let select = Select::new(
        &[
            OptionSpec::menu(
                "A",
                vec![OptionSpec::leaf("A1"), OptionSpec::leaf("A2").selected()],
            ),
            OptionSpec::leaf("B"),
        ],
        SelectConfig::default(),
        OverlayManager::new(),
    )
    .unwrap();
    assert!(select.options()[0].is_selected());

    select.select_option("B");
    let options = select.options();
    assert!(!options[0].is_selected());
    assert!(options[1].is_selected());
}

// ============================================================================
// Close policy
// ============================================================================

#[test]
fn test_single_selection_closes_by_default() {
    let select = single_xy();
    select.open();
    select.select_option("Y");
    assert!(!select.is_open());
}

#[test]
fn test_multi_selection_keeps_dropdown_open_by_default() {
    let select = multi_xy();
    select.open();
    select.select_option("Y");
    assert!(select.is_open());
}

#[test]
fn test_close_policy_never() {
    let select = Select::new(
        &[OptionSpec::leaf("X"), OptionSpec::leaf("Y")],
        SelectConfig::default().close_on_select(ClosePolicy::Never),
        OverlayManager::new(),
    )
    .unwrap();
    select.open();
    select.select_option("Y");
    assert!(select.is_open());
}

#[test]
fn test_close_policy_always_closes_multi() {
    let select = Select::new(
        &[OptionSpec::leaf("X"), OptionSpec::leaf("Y")],
        SelectConfig::default()
            .multi(true)
            .close_on_select(ClosePolicy::Always),
        OverlayManager::new(),
    )
    .unwrap();
    select.open();
    select.select_option("Y");
    assert!(!select.is_open());
}

// ============================================================================
// Projections
// ============================================================================

#[test]
fn test_option_bindings_flatten_with_depth() {
    let select = Select::new(
        &[
            OptionSpec::menu("A", vec![OptionSpec::leaf("A1"), OptionSpec::leaf("A2")]),
            OptionSpec::leaf("B"),
        ],
        SelectConfig::default(),
        OverlayManager::new(),
    )
    .unwrap();
    let bindings = select.option_bindings();
    let ids: Vec<&str> = bindings.iter().map(|b| b.id.as_str()).collect();
    let depths: Vec<u16> = bindings.iter().map(|b| b.depth).collect();
    assert_eq!(ids, ["A", "A1", "A2", "B"]);
    assert_eq!(depths, [0, 1, 1, 0]);
    assert_eq!(bindings[0].kind, BindingKind::Menu);
    assert_eq!(bindings[1].kind, BindingKind::Leaf);
}

#[test]
fn test_events_drain_once() {
    let select = single_xy();
    select.select_option("Y");
    assert!(!select.take_events().is_empty());
    assert!(select.take_events().is_empty());
}

#[test]
fn test_dirty_flag_tracks_mutations() {
    let select = single_xy();
    select.clear_dirty();
    assert!(!select.is_dirty());
    select.select_option("Y");
    assert!(select.is_dirty());
    select.clear_dirty();
    assert!(!select.is_dirty());
}

#[test]
fn test_set_options_rebuilds_tree() {
    let select = single_xy();
    select.set_options(&[OptionSpec::leaf("P"), OptionSpec::leaf("Q")]).unwrap();
    assert_eq!(selected_ids(&select), ["P"]);
    assert!(select.select_option("X").is_none());
}
