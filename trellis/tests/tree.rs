use trellis::error::TreeError;
use trellis::tree::{OptionSpec, OptionTree};

fn nested() -> Vec<OptionSpec> {
    vec![
        OptionSpec::menu(
            "A",
            vec![OptionSpec::leaf("A1"), OptionSpec::leaf("A2")],
        ),
        OptionSpec::leaf("B"),
    ]
}

// ============================================================================
// Shape validation
// ============================================================================

#[test]
fn test_empty_spec_rejected() {
    let err = OptionTree::build(&[], false).unwrap_err();
    assert!(matches!(err, TreeError::EmptySpec));
}

#[test]
fn test_menu_without_sub_options_rejected() {
    let err = OptionTree::build(&[OptionSpec::menu("Group", vec![])], false).unwrap_err();
    assert!(matches!(err, TreeError::MissingSubOptions { label } if label == "Group"));
}

#[test]
fn test_duplicate_id_rejected() {
    let specs = vec![OptionSpec::leaf("A"), OptionSpec::leaf("B").with_id("A")];
    let err = OptionTree::build(&specs, false).unwrap_err();
    assert!(matches!(err, TreeError::DuplicateId { id } if id == "A"));
}

#[test]
fn test_duplicate_label_as_id_rejected() {
    // Ids default to labels, so two identical labels collide too.
    let specs = vec![OptionSpec::leaf("Same"), OptionSpec::leaf("Same")];
    let err = OptionTree::build(&specs, false).unwrap_err();
    assert!(matches!(err, TreeError::DuplicateId { id } if id == "Same"));
}

#[test]
fn test_reserved_id_rejected() {
    let specs = vec![OptionSpec::leaf("x").with_id("__x")];
    let err = OptionTree::build(&specs, false).unwrap_err();
    assert!(matches!(err, TreeError::ReservedId { id } if id == "__x"));
}

#[test]
fn test_id_defaults_to_label() {
    let tree = OptionTree::build(&nested(), false).unwrap();
    assert!(tree.find("A1").is_some());
    assert!(tree.find("nope").is_none());
}

// ============================================================================
// Default selection
// ============================================================================

#[test]
fn test_first_leaf_selected_by_default_in_single_mode() {
    let tree = OptionTree::build(&nested(), false).unwrap();
    let selected = tree.selected_leaves();
    assert_eq!(selected.len(), 1);
    assert_eq!(tree.node(selected[0]).id, "A1");
    // The enclosing menu reflects the selection.
    assert!(tree.node(tree.find("A").unwrap()).has_selected());
}

#[test]
fn test_no_default_selection_in_multi_mode() {
    let tree = OptionTree::build(&nested(), true).unwrap();
    assert!(tree.selected_leaves().is_empty());
}

#[test]
fn test_declared_selection_wins_over_default() {
    let specs = vec![
        OptionSpec::menu(
            "A",
            vec![OptionSpec::leaf("A1"), OptionSpec::leaf("A2").selected()],
        ),
        OptionSpec::leaf("B"),
    ];
    let tree = OptionTree::build(&specs, false).unwrap();
    let selected = tree.selected_leaves();
    assert_eq!(selected.len(), 1);
    assert_eq!(tree.node(selected[0]).id, "A2");
    assert!(tree.node(tree.find("A").unwrap()).has_selected());
    assert!(!tree.node(tree.find("A1").unwrap()).selected());
}

#[test]
fn test_default_selection_skips_disabled_leaves() {
    let specs = vec![
        OptionSpec::leaf("A").disabled(true),
        OptionSpec::leaf("B"),
    ];
    let tree = OptionTree::build(&specs, false).unwrap();
    let selected = tree.selected_leaves();
    assert_eq!(selected.len(), 1);
    assert_eq!(tree.node(selected[0]).id, "B");
}

// ============================================================================
// Disabled inheritance
// ============================================================================

#[test]
fn test_disabled_menu_disables_descendants() {
    let specs = vec![
        OptionSpec::menu("M", vec![OptionSpec::leaf("C")]).disabled(true),
        OptionSpec::leaf("B"),
    ];
    let tree = OptionTree::build(&specs, false).unwrap();
    assert!(tree.node(tree.find("C").unwrap()).disabled);
    assert!(!tree.node(tree.find("B").unwrap()).disabled);
}

#[test]
fn test_explicit_enabled_overrides_inherited_disabled() {
    let specs = vec![
        OptionSpec::menu(
            "M",
            vec![
                OptionSpec::leaf("C"),
                OptionSpec::leaf("D").disabled(false),
            ],
        )
        .disabled(true),
    ];
    let tree = OptionTree::build(&specs, false).unwrap();
    assert!(tree.node(tree.find("C").unwrap()).disabled);
    assert!(!tree.node(tree.find("D").unwrap()).disabled);
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_flatten_is_pre_order() {
    let tree = OptionTree::build(&nested(), false).unwrap();
    let ids: Vec<&str> = tree
        .flatten()
        .into_iter()
        .map(|id| tree.node(id).id.as_str())
        .collect();
    assert_eq!(ids, ["A", "A1", "A2", "B"]);
}

#[test]
fn test_path_runs_root_to_node() {
    let tree = OptionTree::build(&nested(), false).unwrap();
    let path: Vec<&str> = tree
        .path_to(tree.find("A2").unwrap())
        .into_iter()
        .map(|id| tree.node(id).id.as_str())
        .collect();
    assert_eq!(path, ["A", "A2"]);
}

#[test]
fn test_siblings_of_root_are_roots() {
    let tree = OptionTree::build(&nested(), false).unwrap();
    let siblings: Vec<&str> = tree
        .siblings(tree.find("B").unwrap())
        .into_iter()
        .map(|id| tree.node(id).id.as_str())
        .collect();
    assert_eq!(siblings, ["A", "B"]);
}
