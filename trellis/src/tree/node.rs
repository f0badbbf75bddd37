//! Arena nodes and host-facing snapshots.

use serde::Serialize;

use super::spec::OptionData;

/// Index of a node within its [`super::OptionTree`] arena.
///
/// Only valid for the tree that produced it; a rebuild invalidates all
/// previously handed-out ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Variant-specific node state.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A choosable terminal option.
    Leaf {
        /// Whether this leaf is currently chosen.
        selected: bool,
        /// Toggle on re-select instead of replacing the selection.
        multi: bool,
    },
    /// A non-choosable group owning an ordered set of children.
    Menu {
        /// True iff some descendant leaf is selected.
        has_selected: bool,
        /// Children in input order.
        children: Vec<NodeId>,
    },
}

/// One node in the option arena.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionNode {
    /// Unique id within the tree (defaults to the label).
    pub id: String,
    /// Display string, also the search-match target.
    pub label: String,
    /// On the path from a root to the keyboard-focused node.
    pub active: bool,
    /// Not choosable/navigable; resolved at build time (may inherit
    /// from the enclosing menu).
    pub disabled: bool,
    /// Enclosing menu, none at top level.
    pub parent: Option<NodeId>,
    /// Opaque payload.
    pub data: OptionData,
    pub kind: NodeKind,
}

impl OptionNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn is_menu(&self) -> bool {
        matches!(self.kind, NodeKind::Menu { .. })
    }

    /// Selected flag for leaves, false for menus.
    pub fn selected(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { selected: true, .. })
    }

    /// Multi-select flag for leaves, false for menus.
    pub fn multi(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { multi: true, .. })
    }

    /// `has_selected` flag for menus, false for leaves.
    pub fn has_selected(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Menu {
                has_selected: true,
                ..
            }
        )
    }

    /// Children for menus, empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Menu { children, .. } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }
}

/// Owned snapshot of a node handed to the rendering layer.
///
/// Detached from the arena: mutating the controller after taking a
/// snapshot does not affect it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OptionItem {
    Select {
        id: String,
        label: String,
        selected: bool,
        active: bool,
        disabled: bool,
        /// True for synthetic "create a new entry" options.
        is_addition: bool,
        data: OptionData,
    },
    Menu {
        id: String,
        label: String,
        has_selected: bool,
        active: bool,
        disabled: bool,
        data: OptionData,
        sub_options: Vec<OptionItem>,
    },
}

impl OptionItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Select { id, .. } | Self::Menu { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Select { label, .. } | Self::Menu { label, .. } => label,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Select { active, .. } | Self::Menu { active, .. } => *active,
        }
    }

    /// Selected flag for leaves, `has_selected` for menus.
    pub fn is_selected(&self) -> bool {
        match self {
            Self::Select { selected, .. } => *selected,
            Self::Menu { has_selected, .. } => *has_selected,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Select { disabled, .. } | Self::Menu { disabled, .. } => *disabled,
        }
    }
}
