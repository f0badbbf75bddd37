//! The option arena and its invariant-maintenance operations.

use std::collections::HashSet;

use log::debug;

use crate::error::TreeError;

use super::node::{NodeId, NodeKind, OptionItem, OptionNode};
use super::spec::{OptionSpec, SpecKind};

/// Ids starting with this prefix are reserved for synthetic
/// search/addition options.
pub(crate) const RESERVED_PREFIX: &str = "__";

/// Arena-backed option tree.
#[derive(Debug, Clone, Default)]
pub struct OptionTree {
    nodes: Vec<OptionNode>,
    roots: Vec<NodeId>,
}

impl OptionTree {
    /// Build a tree from an ordered spec list.
    ///
    /// `default_multi` is the controller-level selection mode applied to
    /// leaves that do not override it. In single-select mode with no
    /// declared selection, the first non-disabled leaf in pre-order is
    /// selected. `has_selected` flags are consistent on return.
    pub fn build(specs: &[OptionSpec], default_multi: bool) -> Result<Self, TreeError> {
        if specs.is_empty() {
            return Err(TreeError::EmptySpec);
        }
        let mut tree = Self::default();
        let mut seen = HashSet::new();
        for spec in specs {
            let root = tree.build_node(spec, None, false, default_multi, &mut seen)?;
            tree.roots.push(root);
        }

        if !default_multi && tree.selected_leaves().is_empty() {
            let first = tree
                .flatten_leaves()
                .into_iter()
                .find(|&id| !tree.node(id).disabled);
            if let Some(id) = first {
                tree.set_selected(id, true);
            }
        }
        tree.refresh_has_selected();
        debug!("built option tree with {} nodes", tree.nodes.len());
        Ok(tree)
    }

    fn build_node(
        &mut self,
        spec: &OptionSpec,
        parent: Option<NodeId>,
        inherited_disabled: bool,
        default_multi: bool,
        seen: &mut HashSet<String>,
    ) -> Result<NodeId, TreeError> {
        let id = spec.id.clone().unwrap_or_else(|| spec.label.clone());
        if id.starts_with(RESERVED_PREFIX) {
            return Err(TreeError::ReservedId { id });
        }
        if !seen.insert(id.clone()) {
            return Err(TreeError::DuplicateId { id });
        }
        let disabled = spec.disabled.unwrap_or(inherited_disabled);

        let node_id = NodeId(self.nodes.len());
        // Placeholder kind; children are built depth-first after the
        // slot exists so they can point back at it.
        self.nodes.push(OptionNode {
            id,
            label: spec.label.clone(),
            active: false,
            disabled,
            parent,
            data: spec.data.clone(),
            kind: NodeKind::Leaf {
                selected: false,
                multi: false,
            },
        });

        let kind = match spec.kind {
            SpecKind::Select => NodeKind::Leaf {
                selected: spec.selected,
                multi: spec.multi.unwrap_or(default_multi),
            },
            SpecKind::Menu => {
                let sub_specs = spec
                    .sub_options
                    .as_deref()
                    .filter(|subs| !subs.is_empty())
                    .ok_or_else(|| TreeError::MissingSubOptions {
                        label: spec.label.clone(),
                    })?;
                let mut children = Vec::with_capacity(sub_specs.len());
                for sub in sub_specs {
                    children.push(self.build_node(
                        sub,
                        Some(node_id),
                        disabled,
                        default_multi,
                        seen,
                    )?);
                }
                NodeKind::Menu {
                    has_selected: false,
                    children,
                }
            }
        };
        self.nodes[node_id.0].kind = kind;
        Ok(node_id)
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> &OptionNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut OptionNode {
        &mut self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by its string id (pre-order).
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.flatten().into_iter().find(|&n| self.node(n).id == id)
    }

    /// All nodes, pre-order: parent before children, children in input
    /// order.
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.flatten_into(root, &mut out);
        }
        out
    }

    fn flatten_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.node(id).children() {
            self.flatten_into(child, out);
        }
    }

    /// All leaf nodes, pre-order.
    pub fn flatten_leaves(&self) -> Vec<NodeId> {
        self.flatten()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// Path from a root down to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// The sibling group of `id`: its parent's children, or the roots.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id).parent {
            Some(parent) => self.node(parent).children().to_vec(),
            None => self.roots.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Active path
    // -------------------------------------------------------------------------

    /// Clear the active flag on every node.
    pub fn clear_active(&mut self) {
        for node in &mut self.nodes {
            node.active = false;
        }
    }

    /// Full invalidation, then re-mark the path from the root to `id`.
    pub fn mark_active_path(&mut self, id: NodeId) {
        self.clear_active();
        let path = self.path_to(id);
        for step in path {
            self.node_mut(step).active = true;
        }
    }

    /// Nodes currently on the active path, root first.
    pub fn active_path(&self) -> Vec<NodeId> {
        self.flatten()
            .into_iter()
            .filter(|&id| self.node(id).active)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selected leaves, pre-order.
    pub fn selected_leaves(&self) -> Vec<NodeId> {
        self.flatten()
            .into_iter()
            .filter(|&id| self.node(id).selected())
            .collect()
    }

    pub fn set_selected(&mut self, id: NodeId, value: bool) {
        if let NodeKind::Leaf { selected, .. } = &mut self.node_mut(id).kind {
            *selected = value;
        }
    }

    /// Clear `selected` on every non-multi leaf. Multi selections
    /// coexist with a fresh single selection and are left alone.
    pub fn clear_single_selection(&mut self) {
        for node in &mut self.nodes {
            if let NodeKind::Leaf { selected, multi } = &mut node.kind
                && !*multi
            {
                *selected = false;
            }
        }
    }

    /// Recompute `has_selected` on every menu from the current set of
    /// selected leaves.
    pub fn refresh_has_selected(&mut self) {
        for node in &mut self.nodes {
            if let NodeKind::Menu { has_selected, .. } = &mut node.kind {
                *has_selected = false;
            }
        }
        for leaf in self.selected_leaves() {
            let mut current = self.node(leaf).parent;
            while let Some(menu) = current {
                if let NodeKind::Menu { has_selected, .. } = &mut self.node_mut(menu).kind {
                    *has_selected = true;
                }
                current = self.node(menu).parent;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Search support
    // -------------------------------------------------------------------------

    /// Whether `id`'s label, or any descendant's, contains the
    /// lower-cased needle.
    pub fn subtree_matches(&self, id: NodeId, needle_lower: &str) -> bool {
        let node = self.node(id);
        if node.label.to_lowercase().contains(needle_lower) {
            return true;
        }
        node.children()
            .iter()
            .any(|&child| self.subtree_matches(child, needle_lower))
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Deep snapshot of the whole tree.
    pub fn snapshot(&self) -> Vec<OptionItem> {
        self.roots
            .iter()
            .map(|&root| self.snapshot_node(root))
            .collect()
    }

    /// Deep snapshot of one subtree.
    pub fn snapshot_node(&self, id: NodeId) -> OptionItem {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Leaf { selected, .. } => OptionItem::Select {
                id: node.id.clone(),
                label: node.label.clone(),
                selected: *selected,
                active: node.active,
                disabled: node.disabled,
                is_addition: false,
                data: node.data.clone(),
            },
            NodeKind::Menu {
                has_selected,
                children,
            } => OptionItem::Menu {
                id: node.id.clone(),
                label: node.label.clone(),
                has_selected: *has_selected,
                active: node.active,
                disabled: node.disabled,
                data: node.data.clone(),
                sub_options: children
                    .iter()
                    .map(|&child| self.snapshot_node(child))
                    .collect(),
            },
        }
    }
}
