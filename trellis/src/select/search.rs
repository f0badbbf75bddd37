//! Search, filtering, and the addition flow.
//!
//! At or above the configured minimum search length, three projections
//! are derived from the search text: the filtered top-level options,
//! synthetic "search option" copies of matching nested leaves, and
//! synthetic "addition options" offering to create a new entry. Below
//! the minimum, the full unfiltered tree is shown and no synthetic
//! options exist.

use log::{debug, trace};

use crate::events::SelectEvent;
use crate::tree::{NodeId, OptionData, OptionItem, OptionTree};

use super::state::{Select, SelectInner};

/// Reserved prefix of synthetic search-result ids.
pub(crate) const SEARCH_PREFIX: &str = "__search__";
/// Reserved prefix of synthetic addition ids.
pub(crate) const ADDITION_PREFIX: &str = "__add__";

pub(crate) fn is_search_id(id: &str) -> bool {
    id.starts_with(SEARCH_PREFIX)
}

pub(crate) fn is_addition_id(id: &str) -> bool {
    id.starts_with(ADDITION_PREFIX)
}

/// A nested leaf surfaced at the top level during search.
///
/// A copy of the original leaf with a collision-safe id; selecting it
/// resolves back to the original through [`decode_search_id`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOption {
    /// Encoded id: reserved prefix, ancestor-label chain, original id.
    pub id: String,
    /// Id of the originating leaf.
    pub origin: String,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
    pub data: OptionData,
}

impl SearchOption {
    /// Leaf-item snapshot for the rendering layer.
    pub fn to_item(&self) -> OptionItem {
        OptionItem::Select {
            id: self.id.clone(),
            label: self.label.clone(),
            selected: false,
            active: self.active,
            disabled: self.disabled,
            is_addition: false,
            data: self.data.clone(),
        }
    }
}

/// A synthetic "create a new entry matching this search text" leaf.
///
/// Never part of the tree and never carries selected state; choosing it
/// raises an addition event instead of a selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionOption {
    pub id: String,
    pub label: String,
    pub active: bool,
}

impl AdditionOption {
    pub fn to_item(&self) -> OptionItem {
        OptionItem::Select {
            id: self.id.clone(),
            label: self.label.clone(),
            selected: false,
            active: self.active,
            disabled: false,
            is_addition: true,
            data: OptionData::new(),
        }
    }
}

/// Encode a nested leaf's search-result id: the reserved prefix, the
/// chain of ancestor labels, and the original id.
pub(crate) fn encode_search_id(tree: &OptionTree, id: NodeId) -> String {
    let path = tree.path_to(id);
    let mut encoded = String::from(SEARCH_PREFIX);
    for &ancestor in &path[..path.len() - 1] {
        encoded.push('/');
        encoded.push_str(&tree.node(ancestor).label);
    }
    encoded.push('/');
    encoded.push_str(&tree.node(id).id);
    encoded
}

/// Resolve a search-result id back to its originating leaf.
///
/// Labels may contain the separator, so the id is not parsed; instead
/// every nested leaf is re-encoded and compared.
pub(crate) fn decode_search_id(tree: &OptionTree, encoded: &str) -> Option<NodeId> {
    tree.flatten_leaves()
        .into_iter()
        .filter(|&id| tree.node(id).parent.is_some())
        .find(|&id| encode_search_id(tree, id) == encoded)
}

impl SelectInner {
    /// Recompute filtered/search/addition projections from the current
    /// search text.
    pub(super) fn recompute_search(&mut self) {
        self.search_options.clear();
        self.addition_options.clear();

        let query = self.search.clone();
        if query.chars().count() < self.config.min_search_len {
            self.filtered = self.tree.roots().to_vec();
            return;
        }

        let needle = query.to_lowercase();
        // A top-level option stays visible if its own label matches or
        // any descendant's does.
        self.filtered = self
            .tree
            .roots()
            .iter()
            .copied()
            .filter(|&root| self.tree.subtree_matches(root, &needle))
            .collect();

        // Nested matching leaves are surfaced as top-level copies.
        for id in self.tree.flatten_leaves() {
            let node = self.tree.node(id);
            if node.parent.is_some() && node.label.to_lowercase().contains(&needle) {
                self.search_options.push(SearchOption {
                    id: encode_search_id(&self.tree, id),
                    origin: node.id.clone(),
                    label: node.label.clone(),
                    active: false,
                    disabled: node.disabled,
                    data: node.data.clone(),
                });
            }
        }

        for addition in &self.config.additions {
            let label = if addition.label.contains("{}") {
                addition.label.replace("{}", &query)
            } else {
                addition.label.clone()
            };
            self.addition_options.push(AdditionOption {
                id: format!("{ADDITION_PREFIX}/{}", addition.id),
                label,
                active: false,
            });
        }
        trace!(
            "search '{}': {} filtered, {} search options, {} addition options",
            query,
            self.filtered.len(),
            self.search_options.len(),
            self.addition_options.len(),
        );
    }
}

impl Select {
    /// Replace the search text and recompute every derived projection.
    ///
    /// Keyboard focus always resets to the first navigable option.
    pub fn set_search(&self, text: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.search = text.into();
            inner.recompute_search();
            let first = inner.first_target();
            inner.apply_active(first);
        }
        self.mark_dirty();
    }

    /// Run the addition flow for a generated addition option.
    ///
    /// A no-op for ids that do not match a current addition option. The
    /// configured validation predicate may reject the search text, in
    /// which case a failure-tagged event is emitted and state is left
    /// untouched; on acceptance the search text is cleared.
    pub fn add_option(&self, id: &str) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        if !inner.addition_options.iter().any(|option| option.id == id) {
            return;
        }
        let query = inner.search.clone();
        if let Some(validate) = inner.config.validate_addition.clone()
            && !validate(&query)
        {
            inner.events.push(SelectEvent::AdditionRejected {
                id: id.to_string(),
                query,
            });
            drop(inner);
            self.mark_dirty();
            return;
        }
        inner.events.push(SelectEvent::AdditionAccepted {
            id: id.to_string(),
            query,
        });
        inner.search.clear();
        inner.recompute_search();
        let first = inner.first_target();
        inner.apply_active(first);
        drop(inner);
        self.mark_dirty();
        debug!("{} accepted addition '{id}'", self.id());
    }
}
