//! Select controller state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use canopy::{OverlayManager, Popover, PopoverConfig, Rect, Size, TriggerEvent};
use log::debug;

use crate::error::TreeError;
use crate::events::SelectEvent;
use crate::tree::{NodeId, OptionItem, OptionSpec, OptionTree};

use super::config::{ClosePolicy, SelectConfig};
use super::search::{AdditionOption, SearchOption, decode_search_id, is_addition_id, is_search_id};

/// Unique identifier for a Select controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectId(usize);

impl SelectId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for SelectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__select_{}", self.0)
    }
}

/// What currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ActiveTarget {
    /// A tree node; the whole root-to-node path is marked active.
    Node(NodeId),
    /// Index into the synthetic search options.
    Search(usize),
    /// Index into the synthetic addition options.
    Addition(usize),
}

/// Kind tag on a rendered option slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Leaf,
    Menu,
    SearchResult,
    Addition,
}

/// One entry of the flat binding collection a rendering layer consumes.
///
/// Each rendered option element is tagged with the option's id and
/// disabled state; the id is what flows back through
/// [`Select::on_option_click`] and [`Select::set_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBinding {
    pub id: String,
    pub label: String,
    pub disabled: bool,
    pub active: bool,
    pub selected: bool,
    pub kind: BindingKind,
    /// Nesting level, 0 for top-level and synthetic options.
    pub depth: u16,
}

/// Internal state for a Select controller.
#[derive(Debug)]
pub(super) struct SelectInner {
    /// The option tree, rebuilt wholesale on input change.
    pub tree: OptionTree,
    pub config: SelectConfig,
    /// Free-text search string.
    pub search: String,
    /// Visible top-level options after filtering.
    pub filtered: Vec<NodeId>,
    /// Synthetic copies of nested leaves matching the search.
    pub search_options: Vec<SearchOption>,
    /// Synthetic addable leaves, one per addition definition.
    pub addition_options: Vec<AdditionOption>,
    /// Keyboard focus target; the tree's active flags mirror it.
    pub active: Option<ActiveTarget>,
    /// Pending events, drained by the host.
    pub events: Vec<SelectEvent>,
}

impl SelectInner {
    /// The navigation list at the top level: filtered options first,
    /// then search results, then addition options.
    pub fn nav_entries(&self) -> Vec<ActiveTarget> {
        let mut entries: Vec<ActiveTarget> =
            self.filtered.iter().copied().map(ActiveTarget::Node).collect();
        entries.extend((0..self.search_options.len()).map(ActiveTarget::Search));
        entries.extend((0..self.addition_options.len()).map(ActiveTarget::Addition));
        entries
    }

    /// First navigable target per the priority order.
    pub fn first_target(&self) -> Option<ActiveTarget> {
        self.nav_entries().into_iter().next()
    }

    /// Re-point keyboard focus, keeping every active flag consistent:
    /// full invalidation, then one path (or one synthetic option)
    /// re-marked.
    pub fn apply_active(&mut self, target: Option<ActiveTarget>) {
        self.tree.clear_active();
        for option in &mut self.search_options {
            option.active = false;
        }
        for option in &mut self.addition_options {
            option.active = false;
        }

        let valid = match target {
            Some(ActiveTarget::Node(id)) => {
                self.tree.mark_active_path(id);
                true
            }
            Some(ActiveTarget::Search(i)) => {
                if let Some(option) = self.search_options.get_mut(i) {
                    option.active = true;
                    true
                } else {
                    false
                }
            }
            Some(ActiveTarget::Addition(i)) => {
                if let Some(option) = self.addition_options.get_mut(i) {
                    option.active = true;
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        self.active = if valid { target } else { None };
    }

    /// Snapshot of a synthetic search option as a leaf item.
    pub fn search_item(&self, index: usize) -> Option<OptionItem> {
        self.search_options.get(index).map(SearchOption::to_item)
    }

    /// Snapshot of a synthetic addition option as a leaf item.
    pub fn addition_item(&self, index: usize) -> Option<OptionItem> {
        self.addition_options.get(index).map(AdditionOption::to_item)
    }
}

/// Headless select controller.
///
/// Owns the option tree and every derived projection (selection,
/// active path, search and addition state) and keeps them consistent
/// across mutations. A rendering layer reads snapshots and feeds back
/// input events; the embedded [`Popover`] handles floating position and
/// outside-click dismissal. Clones share state.
#[derive(Debug, Clone)]
pub struct Select {
    id: SelectId,
    pub(super) inner: Arc<RwLock<SelectInner>>,
    dirty: Arc<AtomicBool>,
    pub(super) popover: Popover,
}

impl Select {
    /// Build a controller from an ordered option spec list.
    ///
    /// Fails fast on shape violations; no controller is constructed
    /// from an invalid spec.
    pub fn new(
        specs: &[OptionSpec],
        config: SelectConfig,
        overlay: OverlayManager,
    ) -> Result<Self, TreeError> {
        let tree = OptionTree::build(specs, config.multi)?;
        let popover = Popover::new(
            PopoverConfig {
                trigger_event: config.trigger_event,
                virtual_anchor: config.trigger_event == TriggerEvent::ContextMenu,
                position: config.position,
                z_index: config.z_index,
            },
            overlay,
        );
        let mut inner = SelectInner {
            tree,
            config,
            search: String::new(),
            filtered: Vec::new(),
            search_options: Vec::new(),
            addition_options: Vec::new(),
            active: None,
            events: Vec::new(),
        };
        inner.recompute_search();
        Ok(Self {
            id: SelectId::new(),
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
            popover,
        })
    }

    /// Get the unique ID for this controller.
    pub fn id(&self) -> SelectId {
        self.id
    }

    /// Get the ID as a string (for element binding).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// The popover collaborator, for wiring trigger/content rects and
    /// pointer events.
    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    // -------------------------------------------------------------------------
    // Tree lifecycle
    // -------------------------------------------------------------------------

    /// Replace the option tree from a new spec list.
    ///
    /// The tree is rebuilt, not patched; every derived projection is
    /// recomputed and keyboard focus is cleared (old node ids do not
    /// survive a rebuild).
    pub fn set_options(&self, specs: &[OptionSpec]) -> Result<(), TreeError> {
        let Ok(mut inner) = self.inner.write() else {
            return Ok(());
        };
        inner.tree = OptionTree::build(specs, inner.config.multi)?;
        inner.active = None;
        inner.recompute_search();
        self.mark_dirty();
        debug!("{} rebuilt option tree", self.id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Observable state
    // -------------------------------------------------------------------------

    /// Deep snapshot of the full option tree.
    pub fn options(&self) -> Vec<OptionItem> {
        self.inner
            .read()
            .map(|inner| inner.tree.snapshot())
            .unwrap_or_default()
    }

    /// Snapshots of the visible top-level options.
    pub fn filtered_options(&self) -> Vec<OptionItem> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .filtered
                    .iter()
                    .map(|&id| inner.tree.snapshot_node(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The synthetic search-result options.
    pub fn search_options(&self) -> Vec<SearchOption> {
        self.inner
            .read()
            .map(|inner| inner.search_options.clone())
            .unwrap_or_default()
    }

    /// The synthetic addition options.
    pub fn addition_options(&self) -> Vec<AdditionOption> {
        self.inner
            .read()
            .map(|inner| inner.addition_options.clone())
            .unwrap_or_default()
    }

    /// Currently selected leaves, pre-order.
    pub fn selected(&self) -> Vec<OptionItem> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .tree
                    .selected_leaves()
                    .into_iter()
                    .map(|id| inner.tree.snapshot_node(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The current search text.
    pub fn search_text(&self) -> String {
        self.inner
            .read()
            .map(|inner| inner.search.clone())
            .unwrap_or_default()
    }

    /// Flat collection of option slots for the rendering layer.
    pub fn option_bindings(&self) -> Vec<OptionBinding> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut bindings = Vec::new();
        for &root in &inner.filtered {
            collect_bindings(&inner.tree, root, 0, &mut bindings);
        }
        for option in &inner.search_options {
            bindings.push(OptionBinding {
                id: option.id.clone(),
                label: option.label.clone(),
                disabled: option.disabled,
                active: option.active,
                selected: false,
                kind: BindingKind::SearchResult,
                depth: 0,
            });
        }
        for option in &inner.addition_options {
            bindings.push(OptionBinding {
                id: option.id.clone(),
                label: option.label.clone(),
                disabled: false,
                active: option.active,
                selected: false,
                kind: BindingKind::Addition,
                depth: 0,
            });
        }
        bindings
    }

    // -------------------------------------------------------------------------
    // Open/close
    // -------------------------------------------------------------------------

    /// Check if the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    /// Open the dropdown, applying the activate-on-open policy.
    pub fn open(&self) {
        if self.popover.is_open() {
            return;
        }
        self.popover.open();
        self.apply_open_effects();
    }

    /// Close the dropdown. Keyboard focus is cleared and the search
    /// text reset.
    pub fn close(&self) {
        if !self.popover.is_open() {
            return;
        }
        self.popover.close();
        self.apply_close_effects();
    }

    /// Open-side state transition: activation policy and the Opened
    /// event. Runs whether the popover flag flipped through [`Self::open`]
    /// or through a trigger gesture on the popover itself.
    pub(super) fn apply_open_effects(&self) {
        if let Ok(mut inner) = self.inner.write() {
            let target = if inner.config.activate_on_open {
                inner
                    .tree
                    .selected_leaves()
                    .first()
                    .copied()
                    .map(ActiveTarget::Node)
                    .or_else(|| inner.first_target())
            } else {
                None
            };
            inner.apply_active(target);
            inner.events.push(SelectEvent::Opened);
        }
        self.mark_dirty();
        debug!("{} opened", self.id);
    }

    /// Close-side state transition: focus cleared, search reset, Closed
    /// event. Runs after the popover flag flipped, by whichever path.
    pub(super) fn apply_close_effects(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.apply_active(None);
            inner.search.clear();
            inner.recompute_search();
            inner.events.push(SelectEvent::Closed);
        }
        self.mark_dirty();
        debug!("{} closed", self.id);
    }

    /// Toggle the dropdown open/closed.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Choose an option by id.
    ///
    /// Search-result ids are decoded back to their originating leaf.
    /// Returns the updated leaf snapshot, or `None` (with no event and
    /// no state change) when the id does not resolve to a leaf or the
    /// leaf is disabled.
    pub fn select_option(&self, id: &str) -> Option<OptionItem> {
        let mut inner = self.inner.write().ok()?;
        let target = if is_search_id(id) {
            decode_search_id(&inner.tree, id)?
        } else {
            inner.tree.find(id)?
        };
        let node = inner.tree.node(target);
        if !node.is_leaf() || node.disabled {
            return None;
        }
        let was_selected = node.selected();
        let multi = node.multi();

        if multi {
            inner.tree.set_selected(target, !was_selected);
        } else {
            inner.tree.clear_single_selection();
            inner.tree.set_selected(target, true);
        }
        inner.tree.refresh_has_selected();

        let snapshot = inner.tree.snapshot_node(target);
        inner.events.push(SelectEvent::Selected(snapshot.clone()));
        if snapshot.is_selected() != was_selected {
            inner
                .events
                .push(SelectEvent::SelectionChanged(snapshot.clone()));
        }
        let close = match inner.config.close_on_select {
            ClosePolicy::Always => true,
            ClosePolicy::Never => false,
            ClosePolicy::NotMulti => !multi,
        };
        drop(inner);

        self.mark_dirty();
        debug!("{} selected '{}'", self.id, snapshot.id());
        if close {
            self.close();
        }
        Some(snapshot)
    }

    // -------------------------------------------------------------------------
    // Active-item navigation
    // -------------------------------------------------------------------------

    /// Focus the option with the given id (tree, search-result or
    /// addition id), or clear focus with `None`.
    pub fn set_active(&self, id: Option<&str>) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let target = id.and_then(|id| resolve_target(&inner, id));
        if id.is_some() && target.is_none() {
            return;
        }
        inner.apply_active(target);
        drop(inner);
        self.mark_dirty();
    }

    /// The active path, root to focused node; a focused synthetic
    /// option yields a single-element list.
    pub fn active_list(&self) -> Vec<OptionItem> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        match inner.active {
            Some(ActiveTarget::Node(_)) => inner
                .tree
                .active_path()
                .into_iter()
                .map(|id| inner.tree.snapshot_node(id))
                .collect(),
            Some(ActiveTarget::Search(i)) => inner.search_item(i).into_iter().collect(),
            Some(ActiveTarget::Addition(i)) => inner.addition_item(i).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Focus the first navigable option: filtered top-level options,
    /// then search results, then addition options.
    pub fn set_first_active(&self) {
        if let Ok(mut inner) = self.inner.write() {
            let first = inner.first_target();
            inner.apply_active(first);
        }
        self.mark_dirty();
    }

    /// Move focus to the next sibling, clamped at the end.
    pub fn set_next_active(&self) {
        self.move_within_siblings(1);
    }

    /// Move focus to the previous sibling, clamped at the start.
    pub fn set_prev_active(&self) {
        self.move_within_siblings(-1);
    }

    /// Move focus up to the immediate parent menu.
    pub fn set_parent_active(&self) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        if inner.active.is_none() {
            let first = inner.first_target();
            inner.apply_active(first);
            drop(inner);
            self.mark_dirty();
            return;
        }
        if let Some(ActiveTarget::Node(id)) = inner.active
            && let Some(parent) = inner.tree.node(id).parent
        {
            inner.apply_active(Some(ActiveTarget::Node(parent)));
            drop(inner);
            self.mark_dirty();
        }
    }

    /// Descend into the focused menu's first child.
    pub fn set_child_active(&self) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        if inner.active.is_none() {
            let first = inner.first_target();
            inner.apply_active(first);
            drop(inner);
            self.mark_dirty();
            return;
        }
        if let Some(ActiveTarget::Node(id)) = inner.active
            && let Some(&first_child) = inner.tree.node(id).children().first()
        {
            inner.apply_active(Some(ActiveTarget::Node(first_child)));
            drop(inner);
            self.mark_dirty();
        }
    }

    fn move_within_siblings(&self, step: isize) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let Some(current) = inner.active else {
            // Nothing focused: fall back to first-active semantics.
            let first = inner.first_target();
            inner.apply_active(first);
            drop(inner);
            self.mark_dirty();
            return;
        };

        let group: Vec<ActiveTarget> = match current {
            ActiveTarget::Node(id) if inner.tree.node(id).parent.is_some() => inner
                .tree
                .siblings(id)
                .into_iter()
                .map(ActiveTarget::Node)
                .collect(),
            // Top-level nodes and synthetic options navigate across the
            // whole visible root list.
            _ => inner.nav_entries(),
        };
        let Some(position) = group.iter().position(|entry| *entry == current) else {
            // Stale focus (e.g. filtered away): restart from the top.
            let first = inner.first_target();
            inner.apply_active(first);
            drop(inner);
            self.mark_dirty();
            return;
        };

        // Clamp at the ends, no wraparound.
        let next = position.saturating_add_signed(step).min(group.len() - 1);
        if next != position {
            let target = group[next];
            inner.apply_active(Some(target));
            drop(inner);
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Drain pending events.
    pub fn take_events(&self) -> Vec<SelectEvent> {
        self.inner
            .write()
            .map(|mut inner| std::mem::take(&mut inner.events))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if observable state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub(super) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Geometry passthrough
    // -------------------------------------------------------------------------

    /// Feed the trigger element's rect (called by the rendering layer).
    pub fn set_trigger_rect(&self, rect: Rect) {
        self.popover.set_trigger_rect(rect);
    }

    /// Feed the measured dropdown content size.
    pub fn set_content_size(&self, size: Size) {
        self.popover.set_content_size(size);
    }

    /// Where the dropdown goes inside the viewport.
    pub fn dropdown_position(&self, viewport: Rect) -> Rect {
        self.popover.position(viewport)
    }
}

fn collect_bindings(tree: &OptionTree, id: NodeId, depth: u16, out: &mut Vec<OptionBinding>) {
    let node = tree.node(id);
    out.push(OptionBinding {
        id: node.id.clone(),
        label: node.label.clone(),
        disabled: node.disabled,
        active: node.active,
        selected: node.selected(),
        kind: if node.is_menu() {
            BindingKind::Menu
        } else {
            BindingKind::Leaf
        },
        depth,
    });
    for &child in node.children() {
        collect_bindings(tree, child, depth + 1, out);
    }
}

fn resolve_target(inner: &SelectInner, id: &str) -> Option<ActiveTarget> {
    if is_search_id(id) {
        return inner
            .search_options
            .iter()
            .position(|option| option.id == id)
            .map(ActiveTarget::Search);
    }
    if is_addition_id(id) {
        return inner
            .addition_options
            .iter()
            .position(|option| option.id == id)
            .map(ActiveTarget::Addition);
    }
    inner.tree.find(id).map(ActiveTarget::Node)
}
