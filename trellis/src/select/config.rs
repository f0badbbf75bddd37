//! Controller configuration.

use std::sync::Arc;

use canopy::{PositionConfig, TriggerEvent};
use serde::{Deserialize, Serialize};

/// When a successful selection closes the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePolicy {
    /// Selection never closes the dropdown.
    Never,
    /// Selection always closes the dropdown.
    Always,
    /// Close unless the chosen option is multi-select.
    #[default]
    NotMulti,
}

/// One "create a new entry" definition surfaced during search.
///
/// A `{}` in the label is replaced with the live search text; labels
/// without the placeholder are shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionSpec {
    pub id: String,
    pub label: String,
}

impl AdditionSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Host-supplied predicate gating the addition flow.
pub type AdditionValidator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Construction-time controller configuration.
#[derive(Clone)]
pub struct SelectConfig {
    /// Close behavior after a successful selection.
    pub close_on_select: ClosePolicy,
    /// Search text length (in characters) below which no filtering or
    /// synthetic options are produced.
    pub min_search_len: usize,
    /// Addition definitions; empty disables the addition flow.
    pub additions: Vec<AdditionSpec>,
    /// Activate the selected (or first) option when opening.
    pub activate_on_open: bool,
    /// Tree-level selection mode, overridable per option.
    pub multi: bool,
    /// Which pointer gesture opens the dropdown.
    pub trigger_event: TriggerEvent,
    /// Validates the search text before an addition is accepted.
    pub validate_addition: Option<AdditionValidator>,
    /// Positioning overrides passed through to the popover.
    pub position: Option<PositionConfig>,
    /// Stacking level of the dropdown content.
    pub z_index: i32,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            close_on_select: ClosePolicy::default(),
            min_search_len: 1,
            additions: Vec::new(),
            activate_on_open: true,
            multi: false,
            trigger_event: TriggerEvent::default(),
            validate_addition: None,
            position: None,
            z_index: 30,
        }
    }
}

impl std::fmt::Debug for SelectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectConfig")
            .field("close_on_select", &self.close_on_select)
            .field("min_search_len", &self.min_search_len)
            .field("additions", &self.additions)
            .field("activate_on_open", &self.activate_on_open)
            .field("multi", &self.multi)
            .field("trigger_event", &self.trigger_event)
            .field(
                "validate_addition",
                &self.validate_addition.as_ref().map(|_| "<fn>"),
            )
            .field("position", &self.position)
            .field("z_index", &self.z_index)
            .finish()
    }
}

impl SelectConfig {
    pub fn close_on_select(mut self, policy: ClosePolicy) -> Self {
        self.close_on_select = policy;
        self
    }

    pub fn min_search_len(mut self, len: usize) -> Self {
        self.min_search_len = len;
        self
    }

    pub fn additions(mut self, additions: Vec<AdditionSpec>) -> Self {
        self.additions = additions;
        self
    }

    pub fn activate_on_open(mut self, activate: bool) -> Self {
        self.activate_on_open = activate;
        self
    }

    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn trigger_event(mut self, trigger: TriggerEvent) -> Self {
        self.trigger_event = trigger;
        self
    }

    pub fn validate_addition(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validate_addition = Some(Arc::new(predicate));
        self
    }

    pub fn position(mut self, position: PositionConfig) -> Self {
        self.position = Some(position);
        self
    }
}
