//! Event types flowing between the controller and its host.

use crate::tree::OptionItem;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, let the host process it.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Events emitted by the controller, drained via
/// [`crate::select::Select::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent {
    /// The dropdown opened.
    Opened,
    /// The dropdown closed.
    Closed,
    /// A choosable option was activated. Fires on every successful
    /// `select_option` call, including re-clicks that change nothing.
    Selected(OptionItem),
    /// The option's `selected` flag actually flipped.
    SelectionChanged(OptionItem),
    /// The addition flow accepted the current search text. The host is
    /// expected to create the new entry; the controller never invents
    /// tree nodes itself.
    AdditionAccepted {
        /// Id of the synthetic addition option.
        id: String,
        /// Search text at the time of acceptance.
        query: String,
    },
    /// The configured validation predicate rejected the search text.
    /// The search text is preserved so the user can correct it.
    AdditionRejected {
        id: String,
        query: String,
    },
}
