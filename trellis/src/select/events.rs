//! Input handling for the Select controller.
//!
//! The hosting layer translates its platform's input into [`KeyCombo`]s
//! and viewport points and calls these handlers; nothing here touches a
//! real event source.

use canopy::Point;
use log::trace;

use crate::events::EventResult;
use crate::keys::{Key, KeyCombo};

use super::search::is_addition_id;
use super::state::{ActiveTarget, Select};

impl Select {
    /// Handle a key while the trigger or dropdown has input focus.
    pub fn on_key(&self, key: &KeyCombo) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }
        trace!("{} key {:?}", self.id(), key.key);

        if !self.is_open() {
            // Closed state - only Enter opens.
            return match key.key {
                Key::Enter => {
                    self.open();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        match key.key {
            Key::Escape => {
                self.close();
                EventResult::Consumed
            }
            // Tab is intercepted: focus moves inside the dropdown, not
            // through the host's focus order.
            Key::Tab if key.modifiers.shift => {
                self.set_prev_active();
                EventResult::Consumed
            }
            Key::Tab => {
                self.set_next_active();
                EventResult::Consumed
            }
            Key::Down => {
                self.set_next_active();
                EventResult::Consumed
            }
            Key::Up => {
                self.set_prev_active();
                EventResult::Consumed
            }
            Key::Left => {
                self.set_parent_active();
                EventResult::Consumed
            }
            Key::Right => {
                self.set_child_active();
                EventResult::Consumed
            }
            Key::Enter => {
                self.activate_focused();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Enter on the focused option: select a leaf, descend into a menu,
    /// or run the addition flow. With nothing focused, focus the first
    /// navigable option instead.
    fn activate_focused(&self) {
        let Ok(inner) = self.inner.read() else {
            return;
        };
        match inner.active {
            None => {
                drop(inner);
                self.set_first_active();
            }
            Some(ActiveTarget::Node(id)) => {
                let node = inner.tree.node(id);
                if node.is_menu() {
                    drop(inner);
                    self.set_child_active();
                } else {
                    let option_id = node.id.clone();
                    drop(inner);
                    self.select_option(&option_id);
                }
            }
            Some(ActiveTarget::Search(i)) => {
                let Some(option) = inner.search_options.get(i) else {
                    return;
                };
                let search_id = option.id.clone();
                drop(inner);
                self.select_option(&search_id);
            }
            Some(ActiveTarget::Addition(i)) => {
                let Some(option) = inner.addition_options.get(i) else {
                    return;
                };
                let addition_id = option.id.clone();
                drop(inner);
                self.add_option(&addition_id);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pointer input (delegated to the popover collaborator)
    // -------------------------------------------------------------------------

    /// The configured trigger gesture fired on the trigger element.
    pub fn on_trigger(&self, at: Point) -> EventResult {
        let was_open = self.popover.is_open();
        if self.popover.on_trigger(at) {
            // The popover flips its own flag; run the open-side effects
            // (activation policy, events) through the controller.
            if !was_open {
                self.apply_open_effects();
            }
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// A pointer button went down somewhere in the viewport.
    pub fn on_pointer_down(&self, at: Point, primary: bool) -> EventResult {
        if self.popover.on_pointer_down(at, primary).is_some() {
            self.apply_close_effects();
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// The pointer button came back up.
    pub fn on_pointer_up(&self) -> EventResult {
        if self.popover.on_pointer_up().is_some() {
            self.apply_close_effects();
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// A rendered option element was clicked.
    ///
    /// Addition options route into the addition flow; menu options
    /// descend; anything else goes through selection.
    pub fn on_option_click(&self, id: &str) -> EventResult {
        if is_addition_id(id) {
            self.add_option(id);
            return EventResult::Consumed;
        }
        if let Ok(inner) = self.inner.read() {
            let menu = inner
                .tree
                .find(id)
                .is_some_and(|node| inner.tree.node(node).is_menu());
            if menu {
                drop(inner);
                self.set_active(Some(id));
                self.set_child_active();
                return EventResult::Consumed;
            }
        }
        match self.select_option(id) {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }
}
