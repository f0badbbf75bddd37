//! Headless hierarchical select controller.
//!
//! State only, no rendering: option trees with nested menus, single and
//! multi selection, keyboard navigation along an active path, substring
//! search with synthetic search/addition options, and an embedded
//! [`canopy`] popover for floating position and dismissal.

pub mod error;
pub mod events;
pub mod keys;
pub mod select;
pub mod tree;

pub use error::TreeError;
pub use events::{EventResult, SelectEvent};
pub use select::Select;

pub mod prelude {
    pub use crate::error::TreeError;
    pub use crate::events::{EventResult, SelectEvent};
    pub use crate::keys::{Key, KeyCombo, Modifiers};
    pub use crate::select::{
        AdditionOption, AdditionSpec, BindingKind, ClosePolicy, OptionBinding, SearchOption,
        Select, SelectConfig, SelectId,
    };
    pub use crate::tree::{NodeId, OptionItem, OptionSpec, OptionTree, SpecKind};

    pub use canopy::{
        OverlayManager, Placement, Point, Popover, PopoverConfig, PositionConfig, Rect, Size,
        TriggerEvent,
    };
}
