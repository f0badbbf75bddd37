//! Headless popover and backdrop primitives.
//!
//! `canopy` knows nothing about how content is drawn. It tracks the
//! open/dismiss life cycle of a floating element anchored to a trigger,
//! computes where the element should go inside a viewport, and manages
//! the single dimming backdrop shared by every popover in the process.
//! A rendering layer feeds it rectangles and pointer events and reads
//! positions back.

pub mod backdrop;
pub mod geometry;
pub mod popover;
pub mod position;

pub use backdrop::{Backdrop, OverlayManager};
pub use geometry::{Point, Rect, Size};
pub use popover::{DismissKind, Popover, PopoverConfig, TriggerEvent};
pub use position::{Placement, PositionConfig, Strategy, compute_position};
