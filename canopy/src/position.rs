//! Floating position computation.
//!
//! Pure functions: given a viewport, an anchor rectangle and the size of
//! the floating content, compute where the content goes. Middleware
//! options mirror the usual floating-UI trio — an offset along the main
//! axis, flipping to the opposite side when the preferred side lacks
//! room, and shifting along the cross axis to stay inside the viewport.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};
use crate::popover::TriggerEvent;

/// Preferred side and alignment of the content relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Below the anchor, left edges aligned.
    #[default]
    BottomStart,
    /// Above the anchor, left edges aligned.
    TopStart,
    /// To the right of the anchor, top edges aligned.
    RightStart,
    /// To the left of the anchor, top edges aligned.
    LeftStart,
}

impl Placement {
    const fn opposite(self) -> Self {
        match self {
            Self::BottomStart => Self::TopStart,
            Self::TopStart => Self::BottomStart,
            Self::RightStart => Self::LeftStart,
            Self::LeftStart => Self::RightStart,
        }
    }
}

/// CSS positioning strategy, passed through to the rendering layer.
///
/// Does not influence the computed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Absolute,
    Fixed,
}

/// Positioning configuration for one popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionConfig {
    pub placement: Placement,
    pub strategy: Strategy,
    /// Gap between anchor and content along the main axis.
    pub offset: u16,
    /// Fall back to the opposite side when the content does not fit.
    pub flip: bool,
    /// Clamp the cross-axis position into the viewport.
    pub shift: bool,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            strategy: Strategy::default(),
            offset: 0,
            flip: true,
            shift: false,
        }
    }
}

impl PositionConfig {
    /// Default configuration for a given trigger style: click-opened
    /// popovers drop below their trigger and flip when cramped, context
    /// menus open beside the pointer with a small gap and shift to stay
    /// on screen.
    pub fn for_trigger(trigger: TriggerEvent) -> Self {
        match trigger {
            TriggerEvent::MouseUp => Self::default(),
            TriggerEvent::ContextMenu => Self {
                placement: Placement::RightStart,
                strategy: Strategy::Absolute,
                offset: 1,
                flip: false,
                shift: true,
            },
        }
    }
}

/// Compute the content rectangle for a floating element.
///
/// Flip is applied first (choice of side), then shift (cross-axis
/// clamping). As a last resort the content is clamped into the viewport
/// so the returned rect never extends past its edges.
pub fn compute_position(
    viewport: Rect,
    anchor: Rect,
    content: Size,
    config: &PositionConfig,
) -> Rect {
    let width = content.width.min(viewport.width);
    let height = content.height.min(viewport.height);
    let size = Size::new(width, height);

    let mut placement = config.placement;
    if config.flip && !fits(viewport, anchor, size, placement, config.offset) {
        let flipped = placement.opposite();
        if fits(viewport, anchor, size, flipped, config.offset) {
            placement = flipped;
        }
    }

    let (x, y) = place(anchor, size, placement, config.offset);
    let (x, y) = if config.shift {
        shift_cross_axis(viewport, size, placement, x, y)
    } else {
        (x, y)
    };

    // Final clamp keeps the rect inside the viewport even when the
    // anchor itself sits at an edge.
    let x = x.clamp(
        viewport.x,
        viewport.right().saturating_sub(width).max(viewport.x),
    );
    let y = y.clamp(
        viewport.y,
        viewport.bottom().saturating_sub(height).max(viewport.y),
    );
    Rect::new(x, y, width, height)
}

fn place(anchor: Rect, size: Size, placement: Placement, offset: u16) -> (u16, u16) {
    match placement {
        Placement::BottomStart => (anchor.x, anchor.bottom().saturating_add(offset)),
        Placement::TopStart => (
            anchor.x,
            anchor.top().saturating_sub(offset.saturating_add(size.height)),
        ),
        Placement::RightStart => (anchor.right().saturating_add(offset), anchor.y),
        Placement::LeftStart => (
            anchor.left().saturating_sub(offset.saturating_add(size.width)),
            anchor.y,
        ),
    }
}

fn fits(viewport: Rect, anchor: Rect, size: Size, placement: Placement, offset: u16) -> bool {
    match placement {
        Placement::BottomStart => {
            anchor.bottom() as u32 + offset as u32 + size.height as u32 <= viewport.bottom() as u32
        }
        Placement::TopStart => {
            anchor.top() as u32 >= viewport.top() as u32 + offset as u32 + size.height as u32
        }
        Placement::RightStart => {
            anchor.right() as u32 + offset as u32 + size.width as u32 <= viewport.right() as u32
        }
        Placement::LeftStart => {
            anchor.left() as u32 >= viewport.left() as u32 + offset as u32 + size.width as u32
        }
    }
}

fn shift_cross_axis(
    viewport: Rect,
    size: Size,
    placement: Placement,
    x: u16,
    y: u16,
) -> (u16, u16) {
    match placement {
        Placement::BottomStart | Placement::TopStart => {
            let max_x = viewport.right().saturating_sub(size.width).max(viewport.x);
            (x.clamp(viewport.x, max_x), y)
        }
        Placement::RightStart | Placement::LeftStart => {
            let max_y = viewport.bottom().saturating_sub(size.height).max(viewport.y);
            (x, y.clamp(viewport.y, max_y))
        }
    }
}
