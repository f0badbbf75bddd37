//! Popover open/dismiss state machine.
//!
//! A popover pairs a trigger rectangle with floating content. The host
//! forwards raw pointer events; the popover decides when it opens, where
//! its content goes, and when an outside press dismisses it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::backdrop::{OverlayManager, OverlayOwner};
use crate::geometry::{Point, Rect, Size};
use crate::position::{PositionConfig, compute_position};

/// Which pointer gesture opens the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerEvent {
    /// Primary-button release on the trigger element.
    #[default]
    MouseUp,
    /// Context-menu gesture; the content follows the pointer position.
    ContextMenu,
}

/// Why an open popover was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissKind {
    /// A press-and-release pair landed outside trigger and content.
    Outside,
    /// A non-primary button was pressed outside while open.
    NonPrimary,
}

/// Construction-time popover configuration.
#[derive(Debug, Clone, Default)]
pub struct PopoverConfig {
    pub trigger_event: TriggerEvent,
    /// Anchor the content to the pointer position of the opening event
    /// instead of the trigger rect. Implied for context menus.
    pub virtual_anchor: bool,
    /// Positioning overrides; defaults follow the trigger event.
    pub position: Option<PositionConfig>,
    /// Stacking level of the content; the backdrop sits one below.
    pub z_index: i32,
}

#[derive(Debug)]
struct PopoverInner {
    trigger_rect: Option<Rect>,
    content_size: Size,
    content_rect: Option<Rect>,
    virtual_point: Option<Point>,
    /// A primary-button press started outside; the matching release
    /// dismisses.
    outside_press: bool,
    position: PositionConfig,
    trigger_event: TriggerEvent,
    virtual_anchor: bool,
    z_index: i32,
}

/// Headless popover. Clones share state.
#[derive(Debug, Clone)]
pub struct Popover {
    owner: OverlayOwner,
    inner: Arc<RwLock<PopoverInner>>,
    is_open: Arc<AtomicBool>,
    overlay: OverlayManager,
}

impl Popover {
    pub fn new(config: PopoverConfig, overlay: OverlayManager) -> Self {
        let position = config
            .position
            .unwrap_or_else(|| PositionConfig::for_trigger(config.trigger_event));
        let virtual_anchor =
            config.virtual_anchor || config.trigger_event == TriggerEvent::ContextMenu;
        Self {
            owner: OverlayOwner::next(),
            inner: Arc::new(RwLock::new(PopoverInner {
                trigger_rect: None,
                content_size: Size::default(),
                content_rect: None,
                virtual_point: None,
                outside_press: false,
                position,
                trigger_event: config.trigger_event,
                virtual_anchor,
                z_index: config.z_index,
            })),
            is_open: Arc::new(AtomicBool::new(false)),
            overlay,
        }
    }

    /// Identifier used for backdrop ownership.
    pub fn owner(&self) -> OverlayOwner {
        self.owner
    }

    pub fn trigger_event(&self) -> TriggerEvent {
        self.inner
            .read()
            .map(|guard| guard.trigger_event)
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Open/close
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    pub fn open(&self) {
        if !self.is_open.swap(true, Ordering::SeqCst) {
            let z = self
                .inner
                .read()
                .map(|guard| guard.z_index)
                .unwrap_or_default();
            self.overlay.show_behind(self.owner, z);
            debug!("popover {} opened", self.owner);
        }
    }

    pub fn close(&self) {
        if self.is_open.swap(false, Ordering::SeqCst) {
            if let Ok(mut guard) = self.inner.write() {
                guard.outside_press = false;
                guard.content_rect = None;
            }
            self.overlay.hide(self.owner);
            debug!("popover {} closed", self.owner);
        }
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// The configured trigger gesture fired on the trigger element.
    ///
    /// Returns true if the popover opened. A primary press that started
    /// outside swallows the following trigger event (the release that
    /// dismissed one popover must not immediately reopen it), except for
    /// context menus which always open.
    pub fn on_trigger(&self, at: Point) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if guard.outside_press && guard.trigger_event != TriggerEvent::ContextMenu {
            return false;
        }
        if guard.virtual_anchor {
            guard.virtual_point = Some(at);
        }
        drop(guard);
        self.open();
        true
    }

    /// A pointer button went down somewhere in the viewport.
    ///
    /// `primary` distinguishes the main button from the rest: a primary
    /// press outside arms the press-and-release dismissal pair, any other
    /// button dismisses on the spot.
    pub fn on_pointer_down(&self, at: Point, primary: bool) -> Option<DismissKind> {
        if !self.is_open() {
            return None;
        }
        let Ok(mut guard) = self.inner.write() else {
            return None;
        };
        if Self::hits_own_element(&guard, at) {
            return None;
        }
        if primary {
            guard.outside_press = true;
            None
        } else {
            drop(guard);
            self.close();
            Some(DismissKind::NonPrimary)
        }
    }

    /// The pointer button came back up.
    pub fn on_pointer_up(&self) -> Option<DismissKind> {
        let armed = self
            .inner
            .write()
            .map(|mut guard| std::mem::take(&mut guard.outside_press))
            .unwrap_or(false);
        if armed && self.is_open() {
            self.close();
            Some(DismissKind::Outside)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Geometry (fed by the rendering layer)
    // -------------------------------------------------------------------------

    pub fn set_trigger_rect(&self, rect: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.trigger_rect = Some(rect);
        }
    }

    pub fn trigger_rect(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|guard| guard.trigger_rect)
    }

    pub fn set_content_size(&self, size: Size) {
        if let Ok(mut guard) = self.inner.write() {
            guard.content_size = size;
        }
    }

    /// Move the virtual anchor point (pointer-following popovers).
    pub fn set_virtual_point(&self, point: Point) {
        if let Ok(mut guard) = self.inner.write() {
            guard.virtual_point = Some(point);
        }
    }

    /// Compute (and remember, for hit testing) where the content goes.
    ///
    /// The virtual anchor point wins over the trigger rect when both are
    /// present.
    pub fn position(&self, viewport: Rect) -> Rect {
        let Ok(mut guard) = self.inner.write() else {
            return Rect::default();
        };
        let anchor = match (guard.virtual_anchor, guard.virtual_point) {
            (true, Some(point)) => Rect::at_point(point),
            _ => guard.trigger_rect.unwrap_or_default(),
        };
        let rect = compute_position(viewport, anchor, guard.content_size, &guard.position);
        guard.content_rect = Some(rect);
        rect
    }

    /// Last rect handed out by [`Popover::position`].
    pub fn content_rect(&self) -> Option<Rect> {
        self.inner.read().ok().and_then(|guard| guard.content_rect)
    }

    fn hits_own_element(guard: &PopoverInner, at: Point) -> bool {
        guard.trigger_rect.is_some_and(|rect| rect.contains(at))
            || guard.content_rect.is_some_and(|rect| rect.contains(at))
    }
}
