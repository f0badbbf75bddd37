//! The shared dimming backdrop and its owning manager.
//!
//! There is exactly one backdrop no matter how many popovers exist.
//! Rather than a process-wide singleton, the host constructs one
//! [`OverlayManager`] and injects a clone into every popover, which makes
//! teardown and testing explicit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;

/// Identifies which popover currently holds the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayOwner(usize);

impl OverlayOwner {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for OverlayOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__popover_{}", self.0)
    }
}

/// Snapshot of the single dimming layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Backdrop {
    /// Whether the backdrop is currently shown.
    pub visible: bool,
    /// Stacking level, one below the element it backs.
    pub z_index: i32,
}

#[derive(Debug, Default)]
struct OverlayInner {
    backdrop: Backdrop,
    held_by: Option<OverlayOwner>,
}

/// Host-owned context managing the shared backdrop.
///
/// Clones share state; construct one per application and hand a clone to
/// every popover.
#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    inner: Arc<RwLock<OverlayInner>>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the backdrop one stacking level below `behind_z`, handing
    /// ownership to `owner`. A later claim steals the backdrop from the
    /// previous owner.
    pub fn show_behind(&self, owner: OverlayOwner, behind_z: i32) {
        if let Ok(mut guard) = self.inner.write() {
            guard.backdrop.visible = true;
            guard.backdrop.z_index = behind_z - 1;
            guard.held_by = Some(owner);
            debug!("backdrop shown behind z={behind_z} for {owner}");
        }
    }

    /// Hide the backdrop if `owner` still holds it. A popover that lost
    /// the backdrop to a newer one must not hide it on close.
    pub fn hide(&self, owner: OverlayOwner) {
        if let Ok(mut guard) = self.inner.write()
            && guard.held_by == Some(owner)
        {
            guard.backdrop.visible = false;
            guard.held_by = None;
            debug!("backdrop hidden by {owner}");
        }
    }

    /// Current backdrop state, for the rendering layer.
    pub fn backdrop(&self) -> Backdrop {
        self.inner
            .read()
            .map(|guard| guard.backdrop)
            .unwrap_or_default()
    }

    /// Which popover currently holds the backdrop, if any.
    pub fn holder(&self) -> Option<OverlayOwner> {
        self.inner.read().ok().and_then(|guard| guard.held_by)
    }
}
