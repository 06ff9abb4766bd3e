#![forbid(unsafe_code)]

//! Single-owner pointer capture with scoped release.
//!
//! While a drag is in progress the dragging widget must see every pointer
//! move and release, including those outside its own area. A widget gets
//! that by acquiring the capture; the returned [`CaptureGuard`] releases it
//! when dropped. Dropping the widget state mid-drag therefore releases the
//! capture too, so a capture can never outlive its owner.
//!
//! # Invariants
//!
//! 1. At most one owner holds the capture at a time.
//! 2. A guard only releases the capture it acquired; a stale guard whose
//!    owner no longer holds the capture is a no-op on drop.
//! 3. Every successful acquire is matched by exactly one release.
//!
//! The registry is `Rc`-shared: all input handling runs on the UI thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Identity of a widget that may hold the pointer capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureOwner(u32);

impl CaptureOwner {
    /// Get the raw owner value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Lifetime counters, useful for asserting that nothing leaked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Successful acquisitions.
    pub acquired: u64,
    /// Releases performed by guard drops.
    pub released: u64,
    /// Acquire attempts refused because the capture was already held.
    pub rejected: u64,
}

#[derive(Debug, Default)]
struct CaptureSlot {
    holder: Option<CaptureOwner>,
    next_owner: u32,
    stats: CaptureStats,
}

/// Shared pointer-capture registry.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    slot: Rc<RefCell<CaptureSlot>>,
}

impl PointerCapture {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh owner identity.
    pub fn register_owner(&self) -> CaptureOwner {
        let mut slot = self.slot.borrow_mut();
        slot.next_owner = slot.next_owner.wrapping_add(1);
        CaptureOwner(slot.next_owner)
    }

    /// Try to take the capture for `owner`.
    ///
    /// Returns `None` if the capture is already held, by anyone.
    pub fn acquire(&self, owner: CaptureOwner) -> Option<CaptureGuard> {
        let mut slot = self.slot.borrow_mut();
        if slot.holder.is_some() {
            slot.stats.rejected += 1;
            return None;
        }
        slot.holder = Some(owner);
        slot.stats.acquired += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "capture.acquire", owner = owner.id());
        Some(CaptureGuard {
            slot: Rc::downgrade(&self.slot),
            owner,
        })
    }

    /// Current holder, if any.
    #[must_use]
    pub fn holder(&self) -> Option<CaptureOwner> {
        self.slot.borrow().holder
    }

    /// Whether any owner holds the capture.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }

    /// Whether pointer input should reach `owner`.
    ///
    /// The holder receives everything; other owners receive nothing while the
    /// capture is held; with no holder, delivery falls back to `inside`.
    #[must_use]
    pub fn delivers_to(&self, owner: CaptureOwner, inside: bool) -> bool {
        match self.holder() {
            Some(holder) => holder == owner,
            None => inside,
        }
    }

    /// Snapshot of the lifetime counters.
    #[must_use]
    pub fn stats(&self) -> CaptureStats {
        self.slot.borrow().stats
    }
}

/// Proof of capture ownership; releases the capture on drop.
#[derive(Debug)]
#[must_use = "dropping the guard releases the pointer capture"]
pub struct CaptureGuard {
    slot: Weak<RefCell<CaptureSlot>>,
    owner: CaptureOwner,
}

impl CaptureGuard {
    /// Owner this guard acquired the capture for.
    #[must_use]
    pub const fn owner(&self) -> CaptureOwner {
        self.owner
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let mut slot = slot.borrow_mut();
        if slot.holder == Some(self.owner) {
            slot.holder = None;
            slot.stats.released += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "capture.release", owner = self.owner.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_are_distinct() {
        let capture = PointerCapture::new();
        let a = capture.register_owner();
        let b = capture.register_owner();
        assert_ne!(a, b);
    }

    #[test]
    fn guard_drop_releases() {
        let capture = PointerCapture::new();
        let owner = capture.register_owner();
        {
            let guard = capture.acquire(owner).expect("free capture");
            assert_eq!(guard.owner(), owner);
            assert_eq!(capture.holder(), Some(owner));
        }
        assert!(!capture.is_held());
        assert_eq!(
            capture.stats(),
            CaptureStats {
                acquired: 1,
                released: 1,
                rejected: 0
            }
        );
    }

    #[test]
    fn second_acquire_is_rejected_while_held() {
        let capture = PointerCapture::new();
        let a = capture.register_owner();
        let b = capture.register_owner();
        let _guard = capture.acquire(a).expect("free capture");
        assert!(capture.acquire(b).is_none());
        assert!(capture.acquire(a).is_none());
        assert_eq!(capture.stats().rejected, 2);
        assert_eq!(capture.holder(), Some(a));
    }

    #[test]
    fn delivery_rules() {
        let capture = PointerCapture::new();
        let a = capture.register_owner();
        let b = capture.register_owner();
        assert!(capture.delivers_to(a, true));
        assert!(!capture.delivers_to(a, false));

        let guard = capture.acquire(a).expect("free capture");
        assert!(capture.delivers_to(a, false));
        assert!(!capture.delivers_to(b, true));
        drop(guard);
        assert!(capture.delivers_to(b, true));
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let capture = PointerCapture::new();
        let owner = capture.register_owner();
        let guard = capture.acquire(owner).expect("free capture");
        drop(capture);
        drop(guard);
    }
}
