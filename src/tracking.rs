//! Convenience helpers for element geometry tracking.
//!
//! Slint has no "read the bounding box of that element" call; instead the
//! `.slint` side reports rectangles through callbacks whenever they change.
//! [`LayoutTracker`] wraps a shared [`LayoutCache`] and hands out callbacks
//! with the matching signatures.
//!
//! # Example
//!
//! ```ignore
//! use slint_animated_lines::LayoutTracker;
//!
//! let tracker = LayoutTracker::new();
//!
//! // Wire up callbacks (one-time setup)
//! window.on_container_rect_changed(tracker.container_rect_callback());
//! window.on_origin_rect_changed(tracker.origin_rect_callback());
//! window.on_target_rect_changed(tracker.target_rect_callback());
//!
//! // Get the cache for use elsewhere
//! let cache = tracker.cache();
//! ```

use crate::state::LayoutCache;
use std::cell::RefCell;
use std::rc::Rc;

/// Convenience wrapper for [`LayoutCache`] that provides ready-to-use Slint callbacks.
#[derive(Clone, Default)]
pub struct LayoutTracker {
    cache: Rc<RefCell<LayoutCache>>,
}

impl LayoutTracker {
    /// Create a new tracker with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker wrapping an existing cache.
    ///
    /// Useful when the cache needs to be seeded (for example with the number
    /// of target slots) before callbacks are connected.
    pub fn with_cache(cache: Rc<RefCell<LayoutCache>>) -> Self {
        Self { cache }
    }

    /// Get a clone of the internal cache reference.
    pub fn cache(&self) -> Rc<RefCell<LayoutCache>> {
        self.cache.clone()
    }

    /// Callback for container rectangle updates: `(x, y, width, height)`.
    pub fn container_rect_callback(&self) -> impl Fn(f32, f32, f32, f32) + Clone {
        let cache = self.cache.clone();
        move |x, y, width, height| {
            cache.borrow_mut().update_container(x, y, width, height);
        }
    }

    /// Callback for origin rectangle updates: `(x, y, width, height)`.
    pub fn origin_rect_callback(&self) -> impl Fn(f32, f32, f32, f32) + Clone {
        let cache = self.cache.clone();
        move |x, y, width, height| {
            cache.borrow_mut().update_origin(x, y, width, height);
        }
    }

    /// Callback for target rectangle updates: `(index, x, y, width, height)`.
    ///
    /// Negative indices are ignored.
    pub fn target_rect_callback(&self) -> impl Fn(i32, f32, f32, f32, f32) + Clone {
        let cache = self.cache.clone();
        move |index, x, y, width, height| {
            cache
                .borrow_mut()
                .handle_target_report(index, x, y, width, height);
        }
    }

    /// Callback marking a target slot as absent: `(index)`.
    pub fn target_removed_callback(&self) -> impl Fn(i32) + Clone {
        let cache = self.cache.clone();
        move |index| {
            if let Ok(index) = usize::try_from(index) {
                cache.borrow_mut().clear_target(index);
            }
        }
    }
}
