//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;

/// Tracks callback invocations for testing.
///
/// Each field records calls to the corresponding callback with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// (x, y, width, height)
    pub container_rect_changed: Rc<RefCell<Vec<(f32, f32, f32, f32)>>>,
    /// (x, y, width, height)
    pub origin_rect_changed: Rc<RefCell<Vec<(f32, f32, f32, f32)>>>,
    /// (index, x, y, width, height)
    pub target_rect_changed: Rc<RefCell<Vec<(i32, f32, f32, f32, f32)>>>,
    /// Count of layout_changed calls
    pub layout_changed: Rc<RefCell<usize>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.container_rect_changed.borrow_mut().clear();
        self.origin_rect_changed.borrow_mut().clear();
        self.target_rect_changed.borrow_mut().clear();
        *self.layout_changed.borrow_mut() = 0;
    }
}
