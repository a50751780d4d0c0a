use crate::geometry::Rect;

/// Highest number of target slots a cache accepts.
pub const MAX_TARGETS: usize = 1024;

/// Latest reported bounding boxes of the container, the origin and every
/// target slot.
///
/// Targets are positional: slot `i` belongs to the `i`-th target of the
/// layout, and a slot is `None` while that target is absent. Absent slots
/// still count towards the list length, which drives the fan middle and the
/// reveal stagger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutCache {
    pub container: Option<Rect>,
    pub origin: Option<Rect>,
    pub targets: Vec<Option<Rect>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with `count` empty target slots.
    pub fn with_target_count(count: usize) -> Self {
        Self {
            targets: vec![None; count],
            ..Self::default()
        }
    }

    pub fn update_container(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.container = Some(Rect::new(x, y, width, height));
    }

    pub fn update_origin(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.origin = Some(Rect::new(x, y, width, height));
    }

    /// Record the rectangle of target slot `index`, growing the list if needed.
    /// Slots at or beyond [`MAX_TARGETS`] are ignored.
    pub fn update_target(&mut self, index: usize, x: f32, y: f32, width: f32, height: f32) {
        if index >= MAX_TARGETS {
            tracing::warn!(index, "target slot out of range, ignoring");
            return;
        }
        if index >= self.targets.len() {
            self.targets.resize(index + 1, None);
        }
        self.targets[index] = Some(Rect::new(x, y, width, height));
    }

    /// Mark target slot `index` as absent. The slot itself is kept.
    pub fn clear_target(&mut self, index: usize) {
        if let Some(slot) = self.targets.get_mut(index) {
            *slot = None;
        }
    }

    /// Resize the target list, dropping or appending absent slots. The
    /// count is capped at [`MAX_TARGETS`].
    pub fn set_target_count(&mut self, count: usize) {
        self.targets.resize(count.min(MAX_TARGETS), None);
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Number of targets that currently have a rectangle.
    pub fn present_target_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    /// Handle a rectangle report from Slint (i32 slot ids).
    pub fn handle_target_report(&mut self, index: i32, x: f32, y: f32, width: f32, height: f32) {
        if let Ok(index) = usize::try_from(index) {
            self.update_target(index, x, y, width, height);
        }
    }
}
