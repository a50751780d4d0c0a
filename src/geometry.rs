//! Container-relative geometry for the origin and target elements.
//!
//! Rectangles are stored the way elements report them (absolute window
//! coordinates, top-left plus size). Everything the calculator emits is
//! translated into the container's coordinate space so the overlay can be
//! laid over the container with `x: 0; y: 0`.

/// Horizontal gap between a target's left edge and the end of its line.
pub const END_POINT_GAP: f32 = 15.0;

/// A point in container-relative coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Bounding box of an element as reported by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Translate an absolute point into this rectangle's coordinate space.
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.left, point.y - self.top)
    }
}

/// Center of the origin element, relative to the container.
pub fn origin_point(container: &Rect, origin: &Rect) -> Point {
    container.to_local(origin.center())
}

/// Where a connector ends for `target`: just left of its left edge,
/// vertically centered.
pub fn end_point(container: &Rect, target: &Rect) -> Point {
    let anchor = Point::new(target.left - END_POINT_GAP, target.top + target.height / 2.0);
    container.to_local(anchor)
}
