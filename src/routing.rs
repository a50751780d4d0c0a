//! Line shapes from the origin to one end point.
//!
//! Two patterns are supported:
//!
//! - [`LinePattern::Straight`]: every line is a single horizontal-tangent
//!   S-curve.
//! - [`LinePattern::Fan`]: lines for targets before the middle of the list
//!   leave the origin, climb at a turn column just before their target and
//!   then run right into it; lines after the middle descend instead; the
//!   middle line is the same S-curve as in the straight pattern.

use crate::config::LinePattern;
use crate::geometry::Point;
use crate::path::LinePath;

/// How far left of the end point the fan lines turn.
pub const TURN_OFFSET: f32 = 50.0;
/// Radius of the quarter-round corners of fan lines.
pub const CORNER_RADIUS: f32 = 20.0;

/// Shape chosen for one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Smooth cubic S-curve.
    Curve,
    /// Horizontal, rounded turn upwards, vertical, rounded turn right.
    UpThenRight,
    /// Horizontal, rounded turn downwards, vertical, rounded turn right.
    DownThenRight,
}

/// Pick the route for the target at `index` out of `count` targets.
///
/// `count` is the length of the full target list, absent entries included,
/// so the middle does not shift when an entry is missing.
pub fn route_for(pattern: LinePattern, index: usize, count: usize) -> Route {
    match pattern {
        LinePattern::Straight => Route::Curve,
        LinePattern::Fan => {
            let middle = count / 2;
            if index < middle {
                Route::UpThenRight
            } else if index == middle {
                Route::Curve
            } else {
                Route::DownThenRight
            }
        }
    }
}

/// Build the path for `route` from `origin` to `end`.
pub fn build_path(route: Route, origin: Point, end: Point) -> LinePath {
    match route {
        Route::Curve => s_curve(origin, end),
        Route::UpThenRight => rounded_orthogonal(origin, end, -1.0),
        Route::DownThenRight => rounded_orthogonal(origin, end, 1.0),
    }
}

/// Cubic curve with both control points on the horizontal midpoint, giving
/// flat tangents at both ends.
fn s_curve(origin: Point, end: Point) -> LinePath {
    let ctrl_x = origin.x + (end.x - origin.x) * 0.5;
    LinePath::start(origin).cubic_to(
        Point::new(ctrl_x, origin.y),
        Point::new(ctrl_x, end.y),
        end,
    )
}

/// `dir` is -1 for routing upwards, +1 for downwards (screen y grows down).
fn rounded_orthogonal(origin: Point, end: Point, dir: f32) -> LinePath {
    let turn_x = end.x - TURN_OFFSET;
    let r = CORNER_RADIUS;

    LinePath::start(origin)
        .line_to(Point::new(turn_x - r, origin.y))
        .quad_to(
            Point::new(turn_x, origin.y),
            Point::new(turn_x, origin.y + dir * r),
        )
        .line_to(Point::new(turn_x, end.y - dir * r))
        .quad_to(Point::new(turn_x, end.y), Point::new(turn_x + r, end.y))
        .line_to(end)
}
