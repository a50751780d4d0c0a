//! Measurement pass: turns the tracked rectangles into one path per target.

use crate::config::LinesConfig;
use crate::geometry::{end_point, origin_point, Point};
use crate::path::{collapse_whitespace, LinePath};
use crate::routing::{build_path, route_for, Route};
use crate::state::LayoutCache;
use slint::Color;

/// One computed connector line.
#[derive(Clone, Debug, PartialEq)]
pub struct PathDescriptor {
    /// Position of the target in the full target list.
    pub index: usize,
    pub route: Route,
    pub path: LinePath,
    /// SVG path data for `path`, whitespace-normalized.
    pub path_data: String,
    pub color: Color,
    /// Seconds before this line starts drawing.
    pub delay: f32,
    pub end: Point,
}

/// Result of one measurement pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineSet {
    pub origin: Point,
    pub lines: Vec<PathDescriptor>,
}

impl LineSet {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Compute the origin point and one path per present target.
///
/// Returns `None` when the container or the origin has not been reported
/// yet. Absent targets are skipped, but keep their slot: later targets keep
/// their index for color, route and delay.
pub fn calculate(layout: &LayoutCache, config: &LinesConfig) -> Option<LineSet> {
    let container = layout.container?;
    let origin_rect = layout.origin?;

    let origin = origin_point(&container, &origin_rect);
    let count = layout.target_count();

    let lines: Vec<PathDescriptor> = layout
        .targets
        .iter()
        .enumerate()
        .filter_map(|(index, target)| {
            let target = target.as_ref()?;
            let end = end_point(&container, target);
            let route = route_for(config.pattern, index, count);
            let path = build_path(route, origin, end);

            Some(PathDescriptor {
                index,
                route,
                path_data: collapse_whitespace(&path.to_string()),
                path,
                color: config.color_for(index),
                delay: config.delay_for(index),
                end,
            })
        })
        .collect();

    tracing::debug!(
        targets = count,
        lines = lines.len(),
        pattern = ?config.pattern,
        "computed connector lines"
    );

    Some(LineSet { origin, lines })
}
