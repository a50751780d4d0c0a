//! What the overlay draws at one point in time.
//!
//! [`build_frame`] combines the computed [`LineSet`] with a sampled
//! [`RevealFrame`] into plain render data: partial path commands, opacities
//! and marker scales. [`ModelSyncer`] pushes the line part into a Slint
//! `VecModel` of the application's own row type.

use crate::calculator::LineSet;
use crate::config::LinesConfig;
use crate::reveal::RevealFrame;
use slint::{Color, Model, SharedString, VecModel};
use std::rc::Rc;

pub const ORIGIN_RADIUS: f32 = 6.0;
pub const ORIGIN_STROKE_WIDTH: f32 = 2.0;
pub const END_MARKER_RADIUS: f32 = 4.0;

/// Dark fill behind the origin ring.
pub fn origin_fill() -> Color {
    Color::from_rgb_u8(0x0a, 0x0a, 0x0f)
}

/// The origin marker circle.
#[derive(Clone, Debug, PartialEq)]
pub struct OriginVisual {
    /// False until at least one line has been computed.
    pub shown: bool,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    /// Scale and opacity, `0.0` hidden to `1.0` revealed.
    pub reveal: f32,
}

/// One connector line and its end marker.
#[derive(Clone, Debug, PartialEq)]
pub struct LineVisual {
    pub index: i32,
    /// Path commands for the part drawn so far.
    pub commands: SharedString,
    pub color: Color,
    pub stroke_width: f32,
    pub opacity: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub end_radius: f32,
    /// End marker scale and opacity.
    pub end_reveal: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    pub origin: OriginVisual,
    pub lines: Vec<LineVisual>,
}

/// Render data for `lines` at reveal state `reveal`.
///
/// `reveal.lines` must be parallel to `lines.lines`; missing entries are
/// treated as hidden.
pub fn build_frame(lines: &LineSet, reveal: &RevealFrame, config: &LinesConfig) -> OverlayFrame {
    let origin = OriginVisual {
        shown: !lines.is_empty(),
        x: lines.origin.x,
        y: lines.origin.y,
        radius: ORIGIN_RADIUS,
        fill: origin_fill(),
        stroke: config.origin_color(),
        stroke_width: ORIGIN_STROKE_WIDTH,
        reveal: reveal.origin_marker,
    };

    let lines = lines
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let state = reveal.lines.get(i).copied().unwrap_or_default();
            let commands = if state.drawn >= 1.0 {
                SharedString::from(line.path_data.as_str())
            } else {
                SharedString::from(line.path.truncated(state.drawn).to_string())
            };

            LineVisual {
                index: line.index as i32,
                commands,
                color: line.color,
                stroke_width: config.stroke_width,
                opacity: state.drawn,
                end_x: line.end.x,
                end_y: line.end.y,
                end_radius: END_MARKER_RADIUS,
                end_reveal: state.end_marker,
            }
        })
        .collect();

    OverlayFrame { origin, lines }
}

/// Internal trait for syncing line visuals into a Slint model.
pub(crate) trait ModelSyncer {
    fn sync(&self, lines: &[LineVisual]);
}

/// Concrete implementation of ModelSyncer for a specific row type.
pub(crate) struct ConcreteModelSyncer<P, F> {
    pub(crate) model: Rc<VecModel<P>>,
    pub(crate) constructor: F,
}

impl<P, F> ModelSyncer for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&LineVisual) -> P,
{
    fn sync(&self, lines: &[LineVisual]) {
        // Update existing rows or add new ones
        for (i, line) in lines.iter().enumerate() {
            let item = (self.constructor)(line);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > lines.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}
