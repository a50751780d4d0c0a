//! # Slint Animated Lines
//!
//! Decorative connector lines from a single origin element to several target
//! elements, drawn over a container and revealed with a staggered entrance
//! animation. Typical use is a landing page hero: one glowing dot on the
//! left, lines fanning out to feature cards on the right.
//!
//! ## Features
//!
//! - **Two patterns** - `fan` (upper lines bend up, the middle one goes
//!   straight, lower lines bend down) and `straight` (smooth S-curves)
//! - **Positional targets** - absent targets are skipped but keep their
//!   slot, so colors and stagger delays never shift
//! - **Explicit timing** - the reveal is a timeline sampled by a Slint timer,
//!   lines "draw" themselves by truncating their path at the animated fraction
//! - **Scoped lifecycle** - one settle timer after mount, re-measure on
//!   resize, everything stops on unmount
//!
//! ## Quick Start
//!
//! ```slint
//! import { AnimatedLines, LineData, OriginData } from "@slint-animated-lines/animated-lines.slint";
//!
//! export component MainWindow inherits Window {
//!     in property <[LineData]> lines;
//!     in property <OriginData> origin;
//!     callback layout-changed();
//!
//!     AnimatedLines {
//!         lines: root.lines;
//!         origin: root.origin;
//!         layout-changed => { root.layout-changed(); }
//!     }
//! }
//! ```
//!
//! ## Rust Helpers
//!
//! - [`AnimatedLinesController`] - Lifecycle, timers and model binding
//! - [`LayoutTracker`] - Ready-made callbacks for element rectangles
//! - [`calculate`] - One measurement pass, without any UI
//! - [`LinePath`] - Structured SVG path data with arc-length truncation
//! - [`RevealTimeline`] - Per-primitive reveal schedule

pub mod geometry;
pub mod path;
pub mod routing;
pub mod config;
pub mod error;
pub mod state;
pub mod tracking;
pub mod calculator;
pub mod reveal;
pub mod overlay;
pub mod controller;

pub use geometry::{end_point, origin_point, Point, Rect, END_POINT_GAP};
pub use path::{collapse_whitespace, CubicBezier, LinePath, PathCommand};
pub use routing::{build_path, route_for, Route, CORNER_RADIUS, TURN_OFFSET};
pub use config::{fallback_color, parse_color, LinePattern, LinesConfig};
pub use error::ConfigError;
pub use state::{LayoutCache, MAX_TARGETS};
pub use tracking::LayoutTracker;
pub use calculator::{calculate, LineSet, PathDescriptor};
pub use reveal::{EntryLog, LineFrame, RevealClock, RevealFrame, RevealTimeline, Transition};
pub use overlay::{build_frame, LineVisual, OriginVisual, OverlayFrame};
pub use controller::{AnimatedLinesController, ManualClock, FRAME_INTERVAL, SETTLE_DELAY};
