//! SVG path data for connector lines.
//!
//! [`LinePath`] keeps the structured commands so that the renderer can draw a
//! line progressively: [`LinePath::truncated`] cuts the path at a fraction of
//! its arc length, splitting the straddling curve with de Casteljau's
//! algorithm. `Display` produces the `commands` string Slint's `Path` element
//! accepts (e.g. `"M 10,20 C 60,20 60,80 110,80"`).

use crate::geometry::Point;
use std::fmt;

/// Polyline resolution used to measure and cut curved segments.
const CURVE_SAMPLES: usize = 32;

/// A single path command with absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
}

impl PathCommand {
    fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::QuadTo { to, .. } | PathCommand::CubicTo { to, .. } => to,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {},{}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {},{}", p.x, p.y),
            PathCommand::QuadTo { ctrl, to } => {
                write!(f, "Q {},{} {},{}", ctrl.x, ctrl.y, to.x, to.y)
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => write!(
                f,
                "C {},{} {},{} {},{}",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            ),
        }
    }
}

/// A drawable segment between two consecutive command end points.
#[derive(Clone, Copy, Debug)]
enum Segment {
    Line(Point, Point),
    Quad(Point, Point, Point),
    Cubic(Point, Point, Point, Point),
}

impl Segment {
    fn from_command(from: Point, command: &PathCommand) -> Option<Self> {
        match *command {
            PathCommand::MoveTo(_) => None,
            PathCommand::LineTo(to) => Some(Segment::Line(from, to)),
            PathCommand::QuadTo { ctrl, to } => Some(Segment::Quad(from, ctrl, to)),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                Some(Segment::Cubic(from, ctrl1, ctrl2, to))
            }
        }
    }

    fn eval(&self, t: f32) -> Point {
        match *self {
            Segment::Line(a, b) => a.lerp(b, t),
            Segment::Quad(p0, p1, p2) => {
                let mt = 1.0 - t;
                Point::new(
                    mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
                    mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
                )
            }
            Segment::Cubic(p0, p1, p2, p3) => CubicBezier { p0, p1, p2, p3 }.eval(t),
        }
    }

    /// Cumulative polyline lengths at `CURVE_SAMPLES + 1` evenly spaced parameters.
    fn sampled_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(CURVE_SAMPLES + 1);
        let mut total = 0.0;
        let mut prev = self.eval(0.0);
        lengths.push(0.0);
        for i in 1..=CURVE_SAMPLES {
            let curr = self.eval(i as f32 / CURVE_SAMPLES as f32);
            total += prev.distance(curr);
            lengths.push(total);
            prev = curr;
        }
        lengths
    }

    fn length(&self) -> f32 {
        match *self {
            Segment::Line(a, b) => a.distance(b),
            _ => self.sampled_lengths().last().copied().unwrap_or(0.0),
        }
    }

    /// Curve parameter at which `distance` along the segment is reached.
    fn param_at(&self, distance: f32) -> f32 {
        if let Segment::Line(a, b) = *self {
            let len = a.distance(b);
            return if len <= f32::EPSILON { 1.0 } else { (distance / len).clamp(0.0, 1.0) };
        }

        let lengths = self.sampled_lengths();
        for i in 1..lengths.len() {
            if lengths[i] >= distance {
                let span = lengths[i] - lengths[i - 1];
                let local = if span <= f32::EPSILON {
                    0.0
                } else {
                    (distance - lengths[i - 1]) / span
                };
                return ((i - 1) as f32 + local) / CURVE_SAMPLES as f32;
            }
        }
        1.0
    }

    /// The part of this segment from t=0 to `t`, as a command continuing from
    /// the segment start.
    fn head(&self, t: f32) -> PathCommand {
        match *self {
            Segment::Line(a, b) => PathCommand::LineTo(a.lerp(b, t)),
            Segment::Quad(p0, p1, p2) => {
                let q0 = p0.lerp(p1, t);
                let q1 = p1.lerp(p2, t);
                PathCommand::QuadTo {
                    ctrl: q0,
                    to: q0.lerp(q1, t),
                }
            }
            Segment::Cubic(p0, p1, p2, p3) => {
                // De Casteljau: P0' = P0, P1' = Q0, P2' = R0, P3' = S
                let q0 = p0.lerp(p1, t);
                let q1 = p1.lerp(p2, t);
                let q2 = p2.lerp(p3, t);
                let r0 = q0.lerp(q1, t);
                let r1 = q1.lerp(q2, t);
                PathCommand::CubicTo {
                    ctrl1: q0,
                    ctrl2: r0,
                    to: r0.lerp(r1, t),
                }
            }
        }
    }
}

/// Structured SVG path built from absolute commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinePath {
    commands: Vec<PathCommand>,
}

impl LinePath {
    /// Start a new path at `start`.
    pub fn start(start: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(start)],
        }
    }

    pub fn line_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn quad_to(mut self, ctrl: Point, to: Point) -> Self {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
        self
    }

    pub fn cubic_to(mut self, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end)
    }

    fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let mut current = Point::default();
        self.commands.iter().filter_map(move |command| {
            let segment = Segment::from_command(current, command);
            current = command.end();
            segment
        })
    }

    /// Total arc length. Curves are measured on a sampled polyline.
    pub fn length(&self) -> f32 {
        self.segments().map(|s| s.length()).sum()
    }

    /// The leading `fraction` (by arc length) of this path.
    ///
    /// A fraction of 0 yields a zero-length line at the start point, a
    /// fraction of 1 or more yields the whole path.
    pub fn truncated(&self, fraction: f32) -> LinePath {
        let Some(start) = self.start_point() else {
            return LinePath::default();
        };

        let fraction = fraction.clamp(0.0, 1.0);
        if fraction >= 1.0 {
            return self.clone();
        }
        if fraction <= 0.0 {
            return LinePath::start(start).line_to(start);
        }

        let mut remaining = self.length() * fraction;
        let mut out = LinePath {
            commands: Vec::with_capacity(self.commands.len()),
        };
        let mut current = Point::default();

        for command in &self.commands {
            let Some(segment) = Segment::from_command(current, command) else {
                out.commands.push(*command);
                current = command.end();
                continue;
            };

            let len = segment.length();
            if len < remaining {
                out.commands.push(*command);
                remaining -= len;
                current = command.end();
                continue;
            }

            out.commands.push(segment.head(segment.param_at(remaining)));
            break;
        }

        out
    }
}

impl fmt::Display for LinePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(path_data: &str) -> String {
    path_data.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cubic bezier curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // Control point 1
    pub p2: Point, // Control point 2
    pub p3: Point, // End point
}

impl CubicBezier {
    /// Evaluate the bezier curve at parameter t (0.0 to 1.0)
    pub fn eval(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * self.p0.x
            + 3.0 * mt2 * t * self.p1.x
            + 3.0 * mt * t2 * self.p2.x
            + t3 * self.p3.x;
        let y = mt3 * self.p0.y
            + 3.0 * mt2 * t * self.p1.y
            + 3.0 * mt * t2 * self.p2.y
            + t3 * self.p3.y;

        Point::new(x, y)
    }
}
