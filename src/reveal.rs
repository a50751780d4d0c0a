//! Entrance animation timeline.
//!
//! Every primitive (origin marker, each line, each end marker) is either
//! hidden or revealed. Once the overlay is visible and has lines to draw,
//! the [`RevealClock`] latches a start instant and the [`RevealTimeline`]
//! maps the elapsed time to an eased progress per primitive. Delays count
//! from the moment a primitive appeared ([`EntryLog`]):
//!
//! | primitive   | delay                  | duration |
//! |-------------|------------------------|----------|
//! | origin      | `base_delay - 0.1`     | 0.3 s    |
//! | line `i`    | `delay(i)`             | 0.8 s    |
//! | end marker  | `delay(i) + 0.7`       | 0.3 s    |
//!
//! There is no way back: clearing the visibility flag after the clock has
//! started does not hide anything again.

use crate::calculator::LineSet;
use crate::config::LinesConfig;
use std::time::Duration;

/// The origin marker starts this much before the base delay.
pub const ORIGIN_LEAD: f32 = 0.1;
/// Scale/opacity transition of both marker kinds.
pub const MARKER_DURATION: f32 = 0.3;
/// Time a line takes to draw itself.
pub const LINE_DURATION: f32 = 0.8;
/// End markers pop up this long after their line started drawing.
pub const END_MARKER_OFFSET: f32 = 0.7;

/// CSS `ease` timing curve.
const EASE: [f32; 4] = [0.25, 0.1, 0.25, 1.0];

/// A single hidden-to-revealed transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Seconds after the clock started. Never negative.
    pub delay: f32,
    pub duration: f32,
}

impl Transition {
    pub fn new(delay: f32, duration: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            duration: duration.max(0.0),
        }
    }

    /// Seconds after the clock started at which this transition is done.
    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    /// Eased progress in `0.0..=1.0` at `elapsed` seconds.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if elapsed <= self.delay {
            return 0.0;
        }
        if elapsed >= self.end() || self.duration <= 0.0 {
            return 1.0;
        }
        ease((elapsed - self.delay) / self.duration)
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Apply the `ease` curve to a linear `t` by inverting the x bezier via
/// binary search.
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let [x1, y1, x2, y2] = EASE;
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Transitions of one line and its end marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineReveal {
    pub line: Transition,
    pub end_marker: Transition,
}

/// Progress of one line at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineFrame {
    /// Drawn fraction of the path; also used as the line's opacity.
    pub drawn: f32,
    /// Scale and opacity of the end marker.
    pub end_marker: f32,
}

/// Progress of every primitive at a point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealFrame {
    /// Scale and opacity of the origin marker.
    pub origin_marker: f32,
    pub lines: Vec<LineFrame>,
}

impl RevealFrame {
    /// True when every primitive reached its revealed state.
    pub fn is_complete(&self) -> bool {
        self.origin_marker >= 1.0
            && self
                .lines
                .iter()
                .all(|l| l.drawn >= 1.0 && l.end_marker >= 1.0)
    }
}

/// Reveal schedule for one computed [`LineSet`].
#[derive(Clone, Debug, PartialEq)]
pub struct RevealTimeline {
    pub origin_marker: Transition,
    pub lines: Vec<LineReveal>,
}

impl RevealTimeline {
    /// Schedule for lines that all appeared when the clock started.
    pub fn new(config: &LinesConfig, set: &LineSet) -> Self {
        Self::with_entries(config, set, &EntryLog::default())
    }

    /// Schedule where every primitive's delays count from its entry time.
    pub fn with_entries(config: &LinesConfig, set: &LineSet, entries: &EntryLog) -> Self {
        let origin_delay = (config.base_delay - ORIGIN_LEAD).max(0.0);
        Self {
            origin_marker: Transition::new(entries.origin() + origin_delay, MARKER_DURATION),
            lines: set
                .lines
                .iter()
                .map(|line| {
                    let start = entries.line(line.index) + line.delay;
                    LineReveal {
                        line: Transition::new(start, LINE_DURATION),
                        end_marker: Transition::new(start + END_MARKER_OFFSET, MARKER_DURATION),
                    }
                })
                .collect(),
        }
    }

    /// Seconds until the last primitive is revealed.
    pub fn total_duration(&self) -> f32 {
        self.lines
            .iter()
            .flat_map(|l| [l.line.end(), l.end_marker.end()])
            .fold(self.origin_marker.end(), f32::max)
    }

    /// Sample every primitive. `elapsed` is `None` while the clock has not
    /// started, which keeps everything hidden.
    pub fn sample(&self, elapsed: Option<f32>) -> RevealFrame {
        let Some(elapsed) = elapsed else {
            return RevealFrame {
                origin_marker: 0.0,
                lines: vec![LineFrame::default(); self.lines.len()],
            };
        };

        RevealFrame {
            origin_marker: self.origin_marker.progress(elapsed),
            lines: self
                .lines
                .iter()
                .map(|l| LineFrame {
                    drawn: l.line.progress(elapsed),
                    end_marker: l.end_marker.progress(elapsed),
                })
                .collect(),
        }
    }
}

/// Latches the instant the reveal started.
///
/// The first visible report requests the reveal; it starts once there is
/// something to draw, so the start is the later of the two instants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealClock {
    requested: bool,
    started_at: Option<Duration>,
}

impl RevealClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the visibility flag. Only the first `true` matters.
    pub fn request(&mut self, visible: bool) {
        self.requested |= visible;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Start the clock if the reveal was requested and has not started yet.
    /// Returns true if this call started it.
    pub fn try_start(&mut self, now: Duration) -> bool {
        if self.requested && self.started_at.is_none() {
            self.started_at = Some(now);
            return true;
        }
        false
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds since the clock started, if it has.
    pub fn elapsed(&self, now: Duration) -> Option<f32> {
        self.started_at
            .map(|start| now.saturating_sub(start).as_secs_f32())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// When each primitive appeared, in seconds after the clock started.
///
/// A line whose slot was absent and comes back is revealed again from the
/// moment it reappears. Once no line is left the origin marker disappears
/// with them and re-enters with the next line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryLog {
    origin: Option<f32>,
    lines: Vec<Option<f32>>,
}

impl EntryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the lines present at `elapsed`. Lines already present keep
    /// their entry time; missing ones are forgotten.
    pub fn record(&mut self, set: &LineSet, elapsed: f32) {
        if set.is_empty() {
            self.reset();
            return;
        }
        self.origin.get_or_insert(elapsed);

        let len = set.lines.iter().map(|l| l.index + 1).max().unwrap_or(0);
        let mut lines = vec![None; len];
        for line in &set.lines {
            lines[line.index] = self
                .lines
                .get(line.index)
                .copied()
                .flatten()
                .or(Some(elapsed));
        }
        self.lines = lines;
    }

    /// Entry time of the origin marker, `0.0` if never recorded.
    pub fn origin(&self) -> f32 {
        self.origin.unwrap_or(0.0)
    }

    /// Entry time of line `index`, `0.0` if never recorded.
    pub fn line(&self, index: usize) -> f32 {
        self.lines.get(index).copied().flatten().unwrap_or(0.0)
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate;
    use crate::state::LayoutCache;

    fn three_line_set() -> (LinesConfig, LineSet) {
        let mut cache = LayoutCache::new();
        cache.update_container(0.0, 0.0, 800.0, 600.0);
        cache.update_origin(40.0, 280.0, 40.0, 40.0);
        for i in 0..3 {
            cache.update_target(i, 500.0, 100.0 + i as f32 * 150.0, 200.0, 80.0);
        }
        let config = LinesConfig::default();
        let set = calculate(&cache, &config).unwrap();
        (config, set)
    }

    #[test]
    fn test_ease_endpoints_and_monotonic() {
        assert!(ease(0.0).abs() < 1e-4);
        assert!((ease(1.0) - 1.0).abs() < 1e-4);

        let mut prev = ease(0.0);
        for i in 1..=50 {
            let curr = ease(i as f32 / 50.0);
            assert!(curr >= prev - 1e-5, "ease not monotonic at {i}");
            prev = curr;
        }
    }

    #[test]
    fn test_transition_progress_boundaries() {
        let t = Transition::new(0.5, 0.3);
        assert_eq!(t.progress(0.0), 0.0);
        assert_eq!(t.progress(0.5), 0.0);
        assert_eq!(t.progress(0.81), 1.0);
        assert_eq!(t.progress(5.0), 1.0);

        let mid = t.progress(0.65);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_transition_clamps_negative_delay() {
        // base delay 0 puts the origin marker at -0.1
        let t = Transition::new(-0.1, 0.3);
        assert_eq!(t.delay, 0.0);
    }

    #[test]
    fn test_timeline_uses_fixed_offsets() {
        let (config, set) = three_line_set();
        let timeline = RevealTimeline::new(&config, &set);

        assert!((timeline.origin_marker.delay - 0.3).abs() < 1e-6);
        assert_eq!(timeline.origin_marker.duration, 0.3);

        for (i, l) in timeline.lines.iter().enumerate() {
            let delay = 0.4 + i as f32 * 0.3;
            assert!((l.line.delay - delay).abs() < 1e-6);
            assert_eq!(l.line.duration, 0.8);
            assert!((l.end_marker.delay - (delay + 0.7)).abs() < 1e-6);
            assert_eq!(l.end_marker.duration, 0.3);
        }

        // Last end marker: 0.4 + 0.6 + 0.7 + 0.3
        assert!((timeline.total_duration() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sample_without_clock_is_hidden() {
        let (config, set) = three_line_set();
        let frame = RevealTimeline::new(&config, &set).sample(None);

        assert_eq!(frame.origin_marker, 0.0);
        assert_eq!(frame.lines.len(), 3);
        assert!(frame.lines.iter().all(|l| l.drawn == 0.0 && l.end_marker == 0.0));
        assert!(!frame.is_complete());
    }

    #[test]
    fn test_sample_sequence() {
        let (config, set) = three_line_set();
        let timeline = RevealTimeline::new(&config, &set);

        // 0.5s: origin animating, first line started, others waiting
        let frame = timeline.sample(Some(0.5));
        assert!(frame.origin_marker > 0.0);
        assert!(frame.lines[0].drawn > 0.0 && frame.lines[0].drawn < 1.0);
        assert_eq!(frame.lines[0].end_marker, 0.0);
        assert_eq!(frame.lines[1].drawn, 0.0);
        assert_eq!(frame.lines[2].drawn, 0.0);

        // 1.25s: first line done, its end marker showing
        let frame = timeline.sample(Some(1.25));
        assert_eq!(frame.origin_marker, 1.0);
        assert_eq!(frame.lines[0].drawn, 1.0);
        assert!(frame.lines[0].end_marker > 0.0);

        let frame = timeline.sample(Some(timeline.total_duration()));
        assert!(frame.is_complete());
    }

    #[test]
    fn test_empty_timeline_completes_with_origin() {
        let timeline = RevealTimeline::new(&LinesConfig::default(), &LineSet::default());
        assert!((timeline.total_duration() - 0.6).abs() < 1e-6);
        assert!(timeline.sample(Some(0.61)).is_complete());
    }

    #[test]
    fn test_clock_latches_first_visible() {
        let mut clock = RevealClock::new();
        clock.request(false);
        assert!(!clock.try_start(Duration::from_millis(100)));
        assert_eq!(clock.elapsed(Duration::from_millis(200)), None);

        clock.request(true);
        assert!(clock.try_start(Duration::from_millis(300)));
        assert!(!clock.try_start(Duration::from_millis(400)));

        let elapsed = clock.elapsed(Duration::from_millis(800)).unwrap();
        assert!((elapsed - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clock_starts_when_drawing_begins() {
        let mut clock = RevealClock::new();
        clock.request(true);
        clock.request(false);
        assert!(clock.is_requested());
        assert!(!clock.is_started());

        // Nothing to draw until 3s; the reveal counts from there
        assert!(clock.try_start(Duration::from_secs(3)));
        assert_eq!(clock.elapsed(Duration::from_secs(3)), Some(0.0));
    }

    #[test]
    fn test_clock_ignores_visibility_loss() {
        let mut clock = RevealClock::new();
        clock.request(true);
        clock.try_start(Duration::ZERO);
        clock.request(false);

        assert!(clock.is_started());
        clock.reset();
        assert!(!clock.is_started());
        assert!(!clock.is_requested());
    }

    #[test]
    fn test_entry_log_keeps_present_lines() {
        let (config, mut set) = three_line_set();
        let mut entries = EntryLog::new();
        entries.record(&set, 0.0);

        // Slot 1 goes away and comes back at 5s
        let full = set.clone();
        set.lines.retain(|l| l.index != 1);
        entries.record(&set, 2.5);
        entries.record(&full, 5.0);

        assert_eq!(entries.origin(), 0.0);
        assert_eq!(entries.line(0), 0.0);
        assert_eq!(entries.line(1), 5.0);
        assert_eq!(entries.line(2), 0.0);

        let timeline = RevealTimeline::with_entries(&config, &full, &entries);
        let frame = timeline.sample(Some(5.0));
        assert_eq!(frame.lines[0].drawn, 1.0);
        assert_eq!(frame.lines[1].drawn, 0.0);
        assert!(!frame.is_complete());
        assert!(timeline.sample(Some(timeline.total_duration())).is_complete());
    }

    #[test]
    fn test_entry_log_resets_when_empty() {
        let (_, set) = three_line_set();
        let mut entries = EntryLog::new();
        entries.record(&set, 1.0);
        entries.record(&LineSet::default(), 2.0);
        entries.record(&set, 4.0);

        assert_eq!(entries.origin(), 4.0);
        assert_eq!(entries.line(2), 4.0);
    }
}
