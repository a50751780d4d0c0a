//! High-level controller for animated connector lines.
//!
//! The [`AnimatedLinesController`] owns geometry tracking, configuration, the
//! last computed lines and the reveal animation, and drives the bound Slint
//! models from two timers: a one-shot timer that measures shortly after
//! mount, and a repeating timer that samples the reveal animation while it
//! runs.
//!
//! # Example
//!
//! ```ignore
//! use slint_animated_lines::{AnimatedLinesController, LinesConfig};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = AnimatedLinesController::new(LinesConfig::with_colors(colors));
//!     ctrl.set_target_count(3);
//!
//!     // Geometry tracking
//!     window.on_container_rect_changed(ctrl.tracker().container_rect_callback());
//!     window.on_origin_rect_changed(ctrl.tracker().origin_rect_callback());
//!     window.on_target_rect_changed(ctrl.tracker().target_rect_callback());
//!     window.on_layout_changed(ctrl.resize_callback());
//!
//!     // Render output
//!     let lines = Rc::new(VecModel::<LineData>::default());
//!     window.set_lines(ModelRc::from(lines.clone()));
//!     ctrl.bind_model(lines, |l| LineData { commands: l.commands.clone(), /* ... */ });
//!     ctrl.on_origin_changed({
//!         let w = window.as_weak();
//!         move |o| if let Some(w) = w.upgrade() { w.set_origin(/* ... */) }
//!     });
//!
//!     ctrl.mount();
//!     ctrl.set_visible(true);
//!     window.run().unwrap();
//! }
//! ```

use crate::calculator::{calculate, LineSet};
use crate::config::LinesConfig;
use crate::overlay::{build_frame, ConcreteModelSyncer, LineVisual, ModelSyncer, OriginVisual};
use crate::reveal::{EntryLog, RevealClock, RevealFrame, RevealTimeline};
use crate::state::LayoutCache;
use crate::tracking::LayoutTracker;
use slint::{Timer, TimerMode, VecModel};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Delay between mount and the first measurement, so the initial layout
/// has settled.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);
/// Interval at which the reveal animation is sampled.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct State {
    config: LinesConfig,
    lines: Option<LineSet>,
    timeline: RevealTimeline,
    clock: RevealClock,
    entries: EntryLog,
    visible: bool,
    mounted: bool,
    measure_count: usize,
}

#[derive(Default)]
struct Sinks {
    lines: Option<Rc<dyn ModelSyncer>>,
    origin: Option<Rc<dyn Fn(&OriginVisual)>>,
}

struct Inner {
    tracker: LayoutTracker,
    state: RefCell<State>,
    sinks: RefCell<Sinks>,
    settle_timer: Timer,
    frame_timer: Timer,
    now: Box<dyn Fn() -> Duration>,
}

/// Controller for one overlay of animated connector lines.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct AnimatedLinesController {
    inner: Rc<Inner>,
}

impl Default for AnimatedLinesController {
    fn default() -> Self {
        Self::new(LinesConfig::default())
    }
}

impl AnimatedLinesController {
    /// Create a controller measuring time from now.
    pub fn new(config: LinesConfig) -> Self {
        let start = Instant::now();
        Self::with_clock(config, move || start.elapsed())
    }

    /// Create a controller with a custom time source for the reveal animation.
    ///
    /// `now` must be monotonic.
    pub fn with_clock(config: LinesConfig, now: impl Fn() -> Duration + 'static) -> Self {
        warn_if_uncolored(&config);
        let timeline = RevealTimeline::new(&config, &LineSet::default());
        Self {
            inner: Rc::new(Inner {
                tracker: LayoutTracker::new(),
                state: RefCell::new(State {
                    config,
                    lines: None,
                    timeline,
                    clock: RevealClock::new(),
                    entries: EntryLog::new(),
                    visible: false,
                    mounted: false,
                    measure_count: 0,
                }),
                sinks: RefCell::new(Sinks::default()),
                settle_timer: Timer::default(),
                frame_timer: Timer::default(),
                now: Box::new(now),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    // ========================================================================
    // Wiring
    // ========================================================================

    /// Geometry tracker whose callbacks feed the element rectangles.
    pub fn tracker(&self) -> &LayoutTracker {
        &self.inner.tracker
    }

    /// Shared layout cache.
    pub fn cache(&self) -> Rc<RefCell<LayoutCache>> {
        self.inner.tracker.cache()
    }

    /// Bind a Slint model that receives one row per computed line.
    ///
    /// The model is updated in place on every measurement and animation
    /// frame.
    pub fn bind_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&LineVisual) -> P + 'static,
    {
        self.inner.sinks.borrow_mut().lines =
            Some(Rc::new(ConcreteModelSyncer { model, constructor }));
        self.push_frame();
    }

    /// Register a callback that receives the origin marker on every frame.
    pub fn on_origin_changed(&self, callback: impl Fn(&OriginVisual) + 'static) {
        self.inner.sinks.borrow_mut().origin = Some(Rc::new(callback));
        self.push_frame();
    }

    /// Callback for the overlay's resize notification.
    pub fn resize_callback(&self) -> impl Fn() + Clone {
        let weak = Rc::downgrade(&self.inner);
        move || {
            if let Some(ctrl) = Self::from_weak(&weak) {
                ctrl.handle_resize();
            }
        }
    }

    /// Callback for the embedding application's visibility flag.
    pub fn visibility_callback(&self) -> impl Fn(bool) + Clone {
        let weak = Rc::downgrade(&self.inner);
        move |visible| {
            if let Some(ctrl) = Self::from_weak(&weak) {
                ctrl.set_visible(visible);
            }
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start tracking: measure once after [`SETTLE_DELAY`] and on every
    /// resize until [`unmount`](Self::unmount).
    pub fn mount(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.mounted {
                return;
            }
            state.mounted = true;
        }
        tracing::debug!("animated lines mounted");

        let weak = Rc::downgrade(&self.inner);
        self.inner
            .settle_timer
            .start(TimerMode::SingleShot, SETTLE_DELAY, move || {
                if let Some(ctrl) = Self::from_weak(&weak) {
                    ctrl.recompute();
                }
            });

        self.ensure_animating();
    }

    /// Stop both timers. Later resize, relayout and timer events are ignored.
    pub fn unmount(&self) {
        self.inner.state.borrow_mut().mounted = false;
        self.inner.settle_timer.stop();
        self.inner.frame_timer.stop();
        tracing::debug!("animated lines unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    /// The window or container was resized.
    pub fn handle_resize(&self) {
        self.recompute();
    }

    /// Explicitly re-measure, e.g. after content above the container moved.
    pub fn request_relayout(&self) {
        self.recompute();
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Replace the configuration and re-measure.
    pub fn set_config(&self, config: LinesConfig) {
        warn_if_uncolored(&config);
        self.inner.state.borrow_mut().config = config;
        self.recompute();
    }

    pub fn config(&self) -> LinesConfig {
        self.inner.state.borrow().config.clone()
    }

    /// Set the number of target slots and re-measure.
    pub fn set_target_count(&self, count: usize) {
        self.cache().borrow_mut().set_target_count(count);
        self.recompute();
    }

    /// Feed the visibility flag. The first `true` requests the reveal,
    /// which starts as soon as there are lines to draw and is never
    /// reversed.
    pub fn set_visible(&self, visible: bool) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.visible = visible;
            state.clock.request(visible);
        }
        if self.try_start_reveal() {
            self.ensure_animating();
            self.push_frame();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.borrow().visible
    }

    // ========================================================================
    // Outputs
    // ========================================================================

    /// Lines from the last successful measurement.
    pub fn lines(&self) -> Option<LineSet> {
        self.inner.state.borrow().lines.clone()
    }

    /// Number of measurements that produced geometry.
    pub fn measure_count(&self) -> usize {
        self.inner.state.borrow().measure_count
    }

    /// Reveal state right now.
    pub fn reveal_frame(&self) -> RevealFrame {
        let state = self.inner.state.borrow();
        state.timeline.sample(state.clock.elapsed((self.inner.now)()))
    }

    /// True while the reveal animation timer is running.
    pub fn is_animating(&self) -> bool {
        self.inner.frame_timer.running()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Measure and rebuild every line. Without a container or origin
    /// rectangle this does nothing and keeps the previous lines.
    fn recompute(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                return;
            }

            let cache = self.inner.tracker.cache();
            let Some(lines) = calculate(&cache.borrow(), &state.config) else {
                tracing::debug!("container or origin not reported yet, skipping measurement");
                return;
            };

            if let Some(elapsed) = state.clock.elapsed((self.inner.now)()) {
                state.entries.record(&lines, elapsed);
            }
            let timeline = RevealTimeline::with_entries(&state.config, &lines, &state.entries);
            state.timeline = timeline;
            state.lines = Some(lines);
            state.measure_count += 1;
        }
        self.try_start_reveal();
        self.ensure_animating();
        self.push_frame();
    }

    /// Start the reveal clock once it was requested and there is something
    /// to draw. Returns true if the clock started now.
    fn try_start_reveal(&self) -> bool {
        let mut state = self.inner.state.borrow_mut();
        let state = &mut *state;
        let Some(lines) = state.lines.as_ref() else {
            return false;
        };
        if !state.mounted || lines.is_empty() || !state.clock.try_start((self.inner.now)()) {
            return false;
        }

        state.entries.reset();
        state.entries.record(lines, 0.0);
        state.timeline = RevealTimeline::with_entries(&state.config, lines, &state.entries);
        tracing::debug!(lines = lines.len(), "reveal started");
        true
    }

    /// Run the frame timer while the reveal has started but not finished.
    fn ensure_animating(&self) {
        let needs_frames = {
            let state = self.inner.state.borrow();
            state.mounted
                && state.lines.is_some()
                && state.clock.is_started()
                && !state
                    .timeline
                    .sample(state.clock.elapsed((self.inner.now)()))
                    .is_complete()
        };

        if needs_frames && !self.inner.frame_timer.running() {
            let weak = Rc::downgrade(&self.inner);
            self.inner
                .frame_timer
                .start(TimerMode::Repeated, FRAME_INTERVAL, move || {
                    if let Some(ctrl) = Self::from_weak(&weak) {
                        ctrl.tick();
                    }
                });
        }
    }

    fn tick(&self) {
        if !self.is_mounted() {
            self.inner.frame_timer.stop();
            return;
        }
        if self.push_frame() {
            self.inner.frame_timer.stop();
            tracing::debug!("reveal finished");
        }
    }

    /// Push the current frame to the bound sinks. Returns true when the
    /// reveal is complete.
    fn push_frame(&self) -> bool {
        let (frame, complete) = {
            let state = self.inner.state.borrow();
            let Some(lines) = state.lines.as_ref() else {
                return false;
            };
            let reveal = state.timeline.sample(state.clock.elapsed((self.inner.now)()));
            (build_frame(lines, &reveal, &state.config), reveal.is_complete())
        };

        // Sinks may re-bind themselves, so no borrow is held while they run.
        let (lines, origin) = {
            let sinks = self.inner.sinks.borrow();
            (sinks.lines.clone(), sinks.origin.clone())
        };
        if let Some(syncer) = lines {
            syncer.sync(&frame.lines);
        }
        if let Some(origin) = origin {
            origin(&frame.origin);
        }
        complete
    }
}

fn warn_if_uncolored(config: &LinesConfig) {
    if config.colors.is_empty() {
        tracing::warn!("no line colors configured, using the fallback color");
    }
}

/// Manual clock for driving the reveal animation deterministically.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// A time source for [`AnimatedLinesController::with_clock`].
    pub fn source(&self) -> impl Fn() -> Duration + 'static {
        let now = self.now.clone();
        move || now.get()
    }
}
