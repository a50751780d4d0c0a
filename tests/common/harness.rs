//! Test harness for the overlay test window.
//!
//! Wires `tests/ui/test.slint` to an [`AnimatedLinesController`] the way an
//! application would, with callback tracking and a manual clock so the
//! reveal animation can be stepped deterministically.

#![allow(dead_code)]

use super::CallbackTracker;
use slint::{Color, ComponentHandle, Model, ModelRc, VecModel};
use slint_animated_lines::{AnimatedLinesController, LinesConfig, ManualClock};
use std::rc::Rc;
use std::time::Duration;

// Include the compiled UI from build.rs
slint::include_modules!();

/// Initialize the testing backend for this thread.
/// With init_no_event_loop(), each test thread can have its own backend instance.
/// Uses thread_local to ensure each thread only initializes once.
fn init_testing_backend() {
    use std::cell::Cell;
    thread_local! {
        static INITIALIZED: Cell<bool> = const { Cell::new(false) };
    }

    INITIALIZED.with(|init| {
        if !init.get() {
            i_slint_backend_testing::init_no_event_loop();
            init.set(true);
        }
    });
}

pub fn palette() -> Vec<Color> {
    vec![
        Color::from_rgb_u8(0x00, 0xff, 0x88),
        Color::from_rgb_u8(0x3b, 0x82, 0xf6),
    ]
}

/// Test harness: one window with three cards and a wired controller.
pub struct TestHarness {
    pub window: MainWindow,
    pub ctrl: AnimatedLinesController,
    pub lines: Rc<VecModel<LineData>>,
    pub clock: ManualClock,
    pub tracker: CallbackTracker,
}

impl TestHarness {
    /// Create a harness with a two-color palette and the default fan pattern.
    pub fn new() -> Self {
        Self::with_config(LinesConfig::with_colors(palette()))
    }

    pub fn with_config(config: LinesConfig) -> Self {
        init_testing_backend();
        let window = MainWindow::new().unwrap();
        let clock = ManualClock::new();
        let ctrl = AnimatedLinesController::with_clock(config, clock.source());
        let tracker = CallbackTracker::new();
        ctrl.set_target_count(3);

        // Geometry tracking - update cache
        window.on_container_rect_changed({
            let cb = ctrl.tracker().container_rect_callback();
            let tracker = tracker.clone();
            move |x, y, w, h| {
                cb(x, y, w, h);
                tracker.container_rect_changed.borrow_mut().push((x, y, w, h));
            }
        });

        window.on_origin_rect_changed({
            let cb = ctrl.tracker().origin_rect_callback();
            let tracker = tracker.clone();
            move |x, y, w, h| {
                cb(x, y, w, h);
                tracker.origin_rect_changed.borrow_mut().push((x, y, w, h));
            }
        });

        window.on_target_rect_changed({
            let cb = ctrl.tracker().target_rect_callback();
            let tracker = tracker.clone();
            move |index, x, y, w, h| {
                cb(index, x, y, w, h);
                tracker.target_rect_changed.borrow_mut().push((index, x, y, w, h));
            }
        });

        window.on_layout_changed({
            let resize = ctrl.resize_callback();
            let tracker = tracker.clone();
            move || {
                resize();
                *tracker.layout_changed.borrow_mut() += 1;
            }
        });

        // Render output
        let lines = Rc::new(VecModel::<LineData>::default());
        window.set_lines(ModelRc::from(lines.clone()));
        ctrl.bind_model(lines.clone(), |l| LineData {
            commands: l.commands.clone(),
            color: l.color,
            stroke_width: l.stroke_width,
            opacity: l.opacity,
            end_x: l.end_x,
            end_y: l.end_y,
            end_radius: l.end_radius,
            end_reveal: l.end_reveal,
        });

        ctrl.on_origin_changed({
            let w = window.as_weak();
            move |o| {
                if let Some(w) = w.upgrade() {
                    w.set_origin(OriginData {
                        shown: o.shown,
                        x: o.x,
                        y: o.y,
                        radius: o.radius,
                        fill: o.fill,
                        stroke: o.stroke,
                        stroke_width: o.stroke_width,
                        reveal: o.reveal,
                    });
                }
            }
        });

        Self {
            window,
            ctrl,
            lines,
            clock,
            tracker,
        }
    }

    /// Have the window report every element rectangle.
    pub fn report_geometry(&self) {
        self.window.invoke_report_geometry();
    }

    /// Report geometry, mount, and let the settle timer fire.
    pub fn mount_and_settle(&self) {
        self.report_geometry();
        self.ctrl.mount();
        self.advance(150);
    }

    /// Advance both the Slint timer clock and the reveal clock.
    pub fn advance(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
        i_slint_backend_testing::mock_elapsed_time(ms);
    }

    /// Advance in frame-sized steps so the repeating frame timer runs.
    pub fn advance_frames(&self, ms: u64) {
        let mut left = ms;
        while left > 0 {
            let step = left.min(16);
            self.advance(step);
            left -= step;
        }
    }

    pub fn line_rows(&self) -> Vec<LineData> {
        self.lines.iter().collect()
    }
}
