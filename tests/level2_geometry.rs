//! Level 2: Geometry and Path Data
//!
//! Tests end points, fan routing, absent targets, colors, and re-measuring
//! on resize against the test window's layout.

mod common;

use common::harness::{palette, TestHarness};
use slint::Model;
use slint_animated_lines::{LinePattern, LinesConfig, Route};

#[test]
fn test_origin_is_center_relative_to_container() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    let origin = harness.window.get_origin();
    // origin dot at (90, 280) 40x40, container at (50, 20)
    assert_eq!((origin.x, origin.y), (60.0, 280.0));
    assert_eq!(origin.radius, 6.0);
    assert_eq!(origin.stroke, palette()[0]);
}

#[test]
fn test_end_points_left_of_cards() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    let rows = harness.line_rows();
    assert_eq!(rows.len(), 3);
    let ends: Vec<(f32, f32)> = rows.iter().map(|r| (r.end_x, r.end_y)).collect();
    assert_eq!(ends, vec![(485.0, 100.0), (485.0, 280.0), (485.0, 460.0)]);
}

#[test]
fn test_fan_routes_for_three_cards() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    let lines = harness.ctrl.lines().unwrap();
    let routes: Vec<Route> = lines.lines.iter().map(|l| l.route).collect();
    assert_eq!(routes, vec![Route::UpThenRight, Route::Curve, Route::DownThenRight]);

    assert_eq!(
        lines.lines[0].path_data,
        "M 60,280 L 415,280 Q 435,280 435,260 L 435,120 Q 435,100 455,100 L 485,100"
    );
    assert_eq!(lines.lines[1].path_data, "M 60,280 C 272.5,280 272.5,280 485,280");
}

#[test]
fn test_straight_pattern_uses_single_curve() {
    let harness = TestHarness::with_config(LinesConfig {
        pattern: LinePattern::Straight,
        ..LinesConfig::with_colors(palette())
    });
    harness.mount_and_settle();

    for line in harness.ctrl.lines().unwrap().lines {
        assert_eq!(line.route, Route::Curve);
        assert_eq!(line.path_data.matches(" C ").count(), 1);
    }
}

#[test]
fn test_colors_fall_back_to_first() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    let colors: Vec<_> = harness.line_rows().iter().map(|r| r.color).collect();
    let palette = palette();
    assert_eq!(colors, vec![palette[0], palette[1], palette[0]]);
}

#[test]
fn test_absent_target_is_skipped() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    harness.ctrl.tracker().target_removed_callback()(0);
    harness.ctrl.request_relayout();

    let lines = harness.ctrl.lines().unwrap();
    assert_eq!(harness.lines.row_count(), 2);
    let indices: Vec<usize> = lines.lines.iter().map(|l| l.index).collect();
    assert_eq!(indices, vec![1, 2]);

    // Delays stay positional
    assert!((lines.lines[0].delay - 0.7).abs() < 1e-6);
    assert!((lines.lines[1].delay - 1.0).abs() < 1e-6);
    // and so do colors
    assert_eq!(lines.lines[0].color, palette()[1]);
}

#[test]
fn test_resize_recomputes_with_current_rects() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    // The layout reflowed: cards moved right and down by 100
    let target = harness.ctrl.tracker().target_rect_callback();
    for i in 0..3 {
        target(i, 650.0, 180.0 + i as f32 * 180.0, 250.0, 80.0);
    }
    harness.window.invoke_layout_changed();

    assert_eq!(harness.ctrl.measure_count(), 2);
    let ends: Vec<(f32, f32)> = harness.line_rows().iter().map(|r| (r.end_x, r.end_y)).collect();
    assert_eq!(ends, vec![(585.0, 200.0), (585.0, 380.0), (585.0, 560.0)]);
}

#[test]
fn test_set_config_recomputes() {
    let harness = TestHarness::new();
    harness.mount_and_settle();

    harness.ctrl.set_config(LinesConfig {
        stroke_width: 3.5,
        ..LinesConfig::with_colors(palette())
    });

    assert_eq!(harness.ctrl.measure_count(), 2);
    assert!(harness.line_rows().iter().all(|r| r.stroke_width == 3.5));
}
