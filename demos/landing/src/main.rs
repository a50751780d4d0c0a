use slint::{Color, ComponentHandle, ModelRc, SharedString, Timer, TimerMode, VecModel};
use slint_animated_lines::{AnimatedLinesController, LinePattern, LinesConfig};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

slint::include_modules!();

// How long the page "scrolls" before the hero comes into view
const IN_VIEW_DELAY: Duration = Duration::from_millis(600);

fn main() -> Result<(), slint::PlatformError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let window = MainWindow::new()?;

    let accents = vec![
        Color::from_rgb_u8(0x00, 0xff, 0x88), // Green
        Color::from_rgb_u8(0x3b, 0x82, 0xf6), // Blue
        Color::from_rgb_u8(0xf5, 0x9e, 0x0b), // Amber
        Color::from_rgb_u8(0xa8, 0x55, 0xf7), // Purple
        Color::from_rgb_u8(0xff, 0x6b, 0x6b), // Coral
    ];
    let features = [
        ("Ingest", "Pull documents from anywhere"),
        ("Index", "Embeddings kept fresh automatically"),
        ("Answer", "Grounded responses with citations"),
        ("Act", "Trigger workflows from answers"),
        ("Observe", "Every step traced and replayable"),
    ];

    window.set_accents(ModelRc::new(VecModel::from(accents.clone())));
    window.set_features(ModelRc::new(VecModel::from(
        features
            .iter()
            .map(|(title, blurb)| Feature {
                title: SharedString::from(*title),
                blurb: SharedString::from(*blurb),
            })
            .collect::<Vec<_>>(),
    )));

    // `straight` can be selected with LINES_PATTERN=straight
    let pattern = std::env::var("LINES_PATTERN")
        .ok()
        .and_then(|p| match p.parse::<LinePattern>() {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!("{err}, using fan");
                None
            }
        })
        .unwrap_or_default();

    let ctrl = AnimatedLinesController::new(LinesConfig {
        pattern,
        ..LinesConfig::with_colors(accents)
    });
    ctrl.set_target_count(features.len());

    // Geometry tracking
    window.on_container_rect_changed(ctrl.tracker().container_rect_callback());
    window.on_origin_rect_changed(ctrl.tracker().origin_rect_callback());
    window.on_target_rect_changed(ctrl.tracker().target_rect_callback());
    window.on_layout_changed(ctrl.resize_callback());
    window.on_visibility_changed(ctrl.visibility_callback());

    // Render output
    let lines = Rc::new(VecModel::<LineData>::default());
    window.set_lines(ModelRc::from(lines.clone()));
    ctrl.bind_model(lines, |l| LineData {
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

    window.invoke_report_geometry();
    ctrl.mount();

    let in_view = Timer::default();
    in_view.start(TimerMode::SingleShot, IN_VIEW_DELAY, {
        let w = window.as_weak();
        let ctrl = ctrl.clone();
        move || {
            if let Some(w) = w.upgrade() {
                w.set_in_view(true);
            }
            ctrl.set_visible(true);
        }
    });

    window.run()?;
    ctrl.unmount();
    Ok(())
}
