use crate::config::OverlayConfig;
use crate::interaction::InteractionState;
use crate::model::{LineSegment, Point};
use eframe::egui;
use std::time::{Duration, Instant};

/// Half-length of each crosshair arm after `elapsed` at `growth_rate` points
/// per second. Truncated to whole points; grows without bound.
pub fn arm_length(growth_rate: f32, elapsed: Duration) -> f32 {
    (growth_rate.max(0.0) * elapsed.as_secs_f32()).trunc()
}

/// Geometry of the growing crosshair. Empty when not drawing.
pub fn crosshair_segments(
    drawing: bool,
    anchor: Point,
    elapsed: Duration,
    config: &OverlayConfig,
) -> Vec<LineSegment> {
    if !drawing {
        return Vec::new();
    }
    let half_length = arm_length(config.growth_rate, elapsed);
    let half_angle = config.splay_angle / 2.0;
    [-half_angle, half_angle]
        .into_iter()
        .map(|angle_degrees| LineSegment {
            center: anchor,
            half_length,
            angle_degrees,
        })
        .collect()
}

/// Paint one overlay frame: the translucent backdrop, then the crosshair if a
/// draw is in progress.
pub fn paint(
    painter: &egui::Painter,
    rect: egui::Rect,
    state: &InteractionState,
    now: Instant,
    config: &OverlayConfig,
) {
    painter.rect_filled(
        rect,
        0.0,
        config.background_color.with_opacity(config.window_opacity),
    );

    let segments = crosshair_segments(
        state.is_drawing(),
        state.draw_anchor().unwrap_or_default(),
        state.elapsed(now),
        config,
    );
    if segments.is_empty() {
        return;
    }

    let stroke = egui::Stroke::new(
        config.line_width,
        config.line_color.with_opacity(config.window_opacity),
    );
    let origin = rect.min.to_vec2();
    for segment in segments {
        let (start, end) = segment.endpoints();
        painter.line_segment(
            [egui::Pos2::from(start) + origin, egui::Pos2::from(end) + origin],
            stroke,
        );
    }
}
