use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, pos2, vec2,
};

use super::super::style::{BACKGROUND, STATUS_COLOR, blend_color};
use super::scene::DrawCommand;
use super::transform::Transform;

const GRID_STEP: f32 = 56.0;
const CURVE_SEGMENTS: usize = 14;

/// Background fill plus a grid whose screen offset is `pan mod step`, so it
/// appears to pan and zoom with the world without any world-space iteration.
pub(in crate::app) fn paint_background(painter: &Painter, rect: Rect, transform: &Transform) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let step = (GRID_STEP * transform.zoom.clamp(0.6, 1.8)).max(20.0);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + transform.pan.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + transform.pan.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        y += step;
    }
}

fn bezier_point(from: Pos2, control: Pos2, to: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    pos2(
        u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
        u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
    )
}

/// Replay one frame's draw commands. Command positions are viewport-relative;
/// `rect` anchors them on the full painter surface.
pub(in crate::app) fn paint_scene(painter: &Painter, rect: Rect, commands: &[DrawCommand]) {
    let origin = rect.min.to_vec2();

    for command in commands {
        match command {
            DrawCommand::LinkCurve { from, control, to, from_color, to_color, width } => {
                // Piecewise segments so the stroke can blend between the two
                // endpoint colors.
                let mut previous = *from + origin;
                for segment in 1..=CURVE_SEGMENTS {
                    let t = segment as f32 / CURVE_SEGMENTS as f32;
                    let point = bezier_point(*from, *control, *to, t) + origin;
                    let color = blend_color(*from_color, *to_color, t - 0.5 / CURVE_SEGMENTS as f32);
                    painter.line_segment([previous, point], Stroke::new(*width, color));
                    previous = point;
                }
            }
            DrawCommand::LinkArrow { tip, left, right, color } => {
                painter.add(Shape::convex_polygon(
                    vec![*tip + origin, *left + origin, *right + origin],
                    *color,
                    Stroke::NONE,
                ));
            }
            DrawCommand::Glow { center, radius, color } => {
                for (scale, alpha_scale) in [(1.0, 1.0_f32), (0.8, 1.6), (0.62, 2.3)] {
                    let alpha = ((color.a() as f32) * alpha_scale).min(255.0) as u8;
                    painter.circle_filled(
                        *center + origin,
                        radius * scale,
                        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha),
                    );
                }
            }
            DrawCommand::HoverRing { center, radius, color } => {
                let points = (0..=48)
                    .map(|step| {
                        let angle = (step as f32 / 48.0) * std::f32::consts::TAU;
                        *center + origin + vec2(angle.cos(), angle.sin()) * *radius
                    })
                    .collect::<Vec<_>>();
                painter.extend(Shape::dashed_line(
                    &points,
                    Stroke::new(1.4, *color),
                    6.0,
                    4.0,
                ));
            }
            DrawCommand::NodeBody { center, radius, fill } => {
                painter.circle_filled(*center + origin, *radius, *fill);
                // Offset sheen approximates a radial shading gradient.
                painter.circle_filled(
                    *center + origin - vec2(*radius * 0.3, *radius * 0.3),
                    *radius * 0.55,
                    Color32::from_rgba_unmultiplied(255, 255, 255, (22.0 * (fill.a() as f32 / 255.0)) as u8),
                );
            }
            DrawCommand::Ring { center, radius, width, color } => {
                painter.circle_stroke(*center + origin, *radius, Stroke::new(*width, *color));
            }
            DrawCommand::Dot { center, radius, color } => {
                painter.circle_filled(*center + origin, *radius, *color);
                painter.circle_stroke(
                    *center + origin,
                    *radius,
                    Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
                );
            }
            DrawCommand::Icon { center, glyph, size, color } => {
                painter.text(
                    *center + origin,
                    Align2::CENTER_CENTER,
                    glyph,
                    FontId::proportional(*size),
                    *color,
                );
            }
            DrawCommand::Label { pos, text, color } => {
                painter.text(
                    *pos + origin,
                    Align2::CENTER_TOP,
                    text,
                    FontId::proportional(12.0),
                    *color,
                );
            }
            DrawCommand::StatusLine { text } => {
                painter.text(
                    rect.left_bottom() + vec2(10.0, -10.0),
                    Align2::LEFT_BOTTOM,
                    text,
                    FontId::proportional(13.0),
                    STATUS_COLOR,
                );
            }
        }
    }
}
