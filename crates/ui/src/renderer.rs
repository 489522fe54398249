use egui::{Align2, CornerRadius, FontId, Pos2, Stroke};
use simview_protocol::{Color, PixelPos, RenderCommand, TextAlign};

/// Segment count for tessellated ellipses.
const ELLIPSE_STEPS: usize = 48;

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn to_pos2(origin: Pos2, p: PixelPos) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

fn stroke_of(stroke: Option<simview_protocol::StrokeStyle>) -> Stroke {
    match stroke {
        Some(s) => Stroke::new(s.width as f32, to_color32(s.color)),
        None => Stroke::NONE,
    }
}

/// Execute a frame's `RenderCommand` list on an egui `Painter`.
///
/// `canvas` is the viewport rect in ui coordinates; command positions are
/// relative to its top-left corner. Commands are self-contained, so no
/// transform or clip state survives from one command to the next — in
/// particular a rotated ellipse cannot tilt the shapes drawn after it.
pub fn execute_commands(painter: &egui::Painter, canvas: egui::Rect, commands: &[RenderCommand]) {
    let origin = canvas.min;

    for command in commands {
        match command {
            RenderCommand::Clear { color } => {
                painter.rect_filled(canvas, CornerRadius::ZERO, to_color32(*color));
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [to_pos2(origin, *from), to_pos2(origin, *to)],
                    Stroke::new(*width as f32, to_color32(*color)),
                );
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
            } => {
                painter.circle(
                    to_pos2(origin, *center),
                    *radius as f32,
                    fill.map(to_color32).unwrap_or(egui::Color32::TRANSPARENT),
                    stroke_of(*stroke),
                );
            }

            RenderCommand::DrawPolygon {
                points,
                fill,
                stroke,
            } => {
                if points.is_empty() {
                    continue;
                }
                let points: Vec<Pos2> = points.iter().map(|p| to_pos2(origin, *p)).collect();
                painter.add(egui::Shape::Path(egui::epaint::PathShape {
                    points,
                    closed: true,
                    fill: fill.map(to_color32).unwrap_or(egui::Color32::TRANSPARENT),
                    stroke: stroke_of(*stroke).into(),
                }));
            }

            RenderCommand::DrawEllipse {
                center,
                radius_x,
                radius_y,
                rotation,
                fill,
                stroke,
            } => {
                let center = to_pos2(origin, *center);
                let (sin, cos) = rotation.sin_cos();
                let points: Vec<Pos2> = (0..ELLIPSE_STEPS)
                    .map(|i| {
                        let t = i as f64 / ELLIPSE_STEPS as f64 * std::f64::consts::TAU;
                        // Local axis-aligned point, then rotate by phi.
                        // Screen y points down, so the y term flips sign.
                        let lx = t.cos() * radius_x;
                        let ly = t.sin() * radius_y;
                        Pos2::new(
                            center.x + (lx * cos - ly * sin) as f32,
                            center.y - (lx * sin + ly * cos) as f32,
                        )
                    })
                    .collect();
                painter.add(egui::Shape::Path(egui::epaint::PathShape {
                    points,
                    closed: true,
                    fill: fill.map(to_color32).unwrap_or(egui::Color32::TRANSPARENT),
                    stroke: stroke_of(*stroke).into(),
                }));
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_BOTTOM,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_BOTTOM,
                };
                painter.text(
                    to_pos2(origin, *position),
                    anchor,
                    text,
                    FontId::proportional(*font_size as f32),
                    to_color32(*color),
                );
            }
        }
    }
}
