use simview_protocol::{Color, RenderCommand, Scene, Shape, StrokeStyle, Style};

use crate::viewport::Viewport;

/// Fill and stroke resolved from a wire [`Style`]: border falls back to the
/// fill color, the optional alpha multiplier applies to both, and fully
/// transparent colors are dropped.
fn resolve_style(style: &Style) -> (Option<Color>, Option<StrokeStyle>) {
    let alpha = style.alpha_factor();
    let fill = style
        .fill_color
        .map(|c| c.with_alpha_factor(alpha))
        .filter(|c| !c.is_transparent());
    let stroke = style
        .effective_border()
        .map(|c| c.with_alpha_factor(alpha))
        .filter(|c| !c.is_transparent())
        .map(|color| StrokeStyle::new(color, style.line_width));
    (fill, stroke)
}

/// Convert one shape into draw commands through the transform.
///
/// Returns `None` for malformed shapes (empty polygon, non-finite points,
/// non-positive radii): they are skipped for the frame without aborting it.
fn render_shape(shape: &Shape, viewport: &Viewport) -> Option<RenderCommand> {
    let (fill, stroke) = resolve_style(shape.style());
    if fill.is_none() && stroke.is_none() {
        return None;
    }
    match shape {
        Shape::Circle { center, radius, .. } => {
            if !center.is_finite() || !radius.is_finite() || *radius <= 0.0 {
                return None;
            }
            Some(RenderCommand::DrawCircle {
                center: viewport.to_pixel(*center),
                radius: radius * viewport.scale(),
                fill,
                stroke,
            })
        }
        Shape::Polygon { points, .. } => {
            if points.is_empty() || points.iter().any(|p| !p.is_finite()) {
                return None;
            }
            Some(RenderCommand::DrawPolygon {
                points: points.iter().map(|p| viewport.to_pixel(*p)).collect(),
                fill,
                stroke,
            })
        }
        Shape::Segment { p1, p2, .. } => {
            if !p1.is_finite() || !p2.is_finite() {
                return None;
            }
            // A segment only strokes; its color resolves through the same
            // fallback chain as a border.
            let stroke = stroke?;
            Some(RenderCommand::DrawLine {
                from: viewport.to_pixel(*p1),
                to: viewport.to_pixel(*p2),
                color: stroke.color,
                width: stroke.width,
            })
        }
        Shape::Ellipse {
            center, a, b, phi, ..
        } => {
            if !center.is_finite()
                || !a.is_finite()
                || !b.is_finite()
                || !phi.is_finite()
                || *a <= 0.0
                || *b <= 0.0
            {
                return None;
            }
            Some(RenderCommand::DrawEllipse {
                center: viewport.to_pixel(*center),
                radius_x: a * viewport.scale(),
                radius_y: b * viewport.scale(),
                rotation: *phi,
                fill,
                stroke,
            })
        }
    }
}

/// Emit draw commands for every shape in scene order. Later shapes draw
/// over earlier ones; there is no z-index. Pure function of the snapshot
/// and the transform.
pub fn render_scene(scene: &Scene, viewport: &Viewport) -> Vec<RenderCommand> {
    scene
        .shapes
        .iter()
        .filter_map(|shape| render_shape(shape, viewport))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use simview_protocol::{PixelPos, Point, ScreenSize, ViewConfig};

    fn viewport() -> Viewport {
        Viewport::new(&ViewConfig::default(), ScreenSize::new(800.0, 600.0))
    }

    fn style(fill: Option<&str>, border: Option<&str>) -> Style {
        Style {
            fill_color: fill.map(|c| c.parse().unwrap()),
            border_color: border.map(|c| c.parse().unwrap()),
            line_width: 1.0,
            alpha: None,
        }
    }

    #[test]
    fn circle_radius_scales_to_pixels() {
        let shape = Shape::Circle {
            center: Point::new(1.0, 1.0),
            radius: 0.5,
            id: None,
            style: style(Some("orange"), None),
        };
        let Some(RenderCommand::DrawCircle { center, radius, fill, stroke }) =
            render_shape(&shape, &viewport())
        else {
            panic!("expected a circle command");
        };
        assert_eq!(center, PixelPos::new(450.0, 250.0));
        assert_eq!(radius, 25.0);
        assert!(fill.is_some());
        // Border falls back to the fill color rather than disappearing.
        assert_eq!(stroke.unwrap().color, fill.unwrap());
    }

    #[test]
    fn empty_polygon_is_skipped_without_error() {
        let shape = Shape::Polygon {
            points: vec![],
            id: None,
            style: style(Some("red"), None),
        };
        assert!(render_shape(&shape, &viewport()).is_none());
    }

    #[test]
    fn non_finite_geometry_is_skipped() {
        let shape = Shape::Segment {
            p1: Point::new(f64::NAN, 0.0),
            p2: Point::new(1.0, 1.0),
            id: None,
            style: style(Some("black"), None),
        };
        assert!(render_shape(&shape, &viewport()).is_none());
    }

    #[test]
    fn transparent_only_style_produces_nothing() {
        let shape = Shape::Circle {
            center: Point::new(0.0, 0.0),
            radius: 1.0,
            id: None,
            style: style(Some("transparent"), None),
        };
        assert!(render_shape(&shape, &viewport()).is_none());
    }

    #[test]
    fn alpha_multiplier_applies_to_both_colors() {
        let shape = Shape::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            id: None,
            style: Style {
                alpha: Some(0.5),
                ..style(Some("#FF0000"), Some("#00FF00"))
            },
        };
        let Some(RenderCommand::DrawPolygon { fill, stroke, .. }) =
            render_shape(&shape, &viewport())
        else {
            panic!("expected a polygon command");
        };
        assert_eq!(fill.unwrap().a, 128);
        assert_eq!(stroke.unwrap().color.a, 128);
    }

    #[test]
    fn ellipse_carries_its_own_rotation() {
        let shape = Shape::Ellipse {
            center: Point::new(0.0, 0.0),
            a: 2.0,
            b: 1.0,
            phi: std::f64::consts::FRAC_PI_4,
            id: None,
            style: style(None, Some("blue")),
        };
        let Some(RenderCommand::DrawEllipse { radius_x, radius_y, rotation, fill, .. }) =
            render_shape(&shape, &viewport())
        else {
            panic!("expected an ellipse command");
        };
        assert_eq!(radius_x, 100.0);
        assert_eq!(radius_y, 50.0);
        assert_eq!(rotation, std::f64::consts::FRAC_PI_4);
        assert!(fill.is_none());
    }

    #[test]
    fn scene_order_is_draw_order() {
        let scene = Scene {
            shapes: vec![
                Shape::Circle {
                    center: Point::new(0.0, 0.0),
                    radius: 1.0,
                    id: None,
                    style: style(Some("red"), None),
                },
                Shape::Polygon {
                    points: vec![],
                    id: None,
                    style: style(Some("red"), None),
                }, // skipped
                Shape::Segment {
                    p1: Point::new(0.0, 0.0),
                    p2: Point::new(1.0, 1.0),
                    id: None,
                    style: style(Some("black"), None),
                },
            ],
        };
        let commands = render_scene(&scene, &viewport());
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], RenderCommand::DrawCircle { .. }));
        assert!(matches!(commands[1], RenderCommand::DrawLine { .. }));
    }
}
