use simview_protocol::{PixelPos, RenderCommand, TextAlign, ViewConfig};

use crate::viewport::Viewport;

const AXIS_WIDTH: f64 = 1.0;
const GRID_LINE_WIDTH: f64 = 0.25;

/// Tick label stride in world units, chosen from the current scale so
/// labels get denser only when zoomed in enough to read them.
fn label_stride(scale: f64) -> i64 {
    if scale > 1000.0 {
        1
    } else if scale > 100.0 {
        5
    } else {
        10
    }
}

/// Emit the axes, the one-world-unit grid, and adaptive tick labels.
///
/// Edges are recomputed from the live transform every frame instead of
/// being cached, so grid density always agrees with the current pan/zoom
/// without separate invalidation.
pub fn render_grid(viewport: &Viewport, config: &ViewConfig) -> Vec<RenderCommand> {
    let screen = viewport.screen();
    let scale = viewport.scale();
    let (offset_x, offset_y) = viewport.offset();
    let origin = viewport.origin_pixel();

    let mut commands = Vec::with_capacity(64);

    // Axis lines through the world origin.
    commands.push(RenderCommand::DrawLine {
        from: PixelPos::new(0.0, origin.y),
        to: PixelPos::new(screen.width, origin.y),
        color: config.axis_color,
        width: AXIS_WIDTH,
    });
    commands.push(RenderCommand::DrawLine {
        from: PixelPos::new(origin.x, 0.0),
        to: PixelPos::new(origin.x, screen.height),
        color: config.axis_color,
        width: AXIS_WIDTH,
    });

    let stride = label_stride(scale);
    let text_offset = config.tick_text_offset;

    // Vertical lines at every integer world column covering the screen.
    let left_edge = (-(screen.width / 2.0 - offset_x) / scale).floor() as i64;
    let right_edge = ((screen.width / 2.0 + offset_x) / scale).ceil() as i64;
    for column in left_edge..=right_edge {
        let px = origin.x + scale * column as f64;
        commands.push(RenderCommand::DrawLine {
            from: PixelPos::new(px, 0.0),
            to: PixelPos::new(px, screen.height),
            color: config.grid_color,
            width: GRID_LINE_WIDTH,
        });
        if column != 0 && column % stride == 0 {
            commands.push(RenderCommand::DrawText {
                position: PixelPos::new(px + text_offset, origin.y - text_offset),
                text: format!("{column} {}", config.unit),
                color: config.text_color,
                font_size: config.font_size,
                align: TextAlign::Left,
            });
        }
    }

    // Horizontal lines, symmetrically. Row labels are negated: screen-down
    // is world-negative-y.
    let top_edge = (-(screen.height / 2.0 - offset_y) / scale).floor() as i64;
    let bottom_edge = ((screen.height / 2.0 + offset_y) / scale).ceil() as i64;
    for row in top_edge..=bottom_edge {
        let py = origin.y + scale * row as f64;
        commands.push(RenderCommand::DrawLine {
            from: PixelPos::new(0.0, py),
            to: PixelPos::new(screen.width, py),
            color: config.grid_color,
            width: GRID_LINE_WIDTH,
        });
        if row != 0 && row % stride == 0 {
            commands.push(RenderCommand::DrawText {
                position: PixelPos::new(origin.x + text_offset, py - text_offset),
                text: format!("{} {}", -row, config.unit),
                color: config.text_color,
                font_size: config.font_size,
                align: TextAlign::Left,
            });
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use simview_protocol::ScreenSize;

    fn grid_for(scale_target: f64) -> (Viewport, ViewConfig) {
        let config = ViewConfig {
            min_scale: 0.5,
            max_scale: 100_000.0,
            initial_scale: scale_target,
            ..ViewConfig::default()
        };
        let vp = Viewport::new(&config, ScreenSize::new(800.0, 600.0));
        (vp, config)
    }

    #[test]
    fn stride_gets_coarser_as_the_view_zooms_out() {
        assert_eq!(label_stride(2000.0), 1);
        assert_eq!(label_stride(1000.0), 5);
        assert_eq!(label_stride(500.0), 5);
        assert_eq!(label_stride(100.0), 10);
        assert_eq!(label_stride(50.0), 10);
    }

    #[test]
    fn grid_covers_the_visible_columns() {
        let (vp, config) = grid_for(50.0);
        let commands = render_grid(&vp, &config);
        // 800px at 50px/unit centered on the origin: columns -8..=8, rows
        // -6..=6, plus the two axis lines.
        let lines = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        assert_eq!(lines, 2 + 17 + 13);
    }

    #[test]
    fn labels_are_negated_on_rows_and_carry_the_unit() {
        let (mut vp, config) = grid_for(120.0); // stride 5
        // Pan so that the ±5 columns and rows are inside the view.
        vp.set_offset(800.0, 800.0);
        let commands = render_grid(&vp, &config);
        let labels: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"-5 m"), "labels: {labels:?}");
        assert!(labels.contains(&"5 m"));
        assert!(!labels.contains(&"0 m"), "origin must not be labelled");
    }

    #[test]
    fn axes_track_the_pan() {
        let (mut vp, config) = grid_for(50.0);
        vp.set_offset(100.0, -50.0);
        let commands = render_grid(&vp, &config);
        let RenderCommand::DrawLine { from, to, .. } = &commands[0] else {
            panic!("first command should be the horizontal axis");
        };
        assert_eq!(from.y, 350.0);
        assert_eq!(to.y, 350.0);
    }
}
