use simview_protocol::{RenderCommand, Scene, TextAlign, ViewConfig};

use crate::grid;
use crate::shapes;
use crate::viewport::Viewport;

/// Assemble the full display list for one frame:
/// clear → axes + grid → scene shapes in order → optional obstacle ids.
///
/// The host's display-refresh callback drives this once per frame; the
/// surface layer executes the commands and re-requests the next callback.
pub fn compose_frame(
    viewport: &Viewport,
    scene: &Scene,
    config: &ViewConfig,
    show_obstacle_ids: bool,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(scene.len() + 64);
    commands.push(RenderCommand::Clear {
        color: config.background_color,
    });
    commands.extend(grid::render_grid(viewport, config));
    commands.extend(shapes::render_scene(scene, viewport));

    if show_obstacle_ids {
        for shape in &scene.shapes {
            let (Some(id), Some(reference)) = (shape.id(), shape.reference_point()) else {
                continue;
            };
            if !reference.is_finite() {
                continue;
            }
            commands.push(RenderCommand::DrawText {
                position: viewport.to_pixel(reference),
                text: format!("#{id}"),
                color: config.text_color,
                font_size: config.font_size,
                align: TextAlign::Center,
            });
        }
    }

    commands
}
