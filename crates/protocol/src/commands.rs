use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::types::{PixelPos, TextAlign};

/// Stroke attributes for outlined draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// A single, stateless render instruction in screen-pixel coordinates.
///
/// The core composes a `Vec<RenderCommand>` per frame (clear, grid, scene,
/// overlays); surfaces consume the list sequentially. Every command carries
/// all the data it needs — in particular `DrawEllipse` carries its own
/// rotation, so no transform state can leak from one shape into the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill the whole surface with a background color.
    Clear { color: Color },

    /// Draw a stroked line segment.
    DrawLine {
        from: PixelPos,
        to: PixelPos,
        color: Color,
        width: f64,
    },

    /// Draw a disc, filled and/or stroked.
    DrawCircle {
        center: PixelPos,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },

    /// Draw an implicitly closed polygon with rounded joins.
    DrawPolygon {
        points: Vec<PixelPos>,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },

    /// Draw an axis-aligned ellipse rotated by `rotation` radians about its
    /// center. Radii are already in pixels.
    DrawEllipse {
        center: PixelPos,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: PixelPos,
        text: String,
        color: Color,
        font_size: f64,
        align: TextAlign,
    },
}
