use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::types::Point;

/// Drawing attributes shared by every shape record.
///
/// Both colors are optional on the wire: a shape with no `fill_color` is
/// outline-only, and a missing `border_color` falls back to the fill color
/// (not to transparent). Segments historically carried a single `color`
/// field, accepted here as an alias for `fill_color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, alias = "color", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

fn default_line_width() -> f64 {
    1.0
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_color: None,
            border_color: None,
            line_width: default_line_width(),
            alpha: None,
        }
    }
}

impl Style {
    /// Border color with the documented fallback to the fill color.
    pub fn effective_border(&self) -> Option<Color> {
        self.border_color.or(self.fill_color)
    }

    /// Alpha multiplier, defaulting to fully opaque.
    pub fn alpha_factor(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }
}

/// One shape record from a scene snapshot, tagged by `type` on the wire.
///
/// The geometry field names (`a`/`b`/`phi` for ellipses, `p1`/`p2` for
/// segments) follow the simulator's view serializer. `id` is only present
/// on obstacle shapes and drives the optional id overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        center: Point,
        radius: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        #[serde(flatten)]
        style: Style,
    },
    Polygon {
        points: Vec<Point>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        #[serde(flatten)]
        style: Style,
    },
    Segment {
        p1: Point,
        p2: Point,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        #[serde(flatten)]
        style: Style,
    },
    Ellipse {
        center: Point,
        /// Semi-major axis, world units.
        a: f64,
        /// Semi-minor axis, world units.
        b: f64,
        /// Rotation of the major axis, radians counter-clockwise.
        #[serde(default)]
        phi: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        #[serde(flatten)]
        style: Style,
    },
}

impl Shape {
    pub fn style(&self) -> &Style {
        match self {
            Self::Circle { style, .. }
            | Self::Polygon { style, .. }
            | Self::Segment { style, .. }
            | Self::Ellipse { style, .. } => style,
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Circle { id, .. }
            | Self::Polygon { id, .. }
            | Self::Segment { id, .. }
            | Self::Ellipse { id, .. } => *id,
        }
    }

    /// The world point used to anchor overlay labels: circle/ellipse center,
    /// first polygon vertex, or a segment's first endpoint.
    pub fn reference_point(&self) -> Option<Point> {
        match self {
            Self::Circle { center, .. } | Self::Ellipse { center, .. } => Some(*center),
            Self::Polygon { points, .. } => points.first().copied(),
            Self::Segment { p1, .. } => Some(*p1),
        }
    }
}

/// A full scene snapshot: an ordered list of shapes, drawn first-to-last.
///
/// Snapshots are replaced wholesale — there is no diffing and no z-index;
/// later shapes simply draw over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
