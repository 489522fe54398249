use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Host-injected viewport configuration: theme colors, typography, and the
/// zoom envelope. Every field has a default matching the reference client,
/// so a partial config document only needs to name the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub background_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    /// Tick label font size in pixels.
    pub font_size: f64,
    /// Offset of tick labels from their axis, in pixels.
    pub tick_text_offset: f64,
    /// Pixels per world unit after a reset ("home").
    pub initial_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Distance unit suffix for tick labels.
    pub unit: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            axis_color: Color::rgb(0xBE, 0xBE, 0xBE),
            grid_color: Color::rgb(0x69, 0x69, 0x69),
            text_color: Color::BLACK,
            font_size: 14.0,
            tick_text_offset: 5.0,
            initial_scale: 50.0,
            min_scale: 8.0,
            max_scale: 4000.0,
            unit: "m".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_overrides_defaults() {
        let config: ViewConfig =
            serde_json::from_str(r#"{"background_color": "black", "min_scale": 2.0}"#).unwrap();
        assert_eq!(config.background_color, Color::BLACK);
        assert_eq!(config.min_scale, 2.0);
        assert_eq!(config.initial_scale, 50.0);
        assert_eq!(config.unit, "m");
    }

    #[test]
    fn default_scale_envelope_is_sane() {
        let config = ViewConfig::default();
        assert!(config.min_scale > 0.0);
        assert!(config.min_scale <= config.initial_scale);
        assert!(config.initial_scale <= config.max_scale);
    }
}
