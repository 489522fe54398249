use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGBA color, decoded from the simulator's CSS-style string encoding.
///
/// The wire carries colors as `#RRGGBB`, `#RRGGBBAA`, or one of the named
/// colors the simulator palettes use (`orange`, `transparent`, …).
/// Serialization always emits the hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Scale the alpha channel by `factor` (clamped to `[0, 1]`).
    pub fn with_alpha_factor(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * factor).round() as u8,
            ..self
        }
    }
}

/// Error produced when a color string cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color string: {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

fn named(name: &str) -> Option<Color> {
    // The subset of CSS named colors the simulator palettes actually emit.
    let c = match name {
        "transparent" => Color::TRANSPARENT,
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "gray" | "grey" => Color::rgb(0x80, 0x80, 0x80),
        "lightgray" | "lightgrey" => Color::rgb(0xD3, 0xD3, 0xD3),
        "darkgray" | "darkgrey" => Color::rgb(0xA9, 0xA9, 0xA9),
        "red" => Color::rgb(0xFF, 0x00, 0x00),
        "darkred" => Color::rgb(0x8B, 0x00, 0x00),
        "green" => Color::rgb(0x00, 0x80, 0x00),
        "darkgreen" => Color::rgb(0x00, 0x64, 0x00),
        "blue" => Color::rgb(0x00, 0x00, 0xFF),
        "darkblue" => Color::rgb(0x00, 0x00, 0x8B),
        "orange" => Color::rgb(0xFF, 0xA5, 0x00),
        "yellow" => Color::rgb(0xFF, 0xFF, 0x00),
        _ => return None,
    };
    Some(c)
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(ColorParseError(s.to_string()));
            }
            let byte = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| ColorParseError(s.to_string()))
            };
            return match hex.len() {
                6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
                8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
                _ => Err(ColorParseError(s.to_string())),
            };
        }
        named(&s.to_ascii_lowercase()).ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_alpha() {
        assert_eq!("#0047AB".parse::<Color>().unwrap(), Color::rgb(0x00, 0x47, 0xAB));
        assert_eq!(
            "#0047AB66".parse::<Color>().unwrap(),
            Color::rgba(0x00, 0x47, 0xAB, 0x66)
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!("orange".parse::<Color>().unwrap(), Color::rgb(0xFF, 0xA5, 0x00));
        assert!("transparent".parse::<Color>().unwrap().is_transparent());
        assert!("no-such-color".parse::<Color>().is_err());
    }

    #[test]
    fn serde_roundtrip_via_hex_string() {
        let c: Color = serde_json::from_str("\"#00640066\"").unwrap();
        assert_eq!(c, Color::rgba(0x00, 0x64, 0x00, 0x66));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#00640066\"");
    }

    #[test]
    fn alpha_factor_scales_and_clamps() {
        let c = Color::rgb(10, 20, 30).with_alpha_factor(0.5);
        assert_eq!(c.a, 128);
        assert_eq!(Color::WHITE.with_alpha_factor(2.0).a, 255);
    }
}
