//! Configuration enum types.

use crate::draw::{Color, color::INK_BLUE};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the end points of each pen segment are drawn.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PenCap {
    /// Flat end exactly at the segment end point
    Butt,
    /// Rounded end (default; gives taps a visible dot)
    #[default]
    Round,
    /// Square end extending half the pen width past the end point
    Square,
}

impl PenCap {
    pub fn to_cairo(self) -> cairo::LineCap {
        match self {
            PenCap::Butt => cairo::LineCap::Butt,
            PenCap::Round => cairo::LineCap::Round,
            PenCap::Square => cairo::LineCap::Square,
        }
    }
}

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "black"
///
/// # Hex color
/// color = "#145394"
///
/// # Custom RGB color (0-255 per component)
/// color = [20, 83, 148]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, white, black, ink, grey) or `#rrggbb` / `#rgb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names and malformed hex strings fall back to the given color
    /// with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using fallback", name);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Like [`ColorSpec::to_color_or`] with the default ink as fallback.
    pub fn to_color(&self) -> Color {
        self.to_color_or(INK_BLUE)
    }
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        ColorSpec::Name(value.to_string())
    }
}
