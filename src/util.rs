//! Utility functions for color names and coordinate conversion.

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "white", "black"
/// - "ink" (the default pen color) and "grey"/"gray" (the default guideline color)
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "ink" => Some(INK_BLUE),
        "grey" | "gray" => Some(GUIDE_GREY),
        _ => None,
    }
}

/// Parses either a color name or a hex literal.
pub fn parse_color(value: &str) -> Option<Color> {
    if value.trim_start().starts_with('#') {
        Color::from_hex(value)
    } else {
        name_to_color(value)
    }
}

// ============================================================================
// Coordinates
// ============================================================================

/// Floors a page-space coordinate into device pixels.
///
/// Returns `None` for non-finite input or values that do not fit in `i32`.
pub fn floor_to_pixel(value: f64) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if floored < i32::MIN as f64 || floored > i32::MAX as f64 {
        None
    } else {
        Some(floored as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_accepts_names_and_hex() {
        assert_eq!(parse_color("Black"), Some(BLACK));
        assert_eq!(parse_color("#ffffff"), Some(WHITE));
        assert_eq!(parse_color("ink"), Some(INK_BLUE));
        assert_eq!(parse_color("mauve"), None);
    }

    #[test]
    fn floor_to_pixel_floors_toward_negative_infinity() {
        assert_eq!(floor_to_pixel(10.9), Some(10));
        assert_eq!(floor_to_pixel(-0.5), Some(-1));
        assert_eq!(floor_to_pixel(f64::NAN), None);
        assert_eq!(floor_to_pixel(1e12), None);
    }
}
