use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::command::BrushStyle;

/// User-facing configuration, persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sections: u32,
    pub brush_width: f64,
    pub brush_color: Color32,
    pub draw_outside: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sections: 6,
            brush_width: 4.0,
            brush_color: Color32::BLACK,
            draw_outside: false,
        }
    }
}

impl Settings {
    pub fn brush_style(&self) -> BrushStyle {
        BrushStyle {
            color: self.brush_color,
            width: self.brush_width,
            ..BrushStyle::default()
        }
    }
}

/// Parses the section-count text field. `None` means leave the previous
/// value alone: the tool silently ignores malformed or out-of-range input.
pub fn parse_sections(text: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

/// Parses the brush-width text field; same leniency as `parse_sections`.
pub fn parse_brush_width(text: &str) -> Option<f64> {
    match text.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => Some(w),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_accepts_positive_integers() {
        assert_eq!(parse_sections("12"), Some(12));
        assert_eq!(parse_sections(" 3 "), Some(3));
    }

    #[test]
    fn sections_rejects_junk() {
        assert_eq!(parse_sections(""), None);
        assert_eq!(parse_sections("0"), None);
        assert_eq!(parse_sections("-4"), None);
        assert_eq!(parse_sections("six"), None);
        assert_eq!(parse_sections("3.5"), None);
    }

    #[test]
    fn brush_width_accepts_positive_floats() {
        assert_eq!(parse_brush_width("2.5"), Some(2.5));
        assert_eq!(parse_brush_width("10"), Some(10.0));
    }

    #[test]
    fn brush_width_rejects_junk() {
        assert_eq!(parse_brush_width(""), None);
        assert_eq!(parse_brush_width("0"), None);
        assert_eq!(parse_brush_width("-1.5"), None);
        assert_eq!(parse_brush_width("NaN"), None);
        assert_eq!(parse_brush_width("wide"), None);
    }
}
