//! Chart Style Module
//! Default paint for bars and fonts for the two text families.

use egui::{Color32, FontFamily, FontId};

/// Resting bar fill (teal)
pub const DEFAULT_FILL: Color32 = Color32::from_rgb(0x00, 0x9E, 0x73);
/// Hovered bar fill (orange)
pub const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(0xFF, 0xB1, 0x4E);
pub const DEFAULT_STROKE: Color32 = Color32::WHITE;
pub const DEFAULT_OPACITY: f32 = 0.5;
pub const HOVER_OPACITY: f32 = 1.0;
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Fill, opacity and outline of a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Color32,
    pub opacity: f32,
    pub stroke: Color32,
    pub stroke_width: f32,
}

impl Paint {
    /// Fill colour with opacity applied, ready for the painter.
    pub fn effective_fill(&self) -> Color32 {
        self.fill.gamma_multiply(self.opacity)
    }
}

/// Font of a text mark. Only the proportional (sans-serif) family is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
}

impl FontSpec {
    pub fn font_id(&self) -> FontId {
        FontId::new(self.size, FontFamily::Proportional)
    }
}

/// Visual defaults shared by every primitive the chart produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub fill: Color32,
    pub highlight: Color32,
    pub stroke: Color32,
    pub stroke_width: f32,
    pub opacity: f32,
    pub hover_opacity: f32,
    pub font_size: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            highlight: HIGHLIGHT_FILL,
            stroke: DEFAULT_STROKE,
            stroke_width: 1.0,
            opacity: DEFAULT_OPACITY,
            hover_opacity: HOVER_OPACITY,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ChartStyle {
    /// Paint of a bar nobody is pointing at.
    pub fn resting_paint(&self) -> Paint {
        Paint {
            fill: self.fill,
            opacity: self.opacity,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
        }
    }

    /// Paint of the bar under the pointer.
    pub fn hover_paint(&self) -> Paint {
        Paint {
            fill: self.highlight,
            opacity: self.hover_opacity,
            ..self.resting_paint()
        }
    }

    pub fn font(&self) -> FontSpec {
        FontSpec {
            size: self.font_size,
        }
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) colour string.
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format a colour as `#RRGGBB`.
pub fn to_hex_color(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#009E73"), Some(DEFAULT_FILL));
        assert_eq!(parse_hex_color("ffb14e"), Some(HIGHLIGHT_FILL));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn hex_formatting_matches_parsing() {
        assert_eq!(to_hex_color(DEFAULT_FILL), "#009E73");
        assert_eq!(parse_hex_color(&to_hex_color(HIGHLIGHT_FILL)), Some(HIGHLIGHT_FILL));
    }

    #[test]
    fn hover_paint_keeps_outline() {
        let style = ChartStyle::default();
        let hover = style.hover_paint();
        assert_eq!(hover.fill, HIGHLIGHT_FILL);
        assert_eq!(hover.opacity, 1.0);
        assert_eq!(hover.stroke, Color32::WHITE);
        assert_eq!(style.resting_paint().opacity, 0.5);
    }
}
