//! Column Layout Module
//! Pure geometry of the column chart: surface size + record index + value -> pixels.
//!
//! Layout (fractions of the surface):
//! 1. Left margin: `left_margin * W`
//! 2. Top margin: `top_margin * H`, bars grow upward from `top + unit_height * ceiling`
//! 3. Category labels on a fixed row at `category_label_row * H`
//! 4. Value labels just above each bar top

use egui::{pos2, vec2, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Immutable layout parameters. Shared by every render call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left margin, fraction of surface width
    pub left_margin: f32,
    /// Top margin, fraction of surface height
    pub top_margin: f32,
    /// Fraction of the height covered by a bar of value `ceiling`
    pub usable_height: f32,
    /// Fraction of each column slot filled by its bar
    pub usable_width: f32,
    /// Value that maps to a full-height bar. Records are expected in `[0, ceiling]`.
    pub ceiling: f32,
    /// Vertical position of category labels, fraction of surface height
    pub category_label_row: f32,
    /// Scale applied to the top margin when placing value labels
    pub value_label_lift: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_margin: 0.01,
            top_margin: 0.1,
            usable_height: 0.8,
            usable_width: 0.97,
            ceiling: 1.0,
            category_label_row: 0.95,
            value_label_lift: 0.9,
        }
    }
}

impl LayoutConfig {
    pub fn with_ceiling(mut self, ceiling: f32) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Check every parameter, returning the name of the first bad one.
    pub fn validate(&self) -> Result<(), &'static str> {
        let fractions = [
            ("left_margin", self.left_margin),
            ("top_margin", self.top_margin),
            ("usable_height", self.usable_height),
            ("usable_width", self.usable_width),
            ("category_label_row", self.category_label_row),
            ("value_label_lift", self.value_label_lift),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(name);
            }
        }
        if !self.ceiling.is_finite() || self.ceiling <= 0.0 {
            return Err("ceiling");
        }
        Ok(())
    }
}

/// Geometry of one render pass, derived from the surface size and record count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    config: LayoutConfig,
    size: Vec2,
    bar_width: f32,
    unit_height: f32,
}

impl ColumnLayout {
    pub fn new(config: &LayoutConfig, size: Vec2, record_count: usize) -> Self {
        // An empty chart lays out nothing; avoid an infinite width all the same.
        let slots = record_count.max(1) as f32;
        Self {
            config: *config,
            size,
            bar_width: size.x / slots * config.usable_width,
            unit_height: size.y * config.usable_height / config.ceiling,
        }
    }

    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    fn top_px(&self) -> f32 {
        self.size.y * self.config.top_margin
    }

    /// Y coordinate all bars stand on.
    pub fn baseline(&self) -> f32 {
        self.top_px() + self.unit_height * self.config.ceiling
    }

    pub fn bar_x(&self, index: usize) -> f32 {
        index as f32 * self.bar_width + self.size.x * self.config.left_margin
    }

    fn bar_center_x(&self, index: usize) -> f32 {
        self.bar_x(index) + self.bar_width * 0.5
    }

    /// Distance from the top margin down to the top of a bar of `value`.
    fn drop(&self, value: f32) -> f32 {
        (self.config.ceiling - value) * self.unit_height
    }

    pub fn bar_height(&self, value: f32) -> f32 {
        value * self.unit_height
    }

    pub fn bar_rect(&self, index: usize, value: f32) -> Rect {
        Rect::from_min_size(
            pos2(self.bar_x(index), self.top_px() + self.drop(value)),
            vec2(self.bar_width, self.bar_height(value)),
        )
    }

    pub fn category_label_pos(&self, index: usize) -> Pos2 {
        pos2(
            self.bar_center_x(index),
            self.size.y * self.config.category_label_row,
        )
    }

    pub fn value_label_pos(&self, index: usize, value: f32) -> Pos2 {
        pos2(
            self.bar_center_x(index),
            self.top_px() * self.config.value_label_lift + self.drop(value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn two_records_on_500_by_300() {
        let layout = ColumnLayout::new(&LayoutConfig::default(), vec2(500.0, 300.0), 2);
        assert!(close(layout.bar_width(), 242.5));

        let first = layout.bar_rect(0, 0.5);
        assert!(close(first.min.x, 5.0));
        assert!(close(first.height(), 120.0));
        // 30px top margin + (1.0 - 0.5) * 240
        assert!(close(first.min.y, 150.0));
        assert!(close(first.max.y, layout.baseline()));

        let second = layout.bar_rect(1, 0.2);
        assert!(close(second.min.x, 247.5));
        assert!(close(second.height(), 48.0));
    }

    #[test]
    fn labels_are_centered_on_bars() {
        let layout = ColumnLayout::new(&LayoutConfig::default(), vec2(500.0, 300.0), 2);
        let category = layout.category_label_pos(1);
        assert!(close(category.x, 247.5 + 121.25));
        assert!(close(category.y, 285.0));

        let value = layout.value_label_pos(0, 0.5);
        assert!(close(value.x, 126.25));
        assert!(close(value.y, 27.0 + 120.0));
    }

    #[test]
    fn ceiling_rescales_heights() {
        let config = LayoutConfig::default().with_ceiling(50.0);
        let layout = ColumnLayout::new(&config, vec2(100.0, 100.0), 1);
        let rect = layout.bar_rect(0, 25.0);
        assert!(close(rect.height(), 40.0));
        assert!(close(rect.max.y, 90.0));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(LayoutConfig::default().validate().is_ok());
        assert_eq!(
            LayoutConfig::default().with_ceiling(0.0).validate(),
            Err("ceiling")
        );
        let config = LayoutConfig {
            usable_width: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err("usable_width"));
        let config = LayoutConfig {
            top_margin: f32::NAN,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err("top_margin"));
    }
}
