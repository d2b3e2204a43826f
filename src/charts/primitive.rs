//! Chart primitives: the three families the renderer keeps on a surface,
//! the keys that bind them to records, and their interpolation.

use crate::charts::style::{FontSpec, Paint};
use crate::data::Record;
use egui::{lerp, Align2, Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Primitive family. Each is reconciled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Bar,
    CategoryLabel,
    ValueLabel,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Bar, Family::CategoryLabel, Family::ValueLabel];
}

/// How records are matched to the primitives already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// By position in the record sequence. Reordering animates bars into new meanings.
    #[default]
    Index,
    /// By `label`, duplicates numbered by occurrence.
    Label,
    /// By `x`, duplicates numbered by occurrence.
    Ordinal,
}

impl KeyMode {
    pub const ALL: [KeyMode; 3] = [KeyMode::Index, KeyMode::Label, KeyMode::Ordinal];

    pub fn name(self) -> &'static str {
        match self {
            KeyMode::Index => "Position",
            KeyMode::Label => "Label",
            KeyMode::Ordinal => "X value",
        }
    }

    /// One key per record, unique within the sequence.
    pub fn keys(self, records: &[Record]) -> Vec<PrimitiveKey> {
        match self {
            KeyMode::Index => (0..records.len()).map(PrimitiveKey::Index).collect(),
            KeyMode::Label => {
                let mut seen: HashMap<&str, usize> = HashMap::new();
                records
                    .iter()
                    .map(|record| {
                        let occurrence = seen.entry(record.label.as_str()).or_default();
                        let key = PrimitiveKey::Label {
                            label: record.label.clone(),
                            occurrence: *occurrence,
                        };
                        *occurrence += 1;
                        key
                    })
                    .collect()
            }
            KeyMode::Ordinal => {
                let mut seen: HashMap<u64, usize> = HashMap::new();
                records
                    .iter()
                    .map(|record| {
                        // -0.0 and 0.0 name the same category
                        let bits = if record.x == 0.0 { 0 } else { record.x.to_bits() };
                        let occurrence = seen.entry(bits).or_default();
                        let key = PrimitiveKey::Ordinal {
                            bits,
                            occurrence: *occurrence,
                        };
                        *occurrence += 1;
                        key
                    })
                    .collect()
            }
        }
    }
}

/// Identity binding a primitive to a record across renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKey {
    Index(usize),
    Label { label: String, occurrence: usize },
    Ordinal { bits: u64, occurrence: usize },
}

impl fmt::Display for PrimitiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKey::Index(index) => write!(f, "[{index}]"),
            PrimitiveKey::Label { label, occurrence } => write!(f, "{label}#{occurrence}"),
            PrimitiveKey::Ordinal { bits, occurrence } => {
                write!(f, "x={}#{occurrence}", f64::from_bits(*bits))
            }
        }
    }
}

/// A column. `datum` is the record's `x`, handed to the click port.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    pub paint: Paint,
    pub datum: f64,
}

/// A text mark (category or value label).
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub pos: Pos2,
    pub text: String,
    pub font: FontSpec,
    pub anchor: Align2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bar(Bar),
    CategoryLabel(TextMark),
    ValueLabel(TextMark),
}

impl Primitive {
    pub fn as_bar(&self) -> Option<&Bar> {
        match self {
            Primitive::Bar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextMark> {
        match self {
            Primitive::CategoryLabel(text) | Primitive::ValueLabel(text) => Some(text),
            Primitive::Bar(_) => None,
        }
    }
}

/// Values a transition can tween. `t` is already eased, in `[0, 1]`.
///
/// Discrete attributes (text, click payload) take the target value immediately.
pub trait Interpolate: Clone {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    lerp(from as f32..=to as f32, t).round().clamp(0.0, 255.0) as u8
}

fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    Color32::from_rgba_premultiplied(
        lerp_u8(from.r(), to.r(), t),
        lerp_u8(from.g(), to.g(), t),
        lerp_u8(from.b(), to.b(), t),
        lerp_u8(from.a(), to.a(), t),
    )
}

impl Interpolate for Paint {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Paint {
            fill: lerp_color(self.fill, to.fill, t),
            opacity: lerp(self.opacity..=to.opacity, t),
            stroke: lerp_color(self.stroke, to.stroke, t),
            stroke_width: lerp(self.stroke_width..=to.stroke_width, t),
        }
    }
}

impl Interpolate for Bar {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Bar {
            rect: Rect::from_min_max(
                self.rect.min.lerp(to.rect.min, t),
                self.rect.max.lerp(to.rect.max, t),
            ),
            paint: self.paint.interpolate(&to.paint, t),
            datum: to.datum,
        }
    }
}

impl Interpolate for TextMark {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        TextMark {
            pos: self.pos.lerp(to.pos, t),
            text: to.text.clone(),
            font: FontSpec {
                size: lerp(self.font.size..=to.font.size, t),
            },
            anchor: to.anchor,
        }
    }
}
