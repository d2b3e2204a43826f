//! Column Chart Renderer
//! Reconciles bars, category labels and value labels on a surface with a record sequence,
//! and turns pointer events on bars into hover styling and click notifications.
//!
//! Each render:
//! 1. Queries the surface size (no caching)
//! 2. Validates every record before touching the surface
//! 3. Per family: removes stale primitives, creates new ones, animates the rest

use crate::charts::events::ColumnClickSink;
use crate::charts::layout::{ColumnLayout, LayoutConfig};
use crate::charts::primitive::{Bar, Family, KeyMode, Primitive, PrimitiveKey, TextMark};
use crate::charts::style::ChartStyle;
use crate::charts::surface::Surface;
use crate::charts::transition::DEFAULT_DURATION;
use crate::data::Record;
use egui::Align2;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f32, height: f32 },
    #[error("Record {index} has a non-finite {field}")]
    InvalidRecord { index: usize, field: &'static str },
    #[error("Layout parameter {field} is out of range")]
    InvalidConfig { field: &'static str },
}

/// Everything that shapes the chart, fixed for the lifetime of a config.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub layout: LayoutConfig,
    pub style: ChartStyle,
    pub key_mode: KeyMode,
    /// Length of update transitions
    pub transition: Duration,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            style: ChartStyle::default(),
            key_mode: KeyMode::default(),
            transition: DEFAULT_DURATION,
        }
    }
}

/// Primitive operations performed by one render, summed over all families.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Animated column chart bound to a click port.
pub struct ColumnChart<C> {
    config: ChartConfig,
    sink: C,
}

impl<C: ColumnClickSink> ColumnChart<C> {
    pub fn new(config: ChartConfig, sink: C) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next render.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
    }

    pub fn sink(&self) -> &C {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut C {
        &mut self.sink
    }

    /// Make the surface's primitives match `records`.
    ///
    /// On error the surface is left untouched. Nothing is drawn with a layout that fails
    /// [`LayoutConfig::validate`].
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        records: &[Record],
    ) -> Result<RenderSummary, RenderError> {
        let size = surface.size();
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(RenderError::SurfaceUnavailable {
                width: size.x,
                height: size.y,
            });
        }
        self.config
            .layout
            .validate()
            .map_err(|field| RenderError::InvalidConfig { field })?;
        validate_records(records)?;

        let layout = ColumnLayout::new(&self.config.layout, size, records.len());
        let keys = self.config.key_mode.keys(records);
        let wanted: HashSet<&PrimitiveKey> = keys.iter().collect();
        let mut summary = RenderSummary::default();

        for family in Family::ALL {
            let existing = surface.keys(family);
            for key in existing.iter().filter(|key| !wanted.contains(key)) {
                if surface.remove(family, key) {
                    trace!(?family, %key, "removed primitive");
                    summary.removed += 1;
                }
            }

            let existing: HashSet<PrimitiveKey> = existing.into_iter().collect();
            for (index, (record, key)) in records.iter().zip(&keys).enumerate() {
                let primitive = self.primitive_for(family, &layout, index, record);
                if existing.contains(key) {
                    surface.transition(key.clone(), primitive, self.config.transition);
                    summary.updated += 1;
                } else {
                    trace!(?family, %key, "created primitive");
                    surface.create(key.clone(), primitive);
                    summary.created += 1;
                }
            }
        }

        debug!(
            records = records.len(),
            width = size.x,
            height = size.y,
            created = summary.created,
            updated = summary.updated,
            removed = summary.removed,
            "rendered column chart"
        );
        Ok(summary)
    }

    fn primitive_for(
        &self,
        family: Family,
        layout: &ColumnLayout,
        index: usize,
        record: &Record,
    ) -> Primitive {
        let value = record.y as f32;
        let text = |pos, text: &str| TextMark {
            pos,
            text: text.to_owned(),
            font: self.config.style.font(),
            anchor: Align2::CENTER_BOTTOM,
        };

        match family {
            Family::Bar => Primitive::Bar(Bar {
                rect: layout.bar_rect(index, value),
                paint: self.config.style.resting_paint(),
                datum: record.x,
            }),
            Family::CategoryLabel => {
                Primitive::CategoryLabel(text(layout.category_label_pos(index), &record.label))
            }
            Family::ValueLabel => Primitive::ValueLabel(text(
                layout.value_label_pos(index, value),
                &record.value_label,
            )),
        }
    }

    /// Highlight a bar. Returns `false` if the key names no bar.
    pub fn pointer_enter<S: Surface>(&self, surface: &mut S, key: &PrimitiveKey) -> bool {
        trace!(%key, "pointer enter");
        surface.restyle_bar(key, self.config.style.hover_paint())
    }

    /// Restore a bar's resting paint.
    pub fn pointer_leave<S: Surface>(&self, surface: &mut S, key: &PrimitiveKey) -> bool {
        trace!(%key, "pointer leave");
        surface.restyle_bar(key, self.config.style.resting_paint())
    }

    /// Forward a click on a bar to the sink, with the bar's bound `x`.
    pub fn click<S: Surface>(&mut self, surface: &S, key: &PrimitiveKey) -> bool {
        let Some(value) = surface.bar_datum(key) else {
            return false;
        };
        self.sink.on_column_clicked(value);
        true
    }
}

fn validate_records(records: &[Record]) -> Result<(), RenderError> {
    for (index, record) in records.iter().enumerate() {
        if !record.y.is_finite() {
            return Err(RenderError::InvalidRecord { index, field: "y" });
        }
        if !record.x.is_finite() {
            return Err(RenderError::InvalidRecord { index, field: "x" });
        }
    }
    Ok(())
}
