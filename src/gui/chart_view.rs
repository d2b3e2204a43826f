//! Chart View Widget
//! Central panel hosting the column chart: keeps the retained surface in step with the
//! record frame and the panel size, drives animations and routes pointer input to bars.

use crate::charts::{ChartConfig, ColumnChart, EventQueue, HostEvent, PrimitiveKey, SceneSurface};
use crate::data::RecordFrame;
use egui::{Color32, Sense, Stroke};
use std::time::Duration;
use tracing::warn;

/// Longest frame step fed to the animations, so a stalled frame does not skip a transition.
const MAX_FRAME_STEP: f32 = 0.1;

pub struct ChartView {
    chart: ColumnChart<EventQueue>,
    surface: SceneSurface,
    /// Frame version the surface currently reflects
    rendered_version: Option<u64>,
    /// Set when the chart config changed since the last render
    dirty: bool,
    hovered: Option<PrimitiveKey>,
    last_error: Option<String>,
}

impl ChartView {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            chart: ColumnChart::new(config, EventQueue::new()),
            surface: SceneSurface::default(),
            rendered_version: None,
            dirty: true,
            hovered: None,
            last_error: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        self.chart.config()
    }

    /// Swap the chart config; the chart re-renders on the next frame.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.chart.set_config(config);
        self.dirty = true;
    }

    /// Click notifications received since the last call.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        self.chart.sink_mut().drain().collect()
    }

    fn sync(&mut self, frame: &RecordFrame, resized: bool) {
        if !resized && !self.dirty && self.rendered_version == Some(frame.version()) {
            return;
        }

        match self.chart.render(&mut self.surface, frame.records()) {
            Ok(_) => {
                self.last_error = None;
                // Updates restyle bars to resting paint; the pointer has not moved.
                if let Some(key) = &self.hovered {
                    if !self.chart.pointer_enter(&mut self.surface, key) {
                        self.hovered = None;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, version = frame.version(), "render rejected");
                self.last_error = Some(e.to_string());
            }
        }
        self.rendered_version = Some(frame.version());
        self.dirty = false;
    }

    fn route_pointer(&mut self, hit: Option<PrimitiveKey>, clicked: bool) {
        if hit != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.chart.pointer_leave(&mut self.surface, &old);
            }
            if let Some(new) = &hit {
                self.chart.pointer_enter(&mut self.surface, new);
            }
            self.hovered = hit.clone();
        }

        if clicked {
            if let Some(key) = &hit {
                self.chart.click(&self.surface, key);
            }
        }
    }

    /// Draw the chart into all remaining space.
    pub fn show(&mut self, ui: &mut egui::Ui, frame: &RecordFrame) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click());
        let offset = rect.min.to_vec2();

        let resized = self.surface.resize(rect.size());
        self.sync(frame, resized);

        let dt = ui.input(|i| i.stable_dt).clamp(0.0, MAX_FRAME_STEP);
        if self.surface.advance(Duration::from_secs_f32(dt)) {
            ui.ctx().request_repaint();
        }

        let hit = response
            .hover_pos()
            .and_then(|pos| self.surface.hit_test(pos - offset));
        self.route_pointer(hit, response.clicked());

        let painter = ui.painter_at(rect);
        if frame.is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No Data",
                egui::FontId::proportional(20.0),
                ui.visuals().weak_text_color(),
            );
        }

        for (_, bar) in self.surface.bars() {
            painter.rect(
                bar.rect.translate(offset),
                0.0,
                bar.paint.effective_fill(),
                Stroke::new(bar.paint.stroke_width, bar.paint.stroke),
            );
        }

        let text_color = ui.visuals().text_color();
        for text in self.surface.texts() {
            painter.text(
                text.pos + offset,
                text.anchor,
                &text.text,
                text.font.font_id(),
                text_color,
            );
        }

        if let Some(error) = &self.last_error {
            painter.text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                format!("Render error: {error}"),
                egui::FontId::proportional(12.0),
                Color32::from_rgb(220, 53, 69),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Family;
    use crate::data::sample_records;
    use egui::vec2;

    fn bar_fill(view: &ChartView, key: &PrimitiveKey) -> Color32 {
        view.surface
            .current(Family::Bar, key)
            .and_then(|p| p.as_bar().map(|b| b.paint.fill))
            .expect("bar exists")
    }

    #[test]
    fn hovered_bar_keeps_highlight_across_rerender() {
        let mut view = ChartView::new(ChartConfig::default());
        view.surface.resize(vec2(500.0, 300.0));
        let mut frame = RecordFrame::new(sample_records());
        view.sync(&frame, true);

        let key = PrimitiveKey::Index(0);
        view.route_pointer(Some(key.clone()), false);
        let hover = view.config().style.hover_paint().fill;
        assert_eq!(bar_fill(&view, &key), hover);

        frame.reverse();
        view.sync(&frame, false);
        assert_eq!(view.hovered, Some(key.clone()));
        assert_eq!(bar_fill(&view, &key), hover);

        view.route_pointer(None, false);
        assert_eq!(bar_fill(&view, &key), view.config().style.resting_paint().fill);
    }

    #[test]
    fn hover_is_dropped_when_the_bar_goes_away() {
        let mut view = ChartView::new(ChartConfig::default());
        view.surface.resize(vec2(500.0, 300.0));
        let mut frame = RecordFrame::new(sample_records());
        view.sync(&frame, true);

        let last = PrimitiveKey::Index(frame.len() - 1);
        view.route_pointer(Some(last), false);
        frame.truncate(frame.len() - 1);
        view.sync(&frame, false);
        assert_eq!(view.hovered, None);
    }
}
