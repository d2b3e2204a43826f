//! Control Panel Widget
//! Left side panel: data source, record operations, chart settings and received events.

use crate::charts::{HostEvent, KeyMode};
use egui::{Color32, RichText, ScrollArea};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Number of received events kept for display
const EVENT_LOG_LEN: usize = 12;

/// User settings for the chart
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub key_mode: KeyMode,
    pub ceiling: f32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            key_mode: KeyMode::default(),
            ceiling: 1.0,
        }
    }
}

/// Left side control panel with data and chart controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub record_count: usize,
    pub status: String,
    events: VecDeque<HostEvent>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            record_count: 0,
            status: "Ready".to_string(),
            events: VecDeque::new(),
        }
    }
}

impl ControlPanel {
    pub fn new(key_mode: KeyMode, ceiling: f32) -> Self {
        Self {
            settings: UserSettings {
                key_mode,
                ceiling,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Record a received event, newest first.
    pub fn push_event(&mut self, event: HostEvent) {
        self.status = format!("Received {event}");
        self.events.push_front(event);
        self.events.truncate(EVENT_LOG_LEN);
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 ColPlot")
                    .size(22.0)
                    .color(Color32::from_rgb(0, 158, 115)),
            );
            ui.label(RichText::new("Column Chart").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "Preview data".to_string());
                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(5.0);
        ui.label(
            RichText::new(format!("{} records", self.record_count))
                .size(11.0)
                .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Record Operations =====
        ui.label(RichText::new("🔀 Records").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal_wrapped(|ui| {
            if ui.button("Reverse").clicked() {
                action = ControlPanelAction::Reverse;
            }
            if ui.button("Rotate").clicked() {
                action = ControlPanelAction::Rotate;
            }
            if ui
                .add_enabled(self.record_count > 0, egui::Button::new("Drop last"))
                .clicked()
            {
                action = ControlPanelAction::DropLast;
            }
            if ui.button("Restore").clicked() {
                action = ControlPanelAction::Restore;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Settings =====
        ui.label(RichText::new("⚙️ Chart").size(14.0).strong());
        ui.add_space(5.0);

        ui.label("Match bars by:");
        ui.horizontal(|ui| {
            for mode in KeyMode::ALL {
                if ui
                    .radio_value(&mut self.settings.key_mode, mode, mode.name())
                    .changed()
                {
                    action = ControlPanelAction::SettingsChanged;
                }
            }
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label("Ceiling:");
            let slider =
                egui::Slider::new(&mut self.settings.ceiling, 0.1..=10.0).logarithmic(true);
            if ui.add(slider).changed() {
                action = ControlPanelAction::SettingsChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Events Section =====
        ui.label(RichText::new("🖱 Events").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    if self.events.is_empty() {
                        ui.label(RichText::new("Click a column").size(11.0).color(Color32::GRAY));
                    }
                    for event in &self.events {
                        ui.label(RichText::new(event.to_string()).size(11.0).monospace());
                    }
                });
            });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reverse,
    Rotate,
    DropLast,
    Restore,
    SettingsChanged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ColumnClickSink, EventQueue};

    #[test]
    fn event_log_keeps_newest_first() {
        let mut panel = ControlPanel::new(KeyMode::Index, 1.0);
        let mut queue = EventQueue::new();
        for x in 0..20 {
            queue.on_column_clicked(x as f64);
        }
        for event in queue.drain() {
            panel.push_event(event);
        }

        assert_eq!(panel.events.len(), EVENT_LOG_LEN);
        assert_eq!(panel.events[0].payload, 19.0);
        assert_eq!(panel.status, "Received column_clicked = 19");
    }
}
