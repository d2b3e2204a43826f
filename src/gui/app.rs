//! ColPlot Main Application
//! Dashboard host: control panel on the left, column chart in the centre.
//! Owns the record frame, loads CSV files in the background and receives the
//! chart's click notifications.

use crate::charts::{ChartConfig, LayoutConfig};
use crate::data::{sample_records, DataLoader, Record, RecordFrame};
use crate::gui::{ChartView, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete { records: Vec<Record>, path: PathBuf },
    Error(String),
}

/// Main application window.
pub struct ColPlotApp {
    frame: RecordFrame,
    /// Records the "Restore" action returns to
    source_records: Vec<Record>,
    control_panel: ControlPanel,
    chart_view: ChartView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ColPlotApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: ChartConfig) -> Self {
        let records = sample_records();
        let mut control_panel = ControlPanel::new(config.key_mode, config.layout.ceiling);
        control_panel.record_count = records.len();

        Self {
            frame: RecordFrame::new(records.clone()),
            source_records: records,
            control_panel,
            chart_view: ChartView::new(config),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        // Load CSV in background thread
        thread::spawn(move || {
            let message = match DataLoader::load_csv(&path) {
                Ok(records) => LoadResult::Complete { records, path },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { records, path }) => {
                info!(path = %path.display(), records = records.len(), "loaded records");
                self.control_panel
                    .set_status(&format!("Loaded {} records", records.len()));
                self.control_panel.settings.csv_path = Some(path);
                self.source_records = records.clone();
                self.frame.replace(records);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(error)) => {
                warn!(%error, "csv load failed");
                self.control_panel.set_status(&format!("Error: {}", error));
                self.is_loading = false;
            }
            Err(TryRecvError::Empty) => {
                // Still loading, put receiver back
                self.load_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                warn!("csv loader exited without a result");
                self.control_panel.set_status("Error: loader stopped");
                self.is_loading = false;
            }
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
            ControlPanelAction::Reverse => self.frame.reverse(),
            ControlPanelAction::Rotate => self.frame.rotate_left(),
            ControlPanelAction::DropLast => {
                let len = self.frame.len().saturating_sub(1);
                self.frame.truncate(len);
            }
            ControlPanelAction::Restore => self.frame.replace(self.source_records.clone()),
            ControlPanelAction::SettingsChanged => {
                let settings = &self.control_panel.settings;
                let current = self.chart_view.config();
                let layout: LayoutConfig = current.layout.with_ceiling(settings.ceiling);
                let config = ChartConfig {
                    layout,
                    key_mode: settings.key_mode,
                    ..current.clone()
                };
                self.chart_view.set_config(config);
            }
            ControlPanelAction::None => {}
        }
        self.control_panel.record_count = self.frame.len();
    }
}

impl eframe::App for ColPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        // Central panel - Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_view.show(ui, &self.frame);
        });

        for event in self.chart_view.take_events() {
            info!(%event, "host received event");
            self.control_panel.push_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_actions_edit_the_frame() {
        let mut app = ColPlotApp::with_config(ChartConfig::default());
        let version = app.frame.version();

        app.handle_action(ControlPanelAction::DropLast);
        assert_eq!(app.frame.len(), 3);
        assert_eq!(app.control_panel.record_count, 3);

        app.handle_action(ControlPanelAction::Reverse);
        assert_eq!(app.frame.records()[0].label, "mar");

        app.handle_action(ControlPanelAction::Restore);
        assert_eq!(app.frame.records(), sample_records().as_slice());
        assert_eq!(app.frame.version(), version + 3);
    }

    #[test]
    fn settings_change_reaches_the_chart() {
        let mut app = ColPlotApp::with_config(ChartConfig::default());
        app.control_panel.settings.ceiling = 4.0;
        app.control_panel.settings.key_mode = crate::charts::KeyMode::Label;
        app.handle_action(ControlPanelAction::SettingsChanged);

        let config = app.chart_view.config();
        assert_eq!(config.layout.ceiling, 4.0);
        assert_eq!(config.key_mode, crate::charts::KeyMode::Label);
        assert_eq!(config.layout.usable_width, 0.97);
    }
}
