//! ColPlot - animated column chart dashboard
//!
//! Usage: `colplot [CONFIG.json]`. Log verbosity follows `RUST_LOG`.

use anyhow::Context as _;
use colplot::config::AppConfig;
use colplot::gui::ColPlotApp;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Log to stderr, `info` unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    let chart_config = config.chart_config().context("invalid chart config")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 400.0])
            .with_title("ColPlot"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "ColPlot",
        options,
        Box::new(move |cc| Ok(Box::new(ColPlotApp::new(cc, chart_config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
