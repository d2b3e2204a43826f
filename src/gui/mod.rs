//! GUI module - Reference dashboard host

mod app;
mod chart_view;
mod control_panel;

pub use app::ColPlotApp;
pub use chart_view::ChartView;
pub use control_panel::{ControlPanel, ControlPanelAction, UserSettings};
