//! ColPlot - animated column chart for reactive dashboards
//!
//! The chart renderer reconciles bars and labels on a [`charts::Surface`] with an ordered
//! record sequence, animates updates and forwards bar clicks to an injected port.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
