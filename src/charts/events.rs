//! Click port between the chart and its host.

use std::fmt;

/// Channel name the host receives column clicks on.
pub const COLUMN_CLICKED: &str = "column_clicked";

/// Receives column clicks. Called synchronously, once per click.
pub trait ColumnClickSink {
    fn on_column_clicked(&mut self, value: f64);
}

impl<F: FnMut(f64)> ColumnClickSink for F {
    fn on_column_clicked(&mut self, value: f64) {
        self(value)
    }
}

/// Delivery priority of a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Delivered as-is, never merged with an identical earlier value.
    Event,
}

/// A notification addressed to the host's input handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEvent {
    pub channel: &'static str,
    pub payload: f64,
    pub priority: Priority,
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.channel, self.payload)
    }
}

/// Host-side queue of received events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.events.drain(..)
    }
}

impl ColumnClickSink for EventQueue {
    fn on_column_clicked(&mut self, value: f64) {
        tracing::debug!(channel = COLUMN_CLICKED, value, "column clicked");
        self.events.push(HostEvent {
            channel: COLUMN_CLICKED,
            payload: value,
            priority: Priority::Event,
        });
    }
}
