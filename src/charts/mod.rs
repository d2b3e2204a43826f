//! Charts module - Column chart layout, primitives and rendering

mod events;
mod layout;
mod primitive;
mod renderer;
mod style;
mod surface;
mod transition;

pub use events::{ColumnClickSink, EventQueue, HostEvent, Priority, COLUMN_CLICKED};
pub use layout::{ColumnLayout, LayoutConfig};
pub use primitive::{Bar, Family, Interpolate, KeyMode, Primitive, PrimitiveKey, TextMark};
pub use renderer::{ChartConfig, ColumnChart, RenderError, RenderSummary};
pub use style::{
    parse_hex_color, to_hex_color, ChartStyle, FontSpec, Paint, DEFAULT_FILL, HIGHLIGHT_FILL,
};
pub use surface::{SceneSurface, Surface};
pub use transition::{ease_cubic_in_out, Transition, DEFAULT_DURATION};
