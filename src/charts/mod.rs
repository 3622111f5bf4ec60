//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{span_for_zoom, ChartPlotter, MapFrame};
pub use renderer::{RenderError, StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
