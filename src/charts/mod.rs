//! Charts module - Histogram rendering

mod renderer;

pub use renderer::{PlotError, StaticChartRenderer};
