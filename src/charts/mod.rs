//! Charts module - Figure layout and chart rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::Figure;
pub use plotter::ChartPlotter;
pub use renderer::{OutputFormat, StaticChartRenderer};
