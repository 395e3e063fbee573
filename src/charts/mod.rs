//! Charts module - aggregation and rendering

mod plotter;
mod renderer;
mod summary;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use summary::ChartSummary;
