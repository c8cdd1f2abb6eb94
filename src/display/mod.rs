pub mod text;

pub use text::TextSurface;

use crate::income::{export::DisplayRow, ChartData, KeyMetrics, Overview};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// Where the dashboards render. Implementations decide the look; callers
/// only hand over structured data.
pub trait DisplaySurface {
    /// A drawn question, shown as a highlighted block.
    fn question(&mut self, category: &str, text: &str) -> io::Result<()>;

    fn notice(&mut self, level: Level, message: &str) -> io::Result<()>;

    fn overview(&mut self, overview: &Overview) -> io::Result<()>;

    /// None renders a placeholder for an empty view.
    fn metrics(&mut self, metrics: Option<&KeyMetrics>) -> io::Result<()>;

    fn chart(&mut self, chart: &ChartData) -> io::Result<()>;

    fn table(&mut self, rows: &[DisplayRow<'_>]) -> io::Result<()>;
}
