pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod history;
pub mod mosaic;
pub mod output;
pub mod weekly;

pub use exec::exec;
pub use history::HistoryReport;
pub use mosaic::MosaicReport;
pub use weekly::WeeklyReport;

use crate::plot::Figure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Mosaic,
    History,
    Weekly,
}

impl ReportKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Mosaic => "mosaic",
            ReportKind::History => "history",
            ReportKind::Weekly => "weekly",
        }
    }
}

/// A contributor's section of the plain-text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub heading: String,
    pub rows: Vec<String>,
}

/// Everything a report can be rendered as.
pub trait Report {
    fn is_empty(&self) -> bool;

    fn text_blocks(&self) -> Vec<TextBlock>;

    /// One figure per contributor.
    fn figures(&self) -> Vec<Figure>;

    fn to_json(&self) -> serde_json::Result<String>;
}
