//! Chart descriptions and their PDF rendering. One [`Figure`] becomes one
//! page.

pub mod axis;
mod pdf;

pub use pdf::{render, write_pdf};

/// Page size in PostScript points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const fn inches(width: f32, height: f32) -> Self {
        Self {
            width: width * 72.0,
            height: height * 72.0,
        }
    }
}

/// Insertion/deletion bars on a symlog axis with the commit count drawn as a
/// line on a secondary axis.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub labels: Vec<String>,
    pub insertions: Vec<u64>,
    pub deletions: Vec<u64>,
    pub commits: Vec<u32>,
    pub size: PageSize,
}

impl BarChart {
    /// An empty chart with one zeroed slot per label.
    pub fn new(title: String, x_label: &str, labels: Vec<String>, size: PageSize) -> Self {
        let slots = labels.len();
        Self {
            title,
            x_label: x_label.to_string(),
            labels,
            insertions: vec![0; slots],
            deletions: vec![0; slots],
            commits: vec![0; slots],
            size,
        }
    }

    pub fn set(&mut self, slot: usize, bin: &crate::model::Bin) {
        if slot < self.labels.len() {
            self.insertions[slot] = bin.insertions;
            self.deletions[slot] = bin.deletions;
            self.commits[slot] = bin.commits;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicCell {
    pub column: usize,
    /// 0 = Monday.
    pub row: usize,
    pub count: u32,
}

/// A calendar grid of week columns by weekday rows.
#[derive(Debug, Clone)]
pub struct MosaicChart {
    pub title: String,
    /// One entry per column; empty strings draw no label.
    pub column_labels: Vec<String>,
    pub cells: Vec<MosaicCell>,
    pub size: PageSize,
}

impl MosaicChart {
    pub fn max_count(&self) -> u32 {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub enum Figure {
    Bars(BarChart),
    Mosaic(MosaicChart),
}

impl Figure {
    pub fn size(&self) -> PageSize {
        match self {
            Figure::Bars(chart) => chart.size,
            Figure::Mosaic(chart) => chart.size,
        }
    }
}
