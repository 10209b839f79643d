use super::aggregate::{timeline, Buckets, TimelineEntry};
use super::TextBlock;
use crate::model::{DateRange, SCHEMA_VERSION};
use console::style;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ContributorTimeline<K> {
    pub contributor: String,
    pub timeline: Vec<TimelineEntry<K>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput<K> {
    pub version: u32,
    pub report: &'static str,
    pub range: DateRange,
    pub contributors: Vec<ContributorTimeline<K>>,
}

impl<K: Copy + Ord + Serialize> ReportOutput<K> {
    pub fn new<F>(report: &'static str, range: DateRange, buckets: &Buckets<K>, missing: F) -> Self
    where
        F: Fn(&K, &K) -> i64,
    {
        let contributors = buckets
            .iter()
            .map(|(contributor, bins)| ContributorTimeline {
                contributor: contributor.clone(),
                timeline: timeline(bins, &missing),
            })
            .collect();

        Self {
            version: SCHEMA_VERSION,
            report,
            range,
            contributors,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn output_text(blocks: &[TextBlock]) {
    if blocks.is_empty() {
        println!("No commits found");
        return;
    }

    for block in blocks {
        println!("{}", style(&block.heading).bold());
        for row in &block.rows {
            println!("{row}");
        }
        println!();
    }
}

pub fn output_json(json: &str) {
    println!("{json}");
}
