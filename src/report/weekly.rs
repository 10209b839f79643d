//! Day-by-day activity over the last seven days.

use super::aggregate::{aggregate_days, gap_line, missing_days, timeline, Buckets, TimelineEntry};
use super::output::ReportOutput;
use super::{Report, TextBlock};
use crate::model::{Bin, CommitRecord, DateRange};
use crate::plot::{BarChart, Figure, PageSize};
use crate::usermap::UserMap;
use chrono::{Duration, NaiveDate};

const PAGE: PageSize = PageSize::inches(6.0, 3.0);

/// `today - 7 ..= today`.
pub fn window(today: NaiveDate) -> DateRange {
    DateRange::new()
        .with_since(today - Duration::days(7))
        .with_until(today)
}

pub struct WeeklyReport {
    range: DateRange,
    days: Buckets<NaiveDate>,
}

impl WeeklyReport {
    pub fn build(records: &[CommitRecord], users: &UserMap, today: NaiveDate) -> Self {
        let range = window(today);
        let in_window: Vec<CommitRecord> = records
            .iter()
            .filter(|r| range.contains(&r.date))
            .cloned()
            .collect();
        Self {
            range,
            days: aggregate_days(&in_window, users),
        }
    }
}

pub fn day_row(date: &NaiveDate, bin: &Bin) -> String {
    format!(
        "  {}: {:>2} commits, +{:<4} -{:<4}",
        date.format("%a, %b %d"),
        bin.commits,
        bin.insertions,
        bin.deletions
    )
}

impl Report for WeeklyReport {
    fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn text_blocks(&self) -> Vec<TextBlock> {
        self.days
            .iter()
            .map(|(contributor, bins)| TextBlock {
                heading: format!("Weekly report for {contributor}"),
                rows: timeline(bins, missing_days)
                    .iter()
                    .map(|entry| match entry {
                        TimelineEntry::Active { window, bin } => day_row(window, bin),
                        TimelineEntry::Gap { windows } => gap_line(*windows, "day"),
                    })
                    .collect(),
            })
            .collect()
    }

    fn figures(&self) -> Vec<Figure> {
        let Some(since) = self.range.since else {
            return Vec::new();
        };
        let labels: Vec<String> = self
            .range
            .days()
            .map(|d| d.format("%a").to_string())
            .collect();

        self.days
            .iter()
            .map(|(contributor, bins)| {
                let mut chart = BarChart::new(
                    format!("Weekly report for {contributor}"),
                    "Day of Week",
                    labels.clone(),
                    PAGE,
                );
                for (date, bin) in bins {
                    let slot = (*date - since).num_days();
                    chart.set(slot as usize, bin);
                }
                Figure::Bars(chart)
            })
            .collect()
    }

    fn to_json(&self) -> serde_json::Result<String> {
        ReportOutput::new("weekly", self.range, &self.days, missing_days).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Friday
    fn today() -> NaiveDate {
        date(2024, 3, 15)
    }

    fn sample() -> WeeklyReport {
        let records = vec![
            CommitRecord::new("ann@x", date(2024, 3, 7), 999, 999),
            CommitRecord::new("ann@x", date(2024, 3, 8), 5, 1),
            CommitRecord::new("ann@x", date(2024, 3, 8), 2, 2),
            CommitRecord::new("ann@x", date(2024, 3, 12), 0, 0),
            CommitRecord::new("ann@x", date(2024, 3, 13), 40, 0),
            CommitRecord::new("ann@x", date(2024, 3, 16), 999, 999),
        ];
        WeeklyReport::build(&records, &UserMap::Identity, today())
    }

    #[test]
    fn window_covers_eight_days() {
        let range = window(today());
        assert_eq!(range.since, Some(date(2024, 3, 8)));
        assert_eq!(range.days().count(), 8);
    }

    #[test]
    fn text_lists_days_and_gaps() {
        let blocks = sample().text_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].heading, "Weekly report for ann@x");
        assert_eq!(
            blocks[0].rows,
            vec![
                "  Fri, Mar 08:  2 commits, +7    -3   ".to_string(),
                "  -- Gap of 3 days".to_string(),
                "  Tue, Mar 12:  1 commits, +0    -0   ".to_string(),
                "  Wed, Mar 13:  1 commits, +40   -0   ".to_string(),
            ]
        );
    }

    #[test]
    fn figure_has_a_slot_per_day() {
        let figures = sample().figures();
        let Figure::Bars(chart) = &figures[0] else {
            panic!("expected bars");
        };
        assert_eq!(
            chart.labels,
            vec!["Fri", "Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]
        );
        assert_eq!(chart.commits, vec![2, 0, 0, 0, 1, 1, 0, 0]);
        assert_eq!(chart.insertions[5], 40);
    }
}
