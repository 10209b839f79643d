//! Per-contributor ISO-week history over the whole log.

use super::aggregate::{aggregate_weeks, gap_line, missing_weeks, timeline, Buckets, TimelineEntry};
use super::output::ReportOutput;
use super::{Report, TextBlock};
use crate::model::{Bin, CommitRecord, DateRange, WeekKey};
use crate::plot::{BarChart, Figure, PageSize};
use crate::usermap::UserMap;

const PAGE: PageSize = PageSize::inches(24.0, 4.0);

pub struct HistoryReport {
    range: DateRange,
    weeks: Buckets<WeekKey>,
}

impl HistoryReport {
    pub fn build(records: &[CommitRecord], users: &UserMap, range: DateRange) -> Self {
        Self {
            range,
            weeks: aggregate_weeks(records, users),
        }
    }

    /// First and last active week over every contributor.
    fn span(&self) -> Option<(WeekKey, WeekKey)> {
        let first = self.weeks.values().filter_map(|w| w.keys().next()).min()?;
        let last = self.weeks.values().filter_map(|w| w.keys().next_back()).max()?;
        Some((*first, *last))
    }

    /// Axis labels for every week from `first` through `last`. The first week
    /// of each ISO year and the first plotted week carry the year.
    fn week_labels(first: WeekKey, last: WeekKey) -> Vec<String> {
        let mut labels = Vec::new();
        let mut week = first;
        while week <= last {
            if week.week == 1 || week == first {
                labels.push(format!("{} - {}", week.iso_year, week.week));
            } else {
                labels.push(format!("{}", week.week));
            }
            week = week.next();
        }
        labels
    }
}

pub fn week_row(key: &WeekKey, bin: &Bin) -> String {
    format!(
        "  {}, week {:>2}: {:>2} commits, +{:<4} -{:<4}",
        key.iso_year, key.week, bin.commits, bin.insertions, bin.deletions
    )
}

impl Report for HistoryReport {
    fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    fn text_blocks(&self) -> Vec<TextBlock> {
        self.weeks
            .iter()
            .map(|(contributor, bins)| TextBlock {
                heading: format!("History for {contributor}"),
                rows: timeline(bins, missing_weeks)
                    .iter()
                    .map(|entry| match entry {
                        TimelineEntry::Active { window, bin } => week_row(window, bin),
                        TimelineEntry::Gap { windows } => gap_line(*windows, "week"),
                    })
                    .collect(),
            })
            .collect()
    }

    fn figures(&self) -> Vec<Figure> {
        let Some((first, last)) = self.span() else {
            return Vec::new();
        };
        let labels = Self::week_labels(first, last);

        self.weeks
            .iter()
            .map(|(contributor, bins)| {
                let mut chart = BarChart::new(
                    format!("Modification history for {contributor}"),
                    "Week number",
                    labels.clone(),
                    PAGE,
                );
                for (key, bin) in bins {
                    let slot = (key.start - first.start).num_days() / 7;
                    chart.set(slot as usize, bin);
                }
                Figure::Bars(chart)
            })
            .collect()
    }

    fn to_json(&self) -> serde_json::Result<String> {
        ReportOutput::new("history", self.range, &self.weeks, missing_weeks).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> HistoryReport {
        let records = vec![
            CommitRecord::new("ann@x", date(2023, 12, 27), 12, 3),
            CommitRecord::new("ann@x", date(2023, 12, 29), 1, 0),
            CommitRecord::new("ann@x", date(2024, 1, 22), 0, 0),
            CommitRecord::new("bob@x", date(2024, 1, 3), 250, 17),
        ];
        HistoryReport::build(&records, &UserMap::Identity, DateRange::new())
    }

    #[test]
    fn text_lists_weeks_and_gaps() {
        let blocks = sample().text_blocks();
        assert_eq!(
            blocks,
            vec![
                TextBlock {
                    heading: "History for ann@x".into(),
                    rows: vec![
                        "  2023, week 52:  2 commits, +13   -3   ".into(),
                        "  -- Gap of 3 weeks".into(),
                        "  2024, week  4:  1 commits, +0    -0   ".into(),
                    ],
                },
                TextBlock {
                    heading: "History for bob@x".into(),
                    rows: vec!["  2024, week  1:  1 commits, +250  -17  ".into()],
                },
            ]
        );
    }

    #[test]
    fn one_figure_per_contributor_on_a_shared_axis() {
        let figures = sample().figures();
        assert_eq!(figures.len(), 2);
        let Figure::Bars(ann) = &figures[0] else {
            panic!("expected bars");
        };
        assert_eq!(ann.title, "Modification history for ann@x");
        assert_eq!(ann.labels, vec!["2023 - 52", "2024 - 1", "2", "3", "4"]);
        assert_eq!(ann.commits, vec![2, 0, 0, 0, 1]);
        assert_eq!(ann.insertions[0], 13);

        let Figure::Bars(bob) = &figures[1] else {
            panic!("expected bars");
        };
        assert_eq!(bob.commits, vec![0, 1, 0, 0, 0]);
    }

    #[test]
    fn json_marks_gaps() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["report"], "history");
        let timeline = json["contributors"][0]["timeline"].as_array().unwrap();
        assert_eq!(timeline[0]["kind"], "active");
        assert_eq!(timeline[0]["commits"], 2);
        assert_eq!(timeline[1]["kind"], "gap");
        assert_eq!(timeline[1]["windows"], 3);
    }

    #[test]
    fn empty_history_has_no_figures() {
        let report = HistoryReport::build(&[], &UserMap::Identity, DateRange::new());
        assert!(report.is_empty());
        assert!(report.figures().is_empty());
        assert!(report.text_blocks().is_empty());
    }
}
