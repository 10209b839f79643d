//! A year of daily commit counts laid out as a calendar mosaic.

use super::aggregate::{aggregate_days, missing_days, Buckets};
use super::output::ReportOutput;
use super::{Report, TextBlock};
use crate::model::{CommitRecord, DateRange};
use crate::plot::{Figure, MosaicCell, MosaicChart, PageSize};
use crate::usermap::UserMap;
use crate::util::week_start;
use chrono::{Datelike, Duration, Months, NaiveDate};

const PAGE: PageSize = PageSize::inches(7.5, 2.25);

/// From the Monday of the week one year back through `today`.
pub fn window(today: NaiveDate) -> DateRange {
    let year_ago = today.checked_sub_months(Months::new(12)).unwrap_or(today);
    DateRange::new()
        .with_since(week_start(year_ago))
        .with_until(today)
}

pub struct MosaicReport {
    range: DateRange,
    days: Buckets<NaiveDate>,
}

impl MosaicReport {
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

    /// Month abbreviation over the first column of each month.
    fn column_labels(first: NaiveDate, columns: usize) -> Vec<String> {
        let mut labels = Vec::with_capacity(columns);
        let mut last_month = None;
        for column in 0..columns {
            let monday = first + Duration::days(7 * column as i64);
            if last_month != Some(monday.month()) {
                labels.push(monday.format("%b").to_string());
                last_month = Some(monday.month());
            } else {
                labels.push(String::new());
            }
        }
        labels
    }
}

impl Report for MosaicReport {
    fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn text_blocks(&self) -> Vec<TextBlock> {
        self.days
            .iter()
            .map(|(contributor, bins)| TextBlock {
                heading: format!("Annual summary for {contributor}"),
                rows: bins
                    .iter()
                    .map(|(date, bin)| format!("  {}: {:>2} commits", date.format("%m/%d/%y"), bin.commits))
                    .collect(),
            })
            .collect()
    }

    fn figures(&self) -> Vec<Figure> {
        let (Some(since), Some(until)) = (self.range.since, self.range.until) else {
            return Vec::new();
        };
        let first = week_start(since);
        let columns = ((week_start(until) - first).num_days() / 7 + 1) as usize;
        let column_labels = Self::column_labels(first, columns);

        self.days
            .iter()
            .map(|(contributor, bins)| {
                let cells = bins
                    .iter()
                    .map(|(date, bin)| MosaicCell {
                        column: ((week_start(*date) - first).num_days() / 7) as usize,
                        row: date.weekday().num_days_from_monday() as usize,
                        count: bin.commits,
                    })
                    .filter(|cell| cell.column < columns)
                    .collect();

                Figure::Mosaic(MosaicChart {
                    title: format!("Commit summary for {contributor}"),
                    column_labels: column_labels.clone(),
                    cells,
                    size: PAGE,
                })
            })
            .collect()
    }

    fn to_json(&self) -> serde_json::Result<String> {
        ReportOutput::new("mosaic", self.range, &self.days, missing_days).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_starts_on_a_monday_a_year_back() {
        let range = window(date(2024, 6, 12));
        // 2023-06-12 is a Monday
        assert_eq!(range.since, Some(date(2023, 6, 12)));
        assert_eq!(range.until, Some(date(2024, 6, 12)));

        let leap = window(date(2024, 2, 29));
        // 2023-02-28 is a Tuesday
        assert_eq!(leap.since, Some(date(2023, 2, 27)));
    }

    #[test]
    fn text_lists_daily_counts() {
        let records = vec![
            CommitRecord::new("ann@x", date(2024, 6, 3), 1, 1),
            CommitRecord::new("ann@x", date(2024, 6, 3), 1, 1),
            CommitRecord::new("ann@x", date(2024, 6, 10), 1, 1),
            CommitRecord::new("ann@x", date(2022, 1, 1), 1, 1),
        ];
        let report = MosaicReport::build(&records, &UserMap::Identity, date(2024, 6, 12));
        assert_eq!(
            report.text_blocks(),
            vec![TextBlock {
                heading: "Annual summary for ann@x".into(),
                rows: vec![
                    "  06/03/24:  2 commits".into(),
                    "  06/10/24:  1 commits".into(),
                ],
            }]
        );
    }

    #[test]
    fn cells_are_placed_by_week_and_weekday() {
        let today = date(2024, 6, 12);
        let records = vec![
            CommitRecord::new("ann@x", date(2023, 6, 12), 1, 0),
            CommitRecord::new("ann@x", date(2024, 6, 9), 1, 0),
            CommitRecord::new("ann@x", date(2024, 6, 12), 1, 0),
        ];
        let figures = MosaicReport::build(&records, &UserMap::Identity, today).figures();
        let Figure::Mosaic(chart) = &figures[0] else {
            panic!("expected mosaic");
        };

        assert_eq!(chart.column_labels.len(), 53);
        assert_eq!(chart.column_labels[0], "Jun");
        assert_eq!(chart.column_labels[1], "");
        assert_eq!(
            chart.cells,
            vec![
                MosaicCell { column: 0, row: 0, count: 1 },
                MosaicCell { column: 51, row: 6, count: 1 },
                MosaicCell { column: 52, row: 2, count: 1 },
            ]
        );
        assert_eq!(chart.max_count(), 1);
    }
}
