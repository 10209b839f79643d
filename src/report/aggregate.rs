use crate::model::{Bin, CommitRecord, WeekKey};
use crate::usermap::UserMap;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Contributor -> bucket -> totals. Ordered maps keep every report stable.
pub type Buckets<K> = BTreeMap<String, BTreeMap<K, Bin>>;

fn aggregate_by<K, F>(records: &[CommitRecord], users: &UserMap, key: F) -> Buckets<K>
where
    K: Ord,
    F: Fn(NaiveDate) -> K,
{
    let mut buckets: Buckets<K> = BTreeMap::new();
    for record in records {
        let contributor = users.resolve(&record.author_email);
        buckets
            .entry(contributor.to_string())
            .or_default()
            .entry(key(record.date))
            .or_default()
            .add(record);
    }
    buckets
}

pub fn aggregate_weeks(records: &[CommitRecord], users: &UserMap) -> Buckets<WeekKey> {
    aggregate_by(records, users, WeekKey::of)
}

pub fn aggregate_days(records: &[CommitRecord], users: &UserMap) -> Buckets<NaiveDate> {
    aggregate_by(records, users, |date| date)
}

/// One line of a contributor's history: either an active bucket or a run of
/// empty ones between two active buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry<K> {
    Active {
        window: K,
        #[serde(flatten)]
        bin: Bin,
    },
    Gap {
        windows: i64,
    },
}

/// Active buckets in order, with gap entries wherever `missing(prev, next)`
/// reports empty windows in between.
pub fn timeline<K, F>(bins: &BTreeMap<K, Bin>, missing: F) -> Vec<TimelineEntry<K>>
where
    K: Copy + Ord,
    F: Fn(&K, &K) -> i64,
{
    let mut entries = Vec::with_capacity(bins.len());
    let mut last: Option<K> = None;

    for (key, bin) in bins {
        if let Some(prev) = last {
            let windows = missing(&prev, key);
            if windows > 0 {
                entries.push(TimelineEntry::Gap { windows });
            }
        }
        entries.push(TimelineEntry::Active {
            window: *key,
            bin: *bin,
        });
        last = Some(*key);
    }
    entries
}

/// Empty weeks between two week buckets.
pub fn missing_weeks(prev: &WeekKey, next: &WeekKey) -> i64 {
    let days = (next.start - prev.start).num_days();
    if days >= 8 {
        days / 7 - 1
    } else {
        0
    }
}

/// Empty days between two day buckets.
pub fn missing_days(prev: &NaiveDate, next: &NaiveDate) -> i64 {
    ((*next - *prev).num_days() - 1).max(0)
}

pub fn gap_line(windows: i64, unit: &str) -> String {
    format!("  -- Gap of {} {}{}", windows, unit, if windows > 1 { "s" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(email: &str, day: NaiveDate, ins: u64, del: u64) -> CommitRecord {
        CommitRecord::new(email, day, ins, del)
    }

    fn aliases() -> UserMap {
        UserMap::parse(
            "ann@home.org Ann\nann@work.com Ann\nbob@example.com Bob\n",
            std::path::Path::new("users.txt"),
        )
        .unwrap()
    }

    #[test]
    fn aliases_aggregate_under_one_contributor() {
        let records = vec![
            record("ann@home.org", date(2024, 3, 4), 10, 1),
            record("ann@work.com", date(2024, 3, 5), 5, 2),
            record("bob@example.com", date(2024, 3, 5), 1, 1),
        ];
        let weeks = aggregate_weeks(&records, &aliases());
        assert_eq!(weeks.keys().collect::<Vec<_>>(), vec!["Ann", "Bob"]);

        let ann = &weeks["Ann"];
        assert_eq!(ann.len(), 1);
        let bin = ann.values().next().unwrap();
        assert_eq!(
            *bin,
            Bin {
                commits: 2,
                insertions: 15,
                deletions: 3
            }
        );
    }

    #[test]
    fn bucket_sums_match_raw_records() {
        let records = vec![
            record("a@x", date(2024, 1, 1), 3, 0),
            record("a@x", date(2024, 1, 3), 4, 9),
            record("a@x", date(2024, 1, 7), 0, 2),
            record("a@x", date(2024, 1, 8), 100, 50),
            record("a@x", date(2024, 1, 8), 1, 1),
        ];
        let users = UserMap::Identity;

        let weeks = &aggregate_weeks(&records, &users)["a@x"];
        let first = &weeks[&WeekKey::of(date(2024, 1, 1))];
        assert_eq!((first.commits, first.insertions, first.deletions), (3, 7, 11));
        let second = &weeks[&WeekKey::of(date(2024, 1, 8))];
        assert_eq!((second.commits, second.insertions, second.deletions), (2, 101, 51));

        let days = &aggregate_days(&records, &users)["a@x"];
        assert_eq!(days.len(), 4);
        assert_eq!(days[&date(2024, 1, 8)].commits, 2);

        let total: u64 = days.values().map(|b| b.insertions).sum();
        assert_eq!(total, records.iter().map(|r| r.insertions).sum::<u64>());
    }

    #[test]
    fn week_gaps_are_reported_separately_from_zero_weeks() {
        let records = vec![
            record("a@x", date(2024, 1, 1), 1, 1),
            // merge-only week: active, but zero lines
            record("a@x", date(2024, 1, 9), 0, 0),
            record("a@x", date(2024, 1, 31), 2, 0),
        ];
        let weeks = &aggregate_weeks(&records, &UserMap::Identity)["a@x"];
        let entries = timeline(weeks, missing_weeks);

        assert_eq!(entries.len(), 4);
        assert!(matches!(entries[1], TimelineEntry::Active { bin, .. } if bin.commits == 1 && bin.insertions == 0));
        assert_eq!(entries[2], TimelineEntry::Gap { windows: 2 });
    }

    #[test]
    fn adjacent_weeks_across_year_end_have_no_gap() {
        let records = vec![
            record("a@x", date(2020, 12, 31), 1, 0),
            record("a@x", date(2021, 1, 4), 1, 0),
        ];
        let weeks = &aggregate_weeks(&records, &UserMap::Identity)["a@x"];
        assert!(timeline(weeks, missing_weeks)
            .iter()
            .all(|e| matches!(e, TimelineEntry::Active { .. })));
    }

    #[test]
    fn day_gaps() {
        assert_eq!(missing_days(&date(2024, 3, 1), &date(2024, 3, 2)), 0);
        assert_eq!(missing_days(&date(2024, 3, 1), &date(2024, 3, 4)), 2);
        assert_eq!(gap_line(1, "day"), "  -- Gap of 1 day");
        assert_eq!(gap_line(3, "week"), "  -- Gap of 3 weeks");
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records = vec![
            record("z@x", date(2024, 1, 2), 1, 0),
            record("a@x", date(2024, 1, 1), 1, 0),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(
            aggregate_days(&records, &UserMap::Identity),
            aggregate_days(&reversed, &UserMap::Identity)
        );
    }
}
