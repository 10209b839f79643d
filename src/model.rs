use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit, reduced to what the reports need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_email: String,
    pub date: NaiveDate,
    pub insertions: u64,
    pub deletions: u64,
}

impl CommitRecord {
    pub fn new(author_email: impl Into<String>, date: NaiveDate, insertions: u64, deletions: u64) -> Self {
        Self {
            author_email: author_email.into(),
            date,
            insertions,
            deletions,
        }
    }
}

/// An ISO week, together with the Monday it starts on.
///
/// Ordering follows `(iso_year, week)`; `start` grows with both so the derived
/// order stays consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub iso_year: i32,
    pub week: u32,
    pub start: NaiveDate,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
            start: crate::util::week_start(date),
        }
    }

    pub fn next(&self) -> Self {
        Self::of(self.start + chrono::Duration::days(7))
    }
}

/// Aggregated statistics for one contributor in one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub commits: u32,
    pub insertions: u64,
    pub deletions: u64,
}

impl Bin {
    pub fn add(&mut self, record: &CommitRecord) {
        self.commits += 1;
        self.insertions += record.insertions;
        self.deletions += record.deletions;
    }
}

/// Inclusive calendar window. An open end means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        if let Some(since) = self.since {
            if date < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date > &until {
                return false;
            }
        }
        true
    }

    /// Iterate every day of a bounded range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.since;
        let end = self.until;
        start
            .into_iter()
            .flat_map(move |s| s.iter_days().take_while(move |d| end.map_or(false, |e| *d <= e)))
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
