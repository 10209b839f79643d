use crate::error::Result;
use crate::model::{CommitRecord, DateRange};

/// Anything that can produce commit records for a date window.
pub trait CommitSource {
    /// Human-readable origin, used in log messages.
    fn describe(&self) -> String;

    fn commits(&self, range: &DateRange) -> Result<Vec<CommitRecord>>;
}
