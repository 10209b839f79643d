use crate::error::{GitplyError, Result};
use crate::model::{CommitRecord, DateRange};
use crate::source::CommitSource;
use chrono::{DateTime, FixedOffset, NaiveDate};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Git looks at the first 8000 bytes for a NUL to decide a blob is binary.
const BINARY_PROBE_LEN: usize = 8000;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo_path = path.as_ref();
        if !repo_path.exists() {
            return Err(GitplyError::GitRepo(format!(
                "No such repository path: {}",
                repo_path.display()
            )));
        }

        let repo = discover(repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walk every commit reachable from `HEAD` once and keep those dated
    /// inside `range`.
    pub fn collect_commits(&self, range: &DateRange) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            warn!(repo = %self.path.display(), "repository has no commits");
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} ({pos})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Reading {}", self.path.display()));

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let author = commit.author()?;
            // Author date, as `git log --date=short` shows it.
            let date = commit_date(author.time()?)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            if range.contains(&date) {
                let (insertions, deletions) = match parents.as_slice() {
                    [] => self.diff_stats(None, commit_id)?,
                    [parent] => self.diff_stats(Some(*parent), commit_id)?,
                    // `git log --numstat` prints no diff for merges.
                    _ => (0, 0),
                };

                commits.push(CommitRecord {
                    author_email: author.email.to_string(),
                    date,
                    insertions,
                    deletions,
                });
                pb.inc(1);
            }

            stack.extend(parents);
        }

        pb.finish_and_clear();
        debug!(repo = %self.path.display(), commits = commits.len(), "collected commits");
        Ok(commits)
    }

    fn diff_stats(&self, parent_id: Option<ObjectId>, commit_id: ObjectId) -> Result<(u64, u64)> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let parent_tree = match parent_id {
            Some(id) => Some(self.repo.find_commit(id)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let mut totals = (0u64, 0u64);
        for change in changes {
            let (added, deleted) = self.change_stats(change);
            totals.0 += added;
            totals.1 += deleted;
        }
        Ok(totals)
    }

    fn change_stats(&self, change: ChangeDetached) -> (u64, u64) {
        let (old_id, new_id) = match change {
            ChangeDetached::Addition { id, entry_mode, .. } => {
                if entry_mode.is_tree() {
                    return (0, 0);
                }
                (None, Some(id))
            }
            ChangeDetached::Deletion { id, entry_mode, .. } => {
                if entry_mode.is_tree() {
                    return (0, 0);
                }
                (Some(id), None)
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() {
                    return (0, 0);
                }
                (Some(previous_id), Some(id))
            }
            ChangeDetached::Rewrite {
                source_id,
                id,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() {
                    return (0, 0);
                }
                (Some(source_id), Some(id))
            }
        };

        // Submodule entries point at commits that are not in this object
        // database; they count as empty.
        let old = old_id.and_then(|id| self.blob_data(id)).unwrap_or_default();
        let new = new_id.and_then(|id| self.blob_data(id)).unwrap_or_default();
        line_stats(&old, &new)
    }

    fn blob_data(&self, id: ObjectId) -> Option<Vec<u8>> {
        self.repo.find_object(id).ok().map(|obj| obj.data.clone())
    }
}

impl CommitSource for GitRepo {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn commits(&self, range: &DateRange) -> Result<Vec<CommitRecord>> {
        self.collect_commits(range)
    }
}

/// Inserted and deleted line counts between two blob contents, as
/// `git diff --numstat` reports them. Binary content counts as nothing.
pub fn line_stats(old: &[u8], new: &[u8]) -> (u64, u64) {
    if is_binary(old) || is_binary(new) {
        return (0, 0);
    }

    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(old_text.as_ref(), new_text.as_ref());

    let mut added = 0u64;
    let mut deleted = 0u64;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_PROBE_LEN).any(|&b| b == 0)
}

/// Calendar date of a commit in the time zone it was recorded in.
fn commit_date(time: gix::date::Time) -> Result<NaiveDate> {
    let offset = FixedOffset::east_opt(time.offset)
        .ok_or_else(|| GitplyError::InvalidDate(format!("Invalid offset: {}", time.offset)))?;
    let utc = DateTime::from_timestamp(time.seconds, 0)
        .ok_or_else(|| GitplyError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?;
    Ok(utc.with_timezone(&offset).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_file_counts_every_line() {
        assert_eq!(line_stats(b"", b"a\nb\nc\n"), (3, 0));
        assert_eq!(line_stats(b"a\nb\n", b""), (0, 2));
    }

    #[test]
    fn modified_line_is_one_insert_and_one_delete() {
        assert_eq!(line_stats(b"a\nb\nc\n", b"a\nB\nc\n"), (1, 1));
        assert_eq!(line_stats(b"a\nc\n", b"a\nb\nc\nd\n"), (2, 0));
    }

    #[test]
    fn binary_content_is_ignored() {
        assert_eq!(line_stats(b"", b"\x00\x01\x02\n"), (0, 0));
        assert_eq!(line_stats(b"text\n", b"te\x00xt\n"), (0, 0));
    }

    #[test]
    fn missing_repository_path_is_reported() {
        let err = GitRepo::open("/definitely/not/a/repo").err().unwrap();
        assert!(err.to_string().contains("/definitely/not/a/repo"));
    }
}
