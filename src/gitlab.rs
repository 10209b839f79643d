//! Commit records from every project visible to a GitLab access token.

use crate::error::{GitplyError, Result};
use crate::model::{CommitRecord, DateRange};
use crate::source::CommitSource;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

const PER_PAGE: &str = "100";

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub path_with_namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiCommit {
    id: String,
    author_email: String,
    created_at: String,
    #[serde(default)]
    stats: Option<ApiStats>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiStats {
    additions: u64,
    deletions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDiff {
    pub diff: String,
}

pub struct GitLabClient {
    http: Client,
    api: String,
    token: String,
}

impl GitLabClient {
    pub fn new(url: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gitply/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api: api_base(url),
            token: token.to_string(),
        })
    }

    pub fn projects(&self) -> Result<Vec<Project>> {
        self.get_pages("/projects", &[("simple", "true".to_string())])
    }

    fn project_commits(&self, project: &Project, range: &DateRange) -> Result<Vec<CommitRecord>> {
        let mut query = vec![
            ("all", "true".to_string()),
            ("with_stats", "true".to_string()),
        ];
        if let Some(since) = range.since {
            query.push(("since", format!("{}T00:00:00Z", since.format("%Y-%m-%d"))));
        }

        let path = format!("/projects/{}/repository/commits", project.id);
        let commits: Vec<ApiCommit> = self.get_pages(&path, &query)?;

        let mut records = Vec::with_capacity(commits.len());
        for commit in commits {
            let date = created_date(&commit.created_at)?;
            if !range.contains(&date) {
                continue;
            }

            let (insertions, deletions) = match &commit.stats {
                Some(stats) => (stats.additions, stats.deletions),
                None => diff_stat(&self.commit_diff(project, &commit.id)?),
            };

            records.push(CommitRecord {
                author_email: commit.author_email,
                date,
                insertions,
                deletions,
            });
        }
        Ok(records)
    }

    fn commit_diff(&self, project: &Project, sha: &str) -> Result<Vec<FileDiff>> {
        let path = format!("/projects/{}/repository/commits/{sha}/diff", project.id);
        self.get_pages(&path, &[])
    }

    /// GET a list endpoint, following `X-Next-Page` until it runs out.
    fn get_pages<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let url = format!("{}{path}", self.api);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            debug!(%url, page, "GET");
            let page_param = page.to_string();
            let response = self
                .http
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .query(query)
                .query(&[("per_page", PER_PAGE), ("page", page_param.as_str())])
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(GitplyError::GitLab {
                    status: status.as_u16(),
                    url,
                    body,
                });
            }

            let next = response
                .headers()
                .get("x-next-page")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());

            let mut batch: Vec<T> = response.json()?;
            items.append(&mut batch);

            match next {
                Some(n) if n > page => page = n,
                _ => break,
            }
        }

        Ok(items)
    }
}

impl CommitSource for GitLabClient {
    fn describe(&self) -> String {
        self.api.clone()
    }

    fn commits(&self, range: &DateRange) -> Result<Vec<CommitRecord>> {
        let projects = self.projects()?;
        info!(api = %self.api, projects = projects.len(), "listing GitLab commits");

        let mut records = Vec::new();
        for project in &projects {
            let mut commits = self.project_commits(project, range)?;
            debug!(project = %project.path_with_namespace, commits = commits.len(), "fetched");
            records.append(&mut commits);
        }
        Ok(records)
    }
}

/// Normalise a host URL to the v4 API root.
pub fn api_base(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if with_scheme.ends_with("/api/v4") {
        with_scheme
    } else {
        format!("{with_scheme}/api/v4")
    }
}

/// Count `+`/`-` lines in unified diffs, skipping `+++`/`---` file headers.
pub fn diff_stat(diffs: &[FileDiff]) -> (u64, u64) {
    let mut inserts = 0u64;
    let mut deletes = 0u64;
    for file_diff in diffs {
        for line in file_diff.diff.split('\n') {
            let bytes = line.as_bytes();
            if bytes.len() < 2 {
                continue;
            }
            match (bytes[0], bytes[1]) {
                (b'+', second) if second != b'+' => inserts += 1,
                (b'-', second) if second != b'-' => deletes += 1,
                _ => {}
            }
        }
    }
    (inserts, deletes)
}

fn created_date(created_at: &str) -> Result<NaiveDate> {
    let day = created_at.split('T').next().unwrap_or(created_at);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| GitplyError::InvalidDate(format!("'{created_at}': {e}")))
}
