use crate::cli::ReportArgs;
use crate::git::GitRepo;
use crate::gitlab::GitLabClient;
use crate::model::{CommitRecord, DateRange};
use crate::source::CommitSource;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

/// Build the commit sources the arguments ask for: GitLab when `--gitlab` is
/// given, otherwise each repository path in order (the current directory if
/// none).
pub fn sources(args: &ReportArgs) -> anyhow::Result<Vec<Box<dyn CommitSource>>> {
    if let Some(gitlab) = &args.gitlab {
        let [url, token] = gitlab.as_slice() else {
            anyhow::bail!("--gitlab expects a URL and a token");
        };
        let client = GitLabClient::new(url, token).context("Failed to create GitLab client")?;
        return Ok(vec![Box::new(client)]);
    }

    let repos = if args.repos.is_empty() {
        vec![std::env::current_dir().context("Failed to read current directory")?]
    } else {
        args.repos.clone()
    };

    repos
        .into_iter()
        .map(|path: PathBuf| -> anyhow::Result<Box<dyn CommitSource>> {
            let repo = GitRepo::open(&path)
                .with_context(|| format!("Failed to open git repository at {}", path.display()))?;
            Ok(Box::new(repo))
        })
        .collect()
}

pub fn fetch_records(args: &ReportArgs, range: &DateRange) -> anyhow::Result<Vec<CommitRecord>> {
    let mut records = Vec::new();
    for source in sources(args)? {
        let mut commits = source
            .commits(range)
            .with_context(|| format!("Failed to collect commits from {}", source.describe()))?;
        info!(source = %source.describe(), commits = commits.len(), "collected");
        records.append(&mut commits);
    }
    Ok(records)
}
