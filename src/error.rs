use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitplyError>;

#[derive(Error, Debug)]
pub enum GitplyError {
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed user map {}:{line}: {reason}", path.display())]
    UserMap {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitLab API error {status} for {url}: {body}")]
    GitLab {
        status: u16,
        url: String,
        body: String,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Signature date error: {0}")]
    SignatureDate(#[from] gix::date::parse::Error),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large; keep them boxed so `Result<T>` stays small.
impl From<gix::object::commit::Error> for GitplyError {
    fn from(err: gix::object::commit::Error) -> Self {
        GitplyError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GitplyError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitplyError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitplyError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitplyError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitplyError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitplyError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitplyError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitplyError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for GitplyError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        GitplyError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for GitplyError {
    fn from(err: gix::discover::Error) -> Self {
        GitplyError::GitDiscover(Box::new(err))
    }
}
