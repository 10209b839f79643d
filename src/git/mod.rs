mod repo;

pub use repo::{line_stats, GitRepo};
