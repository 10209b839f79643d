use crate::report::ReportKind;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitply")]
#[command(about = "Per-contributor commit statistics from git repositories or GitLab")]
#[command(version)]
pub struct Cli {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-v info, -vv debug)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    #[arg(
        long,
        value_name = "PATH",
        help = "User map file: one '<email> <name>' pair per line"
    )]
    pub users: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Write plots to this PDF, one page per contributor")]
    pub pdf: Option<PathBuf>,

    #[arg(long, help = "Print nothing on stdout (text or JSON)")]
    pub noprint: bool,

    #[arg(
        long,
        num_args = 2,
        value_names = ["URL", "TOKEN"],
        conflicts_with = "repos",
        help = "Read commits from every project visible on a GitLab server"
    )]
    pub gitlab: Option<Vec<String>>,

    #[arg(long, help = "Only count commits from this date on (YYYY-MM-DD, RFC3339, or e.g. 90days)")]
    pub since: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Treat this date as today")]
    pub today: Option<NaiveDate>,

    #[arg(long, help = "Output the report as JSON")]
    pub json: bool,

    #[arg(value_name = "REPO", help = "Git repositories to analyze (default: current directory)")]
    pub repos: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calendar mosaic of daily commits over the past year
    Mosaic {
        #[command(flatten)]
        args: ReportArgs,
    },
    /// Commits, insertions and deletions per ISO week over the whole history
    History {
        #[command(flatten)]
        args: ReportArgs,
    },
    /// Commits, insertions and deletions per day over the last week
    Weekly {
        #[command(flatten)]
        args: ReportArgs,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Mosaic { args } => crate::report::exec(ReportKind::Mosaic, args),
            Commands::History { args } => crate::report::exec(ReportKind::History, args),
            Commands::Weekly { args } => crate::report::exec(ReportKind::Weekly, args),
        }
    }
}
