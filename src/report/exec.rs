use super::fetch::fetch_records;
use super::output::{output_json, output_text};
use super::{mosaic, weekly, HistoryReport, MosaicReport, Report, ReportKind, WeeklyReport};
use crate::cli::ReportArgs;
use crate::model::DateRange;
use crate::plot::write_pdf;
use crate::usermap::UserMap;
use crate::util::{expand_path, parse_since};
use anyhow::Context;
use chrono::Local;
use tracing::{info, warn};

pub fn exec(kind: ReportKind, args: ReportArgs) -> anyhow::Result<()> {
    let users = match &args.users {
        Some(path) => UserMap::load(path)
            .with_context(|| format!("Failed to load user map {}", path.display()))?,
        None => UserMap::Identity,
    };

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let range = match kind {
        ReportKind::History => match &args.since {
            Some(since) => DateRange::new()
                .with_since(parse_since(since, today).context("Failed to parse --since")?),
            None => DateRange::new(),
        },
        ReportKind::Weekly => weekly::window(today),
        ReportKind::Mosaic => mosaic::window(today),
    };
    if args.since.is_some() && kind != ReportKind::History {
        warn!(report = kind.name(), "--since only applies to the history report");
    }

    let records = fetch_records(&args, &range)?;
    info!(report = kind.name(), commits = records.len(), "building report");

    let report: Box<dyn Report> = match kind {
        ReportKind::History => Box::new(HistoryReport::build(&records, &users, range)),
        ReportKind::Weekly => Box::new(WeeklyReport::build(&records, &users, today)),
        ReportKind::Mosaic => Box::new(MosaicReport::build(&records, &users, today)),
    };

    if report.is_empty() {
        info!(report = kind.name(), "no commits in range");
    }

    if !args.noprint {
        if args.json {
            output_json(&report.to_json().context("Failed to serialize report")?);
        } else {
            output_text(&report.text_blocks());
        }
    }

    if let Some(pdf) = &args.pdf {
        let figures = report.figures();
        if figures.is_empty() {
            warn!(path = %pdf.display(), "nothing to plot, PDF not written");
        } else {
            let path = expand_path(pdf);
            write_pdf(&path, &figures)
                .with_context(|| format!("Failed to write PDF {}", path.display()))?;
            info!(path = %path.display(), pages = figures.len(), "wrote PDF");
        }
    }

    Ok(())
}
