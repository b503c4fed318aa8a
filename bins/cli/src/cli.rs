//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use projex_core::project::{ProjectFilter, ProjectStatus};
use projex_shared::format::parse_date;
use projex_shared::types::UserId;

#[derive(Debug, Parser)]
#[command(
    name = "projex",
    version,
    about = "Project reports from the CRM backend",
    long_about = "Fetches projects from the CRM REST backend and turns them into CSV, \
                  JSON, text, or printable HTML reports with financial totals."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file layered over config/default and config/{RUN_MODE}
    #[arg(long, global = true, env = "PROJEX_CONFIG", value_name = "PATH")]
    pub config: Option<String>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "projex=info",
            1 => "projex=debug",
            _ => "projex=trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export projects as csv, excel, json, or pdf
    Export(ExportArgs),

    /// Build a printable HTML report
    Print(PrintArgs),

    /// Show financial totals
    Summary(SummaryArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export format: csv, excel, json, pdf
    #[arg(short, long)]
    pub format: String,

    /// Artifact name; the format's extension is appended when missing
    #[arg(short, long, default_value = "projects")]
    pub output: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Report title (defaults to export.default_title)
    #[arg(short, long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Read projects from a JSON file instead of the backend
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write artifacts here instead of export.output_dir
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Keep projects in this status (repeatable): new, review, accepted,
    /// in_progress, testing, completed, cancelled, on_hold
    #[arg(long = "status", value_parser = status_arg, value_name = "STATUS")]
    pub statuses: Vec<ProjectStatus>,

    /// Keep projects assigned to this executor ID
    #[arg(long, value_name = "ID")]
    pub executor: Option<UserId>,

    /// Keep projects of this client ID
    #[arg(long, value_name = "ID")]
    pub client: Option<UserId>,

    /// Case-insensitive text in name or description
    #[arg(long)]
    pub search: Option<String>,

    /// Earliest deadline, YYYY-MM-DD
    #[arg(long, value_parser = date_arg, value_name = "DATE")]
    pub deadline_from: Option<NaiveDate>,

    /// Latest deadline, YYYY-MM-DD
    #[arg(long, value_parser = date_arg, value_name = "DATE")]
    pub deadline_to: Option<NaiveDate>,

    /// Keep only open projects past their deadline
    #[arg(long)]
    pub overdue: bool,
}

impl FilterArgs {
    /// Builds the record filter; `today` anchors `--overdue`.
    pub fn to_filter(&self, today: NaiveDate) -> ProjectFilter {
        let mut filter = self
            .statuses
            .iter()
            .cloned()
            .fold(ProjectFilter::new(), ProjectFilter::with_status)
            .with_deadline_range(self.deadline_from, self.deadline_to);
        if let Some(executor) = self.executor {
            filter = filter.with_executor(executor);
        }
        if let Some(client) = self.client {
            filter = filter.with_client(client);
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            filter = filter.with_search(search);
        }
        if self.overdue {
            filter = filter.overdue_as_of(today);
        }
        filter
    }
}

/// Accepts only known status codes; backend data stays lenient.
fn status_arg(raw: &str) -> Result<ProjectStatus, String> {
    let status = ProjectStatus::parse(raw);
    if ProjectStatus::KNOWN.contains(&status) {
        return Ok(status);
    }
    let known: Vec<String> = ProjectStatus::KNOWN
        .iter()
        .map(|candidate| candidate.code().to_string())
        .collect();
    Err(format!("expected one of {}, got `{raw}`", known.join(", ")))
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got `{raw}`"))
}
