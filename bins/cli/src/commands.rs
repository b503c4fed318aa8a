//! Command implementations.

use chrono::{Local, NaiveDate};
use tracing::info;

use projex_client::{FileSource, ProjectSource, ProjectsClient};
use projex_core::export::{ExportFormat, ExportRequest, ExportService};
use projex_core::project::ProjectRecord;
use projex_core::reports::{FinancialSummary, ReportService};
use projex_core::storage::{ArtifactSink, StorageConfig, StorageProvider, StorageService};
use projex_shared::format::{format_money, format_number};
use projex_shared::{AppConfig, ProjexError, ProjexResult};

use crate::cli::{Cli, Command, ExportArgs, FilterArgs, PrintArgs, SourceArgs, SummaryArgs};

/// Runs the parsed command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).map_err(ProjexError::from)?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Export(args) => export(&config, args, today).await?,
        Command::Print(args) => print(&config, args, today).await?,
        Command::Summary(args) => summary(&config, args, today).await?,
    }
    Ok(())
}

async fn export(config: &AppConfig, args: ExportArgs, today: NaiveDate) -> ProjexResult<()> {
    // Reject the format before any network traffic.
    let format: ExportFormat = args.format.parse()?;
    let records = load_projects(config, &args.source).await?;

    let request = ExportRequest::new(format, args.output).with_filter(args.filter.to_filter(today));
    let artifact = ExportService::new()
        .with_title(config.export.default_title.as_str())
        .export_request(records, &request)?;

    let location = sink(config, &args.source)?.deliver(&artifact).await?;
    println!("{location}");
    Ok(())
}

async fn print(config: &AppConfig, args: PrintArgs, today: NaiveDate) -> ProjexResult<()> {
    let records = selected_projects(config, &args.source, &args.filter, today).await?;
    let title = args
        .title
        .as_deref()
        .unwrap_or(config.export.default_title.as_str());

    let artifact = ExportService::new().print(&records, title);

    let location = sink(config, &args.source)?.deliver(&artifact).await?;
    println!("{location}");
    Ok(())
}

async fn summary(config: &AppConfig, args: SummaryArgs, today: NaiveDate) -> ProjexResult<()> {
    let records = selected_projects(config, &args.source, &args.filter, today).await?;
    let summary = ReportService::summarize(&records);

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| ProjexError::validation("summary", e.to_string()))?;
        println!("{json}");
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

async fn selected_projects(
    config: &AppConfig,
    source: &SourceArgs,
    filter: &FilterArgs,
    today: NaiveDate,
) -> ProjexResult<Vec<ProjectRecord>> {
    let records = load_projects(config, source).await?;
    let total = records.len();
    let selected = filter.to_filter(today).apply(records);
    info!(total, selected = selected.len(), "selected projects");
    Ok(selected)
}

async fn load_projects(config: &AppConfig, source: &SourceArgs) -> ProjexResult<Vec<ProjectRecord>> {
    let source: Box<dyn ProjectSource> = match &source.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(ProjectsClient::new(config.api()?)?),
    };
    source.fetch_projects().await
}

fn sink(config: &AppConfig, source: &SourceArgs) -> ProjexResult<StorageService> {
    Ok(StorageService::from_config(storage_config(config, source))?)
}

/// Chooses where artifacts go: `--output-dir`, then the S3 bucket, then `export.output_dir`.
fn storage_config(config: &AppConfig, source: &SourceArgs) -> StorageConfig {
    let provider = match (&source.output_dir, &config.export.s3) {
        (Some(dir), _) => StorageProvider::local_fs(dir),
        (None, Some(s3)) => StorageProvider::s3(
            &s3.endpoint,
            &s3.bucket,
            &s3.access_key_id,
            &s3.secret_access_key,
            &s3.region,
        ),
        (None, None) => StorageProvider::local_fs(&config.export.output_dir),
    };
    StorageConfig::new(provider).with_prefix(config.export.prefix.as_str())
}

fn render_summary(summary: &FinancialSummary) -> String {
    let lines = [
        format!("Всего проектов: {}", summary.project_count),
        format!("Завершено: {}", summary.completed_count),
        format!("В работе: {}", summary.in_progress_count),
        format!("Общая стоимость: {}", format_money(summary.total_cost)),
        format!("Оплачено: {}", format_money(summary.total_paid)),
        format!("Остаток к оплате: {}", format_money(summary.total_remaining)),
        format!(
            "Расходы на исполнителей: {}",
            format_money(summary.total_executor_cost)
        ),
        format!("Прибыль: {}", format_money(summary.total_profit)),
        format!("Средняя стоимость: {}", format_money(summary.average_cost)),
        format!(
            "Рентабельность: {}%",
            format_number(summary.profit_margin_percent)
        ),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
