//! Format dispatch: records in, artifact out.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use projex_shared::{ProjexError, ProjexResult};

use super::csv::render_csv;
use super::format::{Artifact, ExportFormat, ExportRequest, artifact_filename};
use super::html::render_html;
use super::json::render_json;
use super::text::render_text;
use crate::project::{ProjectRecord, ProjectRow};
use crate::reports::ReportService;

/// Title used by the text report when exporting.
pub const DEFAULT_TITLE: &str = "Отчет по проектам";

/// Serializes record collections into downloadable artifacts.
#[derive(Debug, Clone)]
pub struct ExportService {
    title: String,
    generated_at: Option<NaiveDateTime>,
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportService {
    /// Creates a service stamping reports with the current local time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            generated_at: None,
        }
    }

    /// Sets the title of text reports.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Fixes the generation timestamp printed in reports.
    #[must_use]
    pub const fn with_generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Serializes `records` in `format` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if the records cannot be serialized to JSON.
    pub fn export(
        &self,
        records: &[ProjectRecord],
        format: ExportFormat,
        filename: &str,
    ) -> ProjexResult<Artifact> {
        debug!(%format, count = records.len(), filename, "exporting projects");

        let content = match format {
            ExportFormat::Csv | ExportFormat::Excel => render_csv(&Self::rows(records)),
            ExportFormat::Json => render_json(records)
                .map_err(|e| ProjexError::validation("projects", e.to_string()))?,
            ExportFormat::Pdf => {
                let rows = Self::rows(records);
                let summary = ReportService::summarize_rows(&rows);
                render_text(&self.title, &rows, &summary, self.timestamp())
            }
        };

        Ok(Artifact {
            filename: artifact_filename(filename, format.extension()),
            content_type: format.content_type(),
            bytes: content.into_bytes(),
        })
    }

    /// Applies the request's filter, then exports.
    ///
    /// # Errors
    ///
    /// See [`ExportService::export`].
    pub fn export_request(
        &self,
        records: Vec<ProjectRecord>,
        request: &ExportRequest,
    ) -> ProjexResult<Artifact> {
        let total = records.len();
        let selected = request.filter.apply(records);
        debug!(total, selected = selected.len(), "applied export filter");
        self.export(&selected, request.format, &request.filename)
    }

    /// Builds the print-ready HTML document for `records`.
    #[must_use]
    pub fn print(&self, records: &[ProjectRecord], title: &str) -> Artifact {
        debug!(count = records.len(), title, "rendering print view");

        let rows = Self::rows(records);
        let summary = ReportService::summarize_rows(&rows);
        let html = render_html(title, &rows, &summary, self.timestamp());

        Artifact {
            filename: artifact_filename(title, "html"),
            content_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        }
    }

    fn rows(records: &[ProjectRecord]) -> Vec<ProjectRow> {
        records.iter().map(ProjectRow::from_record).collect()
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.generated_at
            .unwrap_or_else(|| Local::now().naive_local())
    }
}
