//! Export formats, requests, and produced artifacts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use projex_shared::ProjexError;

use crate::project::ProjectFilter;

/// Output representation requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with BOM.
    Csv,
    /// Spreadsheet export; same bytes as CSV.
    Excel,
    /// Pretty-printed source records.
    Json,
    /// Plain-text report standing in for a PDF.
    Pdf,
}

impl ExportFormat {
    /// All supported formats.
    pub const ALL: [Self; 4] = [Self::Csv, Self::Excel, Self::Json, Self::Pdf];

    /// File extension (without dot) of the produced artifact.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv | Self::Excel => "csv",
            Self::Json => "json",
            Self::Pdf => "txt",
        }
    }

    /// MIME type of the produced artifact.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv | Self::Excel => "text/csv; charset=utf-8",
            Self::Json => "application/json",
            Self::Pdf => "text/plain; charset=utf-8",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Excel => write!(f, "excel"),
            Self::Json => write!(f, "json"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ProjexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xls" | "xlsx" => Ok(Self::Excel),
            "json" => Ok(Self::Json),
            "pdf" => Ok(Self::Pdf),
            _ => {
                warn!(format = s, "rejected unsupported export format");
                Err(ProjexError::unsupported_format(s))
            }
        }
    }
}

/// One export action: format, target filename, and record filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Output format.
    pub format: ExportFormat,
    /// Target filename; the format's extension is appended when missing.
    pub filename: String,
    /// Records to include.
    pub filter: ProjectFilter,
}

impl ExportRequest {
    /// Creates a request exporting every record.
    #[must_use]
    pub fn new(format: ExportFormat, filename: impl Into<String>) -> Self {
        Self {
            format,
            filename: filename.into(),
            filter: ProjectFilter::default(),
        }
    }

    /// Sets the record filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ProjectFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// A serialized, ready-to-deliver file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Sanitized filename with extension.
    pub filename: String,
    /// MIME type.
    pub content_type: &'static str,
    /// File content.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Content as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Never fails for artifacts produced by the export service.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }
}

/// Builds a safe filename and appends `extension` unless already present.
///
/// Path separators and control characters become `_`; an empty stem becomes
/// `export`.
#[must_use]
pub fn artifact_filename(requested: &str, extension: &str) -> String {
    let sanitized: String = requested
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_matches(|c| c == '.' || c == ' ');
    let stem = if sanitized.is_empty() { "export" } else { sanitized };

    let suffix = format!(".{extension}");
    if stem.to_lowercase().ends_with(&suffix) {
        stem.to_string()
    } else {
        format!("{stem}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("CSV", ExportFormat::Csv)]
    #[case("excel", ExportFormat::Excel)]
    #[case("xlsx", ExportFormat::Excel)]
    #[case(" json ", ExportFormat::Json)]
    #[case("pdf", ExportFormat::Pdf)]
    fn test_parse_format(#[case] raw: &str, #[case] expected: ExportFormat) {
        assert_eq!(raw.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_unrecognized_format_is_an_error() {
        let err = "docx".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(
            err,
            ProjexError::UnsupportedFormat { ref format } if format == "docx"
        ));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Excel.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Pdf.extension(), "txt");
    }

    #[test]
    fn test_display_round_trips() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[rstest]
    #[case("projects", "csv", "projects.csv")]
    #[case("projects.CSV", "csv", "projects.CSV")]
    #[case("Отчет по проектам", "html", "Отчет по проектам.html")]
    #[case("../../etc/passwd", "txt", "_.._etc_passwd.txt")]
    #[case("", "json", "export.json")]
    #[case("  ...  ", "json", "export.json")]
    fn test_artifact_filename(#[case] requested: &str, #[case] ext: &str, #[case] expected: &str) {
        assert_eq!(artifact_filename(requested, ext), expected);
    }
}
