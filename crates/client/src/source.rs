//! The `ProjectSource` seam and the local file source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use projex_core::project::ProjectRecord;
use projex_shared::types::ListResponse;
use projex_shared::{ProjexError, ProjexResult};

/// Anything that can supply the project collection.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetches every project record.
    async fn fetch_projects(&self) -> ProjexResult<Vec<ProjectRecord>>;
}

/// Decodes one response body: a bare array or a page envelope.
///
/// Returns the parsed records and the next-page link, if any.
///
/// # Errors
///
/// Returns `ValidationFailure` if the body is not valid JSON of either shape.
pub fn decode_page(body: &[u8]) -> ProjexResult<(Vec<ProjectRecord>, Option<String>)> {
    let response: ListResponse<Value> = serde_json::from_slice(body)
        .map_err(|e| ProjexError::validation("projects", e.to_string()))?;
    let (items, next) = response.into_parts();
    let records = items
        .into_iter()
        .map(ProjectRecord::from_value)
        .collect::<ProjexResult<Vec<_>>>()?;
    Ok((records, next))
}

/// Reads projects from a JSON file exported earlier or saved from the API.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProjectSource for FileSource {
    async fn fetch_projects(&self) -> ProjexResult<Vec<ProjectRecord>> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            ProjexError::validation("input", format!("{}: {e}", self.path.display()))
        })?;
        let (records, _) = decode_page(&body)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded projects from file");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#, 2, None)]
    #[case(
        r#"{"count": 3, "next": "http://crm/admin/api/projects/?page=2", "previous": null, "results": [{"id": 1}]}"#,
        1,
        Some("http://crm/admin/api/projects/?page=2")
    )]
    #[case(r#"{"results": [], "next": null}"#, 0, None)]
    #[case(r#"{"results": [], "next": ""}"#, 0, None)]
    fn test_decode_page(#[case] body: &str, #[case] count: usize, #[case] next: Option<&str>) {
        let (records, link) = decode_page(body.as_bytes()).unwrap();
        assert_eq!(records.len(), count);
        assert_eq!(link.as_deref(), next);
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"detail": "Authentication credentials were not provided."}"#)]
    #[case("[1, 2]")]
    fn test_decode_page_rejects_malformed(#[case] body: &str) {
        let err = decode_page(body.as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILURE");
    }

    #[tokio::test]
    async fn test_file_source_reads_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(
            &path,
            r#"[{"id": 7, "name": "Сайт", "status": "in_progress", "project_cost": "1500.00"}]"#,
        )
        .unwrap();

        let records = FileSource::new(&path).fetch_projects().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id().into_inner(), 7);
        assert_eq!(records[0].name(), "Сайт");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("absent.json"))
            .fetch_projects()
            .await
            .unwrap_err();
        assert!(matches!(err, ProjexError::ValidationFailure { ref field, .. } if field == "input"));
    }
}
