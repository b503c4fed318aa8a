//! Paginated list envelopes returned by the REST backend.

use serde::{Deserialize, Serialize};

/// A list endpoint response: either a bare array or a page envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// Unpaginated response.
    Plain(Vec<T>),
    /// Paginated response with a link to the next page.
    Page(PageEnvelope<T>),
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    /// Total number of items across all pages, when reported.
    #[serde(default)]
    pub count: Option<u64>,
    /// Absolute URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Absolute URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Splits the response into its items and the next-page link.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            Self::Page(page) => (page.results, page.next.filter(|next| !next.is_empty())),
            Self::Plain(items) => (items, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_array() {
        let response: ListResponse<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(response.into_parts(), (vec![1, 2, 3], None));
    }

    #[test]
    fn test_page_envelope() {
        let response: ListResponse<u32> = serde_json::from_str(
            r#"{"count": 3, "next": "http://api/projects/?page=2", "previous": null, "results": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_parts(),
            (vec![1, 2], Some("http://api/projects/?page=2".to_string()))
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let response: ListResponse<u32> =
            serde_json::from_str(r#"{"next": null, "results": [5]}"#).unwrap();
        assert_eq!(response.into_parts(), (vec![5], None));
    }
}
