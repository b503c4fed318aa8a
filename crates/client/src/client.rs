//! REST client for the CRM projects endpoint.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use projex_core::project::ProjectRecord;
use projex_shared::config::ApiConfig;
use projex_shared::{ProjexError, ProjexResult};

use crate::source::{ProjectSource, decode_page};

/// Path of the projects list endpoint, relative to the base URL.
pub const PROJECTS_PATH: &str = "/admin/api/projects/";

/// Fetches projects from the backend with HTTP Basic credentials.
///
/// Follows `next` links until the last page. A failed request is returned as
/// an error; there is no retry and no substitute data.
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    client: Client,
    base_url: String,
    credentials: Option<(String, Option<String>)>,
    page_size: u32,
}

impl ProjectsClient {
    /// Creates a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ProjexResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("projex/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProjexError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            credentials: config
                .credentials()
                .map(|(user, password)| (user.to_string(), password.map(str::to_string))),
            page_size: config.page_size,
        })
    }

    /// URL of the first page.
    #[must_use]
    pub fn projects_url(&self) -> String {
        format!("{}{PROJECTS_PATH}?page_size={}", self.base_url, self.page_size)
    }

    async fn fetch_page(&self, url: &str) -> ProjexResult<(Vec<ProjectRecord>, Option<String>)> {
        let mut request = self.client.get(url);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_deref());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProjexError::network(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProjexError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProjexError::network(url, e.to_string()))?;
        debug!(url, bytes = body.len(), "received projects page");

        decode_page(&body)
    }
}

#[async_trait]
impl ProjectSource for ProjectsClient {
    async fn fetch_projects(&self) -> ProjexResult<Vec<ProjectRecord>> {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.projects_url());

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                return Err(ProjexError::validation(
                    "next",
                    format!("pagination loops back to {url}"),
                ));
            }
            let (page, link) = self.fetch_page(&url).await?;
            records.extend(page);
            next = link;
        }

        info!(count = records.len(), pages = visited.len(), "fetched projects");
        Ok(records)
    }
}
