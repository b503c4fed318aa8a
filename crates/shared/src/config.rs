//! Application configuration management.
//!
//! Backend location and credentials live here and nowhere else; the client
//! receives them once at start-up.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ProjexError, ProjexResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// REST backend configuration. Absent when projects are read from files only.
    #[serde(default)]
    pub api: Option<ApiConfig>,
    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// REST backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, without trailing slash (e.g. `https://crm.example.com`).
    pub base_url: String,
    /// HTTP Basic username.
    #[serde(default)]
    pub username: Option<String>,
    /// HTTP Basic password.
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size requested from paginated endpoints.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    100
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory artifacts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Title used for print and text reports when none is given.
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Key prefix applied to every delivered artifact.
    #[serde(default)]
    pub prefix: String,
    /// S3-compatible bucket. When set, artifacts go there instead of `output_dir`.
    #[serde(default)]
    pub s3: Option<S3Settings>,
}

/// S3-compatible bucket settings (Cloudflare R2, Supabase, AWS S3).
#[derive(Debug, Clone, Deserialize)]
pub struct S3Settings {
    /// Endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region (`auto` for R2).
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./exports")
}

fn default_title() -> String {
    "Отчет по проектам".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_title: default_title(),
            prefix: String::new(),
            s3: None,
        }
    }
}

impl ApiConfig {
    /// Returns the base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns Basic credentials when a username is configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }
}

impl AppConfig {
    /// Returns the backend configuration.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no `api.base_url` was configured.
    pub fn api(&self) -> ProjexResult<&ApiConfig> {
        self.api.as_ref().ok_or_else(|| {
            ProjexError::Configuration(
                "api.base_url is not set (PROJEX__API__BASE_URL or config file)".to_string(),
            )
        })
    }

    /// Loads configuration from environment and config files.
    ///
    /// Sources, later overriding earlier: `config/default`, `config/{RUN_MODE}`,
    /// the optional explicit file, then `PROJEX__`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load(explicit: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(explicit, None)
    }

    /// Same as [`AppConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    fn load_with_env(
        explicit: Option<&str>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("PROJEX")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_load_from_environment() {
        let config = AppConfig::load_with_env(
            None,
            env(&[
                ("PROJEX__API__BASE_URL", "https://crm.example.com/"),
                ("PROJEX__API__USERNAME", "admin"),
                ("PROJEX__API__PASSWORD", "secret"),
            ]),
        )
        .unwrap();

        let api = config.api().unwrap();
        assert_eq!(api.base_url(), "https://crm.example.com");
        assert_eq!(api.credentials(), Some(("admin", Some("secret"))));
        assert_eq!(api.timeout_secs, 30);
        assert_eq!(api.page_size, 100);
        assert_eq!(config.export.output_dir, PathBuf::from("./exports"));
        assert_eq!(config.export.default_title, "Отчет по проектам");
        assert!(config.export.s3.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projex.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://localhost:8000"
timeout_secs = 10

[export]
output_dir = "/var/reports"
"#,
        )
        .unwrap();

        let config = AppConfig::load_with_env(
            path.to_str(),
            env(&[
                ("PROJEX__API__TIMEOUT_SECS", "5"),
                ("PROJEX__EXPORT__OUTPUT_DIR", "/tmp/reports"),
            ]),
        )
        .unwrap();

        let api = config.api().unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.timeout_secs, 5);
        assert_eq!(api.credentials(), None);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_missing_api_section_is_reported_on_use() {
        let config = AppConfig::load_with_env(None, env(&[])).unwrap();

        let err = config.api().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_partial_api_section_is_an_error() {
        let result = AppConfig::load_with_env(None, env(&[("PROJEX__API__USERNAME", "admin")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_s3_settings_from_environment() {
        let config = AppConfig::load_with_env(
            None,
            env(&[
                ("PROJEX__EXPORT__S3__ENDPOINT", "https://r2.example.com"),
                ("PROJEX__EXPORT__S3__BUCKET", "reports"),
                ("PROJEX__EXPORT__S3__ACCESS_KEY_ID", "key"),
                ("PROJEX__EXPORT__S3__SECRET_ACCESS_KEY", "secret"),
            ]),
        )
        .unwrap();

        let s3 = config.export.s3.unwrap();
        assert_eq!(s3.bucket, "reports");
        assert_eq!(s3.region, "auto");
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(AppConfig::load_with_env(missing.to_str(), env(&[])).is_err());
    }
}
