//! Application-wide error types.
//!
//! Every failure the report pipeline can surface belongs to one closed set of
//! kinds. Library code carries structured context; the text shown to an
//! operator is produced by [`ProjexError::user_message`] at the presentation
//! boundary only.

use thiserror::Error;

/// Result type alias using `ProjexError`.
pub type ProjexResult<T> = Result<T, ProjexError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum ProjexError {
    /// The REST backend could not be reached or answered with a non-2xx status.
    #[error("Network failure for {url}: {message}")]
    NetworkFailure {
        /// Requested URL.
        url: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Transport or server detail.
        message: String,
    },

    /// Input data or operator input is malformed.
    #[error("Validation failed for `{field}`: {message}")]
    ValidationFailure {
        /// Offending field or input name.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Requested export format is not one of csv, excel, json, pdf.
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat {
        /// Format string as received.
        format: String,
    },

    /// Artifact could not be written to the configured storage.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProjexError {
    /// Creates a network failure without an HTTP status.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Creates a network failure for a non-2xx response.
    #[must_use]
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::NetworkFailure {
            url: url.into(),
            status: Some(status),
            message: format!("server responded with status {status}"),
        }
    }

    /// Creates a validation failure.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    #[must_use]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Returns the stable error code for logs and machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } => "NETWORK_FAILURE",
            Self::ValidationFailure { .. } => "VALIDATION_FAILURE",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Returns the process exit code used by the command-line front-end.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::ValidationFailure { .. } | Self::UnsupportedFormat { .. } => 3,
            Self::NetworkFailure { .. } => 4,
            Self::Storage(_) => 5,
        }
    }

    /// Returns the operator-facing message (Russian).
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkFailure {
                status: Some(status),
                ..
            } => format!("Ошибка загрузки данных: сервер вернул статус {status}"),
            Self::NetworkFailure { status: None, .. } => {
                "Ошибка загрузки данных: сервер недоступен".to_string()
            }
            Self::ValidationFailure { field, message } => {
                format!("Некорректные данные в поле «{field}»: {message}")
            }
            Self::UnsupportedFormat { format } => {
                format!("Неподдерживаемый формат экспорта: {format}")
            }
            Self::Storage(_) => "Не удалось сохранить файл".to_string(),
            Self::Configuration(message) => format!("Ошибка конфигурации: {message}"),
        }
    }
}

impl From<config::ConfigError> for ProjexError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
