//! Shared types, errors, configuration, and formatting for Projex.
//!
//! This crate provides common pieces used across all other crates:
//! - Typed IDs for backend entity references
//! - List envelopes for paginated backend responses
//! - The closed application error taxonomy
//! - Configuration management
//! - ru-RU money and date formatting

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::AppConfig;
pub use error::{ProjexError, ProjexResult};
