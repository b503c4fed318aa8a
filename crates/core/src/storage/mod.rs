//! Delivery of export artifacts using Apache OpenDAL.
//!
//! Supported destinations:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Local filesystem (the default export directory)
//! - In-process memory
//!
//! ```text
//! ExportService ──► Artifact ──► ArtifactSink::deliver ──► op.write("key", bytes)
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{ArtifactSink, StorageService};
