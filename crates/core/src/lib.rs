//! Core logic for Projex.
//!
//! This crate turns project records fetched from the CRM backend into report
//! artifacts. It has ZERO HTTP dependencies; records come in, bytes go out.
//!
//! # Modules
//!
//! - `project` - Project records, lenient parsing, row mapping, filtering
//! - `reports` - Financial summary aggregation
//! - `export` - CSV, JSON, text, and printable HTML renderers
//! - `storage` - Artifact delivery through OpenDAL

pub mod export;
pub mod project;
pub mod reports;
pub mod storage;
