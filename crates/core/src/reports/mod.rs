//! Financial report aggregation.
//!
//! This module provides pure business logic for report figures:
//! - Totals of cost, paid, remaining, executor cost and profit
//! - Status counts, average cost and profit margin

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::FinancialSummary;
