//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate financial statistics over a record collection.
///
/// Derived on every report; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Number of projects.
    pub project_count: usize,
    /// Projects with status `completed`.
    pub completed_count: usize,
    /// Projects with status `in_progress`.
    pub in_progress_count: usize,
    /// Sum of effective project costs.
    pub total_cost: Decimal,
    /// Sum paid by clients.
    pub total_paid: Decimal,
    /// Sum still owed by clients (`total_cost - total_paid`).
    pub total_remaining: Decimal,
    /// Sum owed to executors.
    pub total_executor_cost: Decimal,
    /// `total_cost - total_executor_cost`.
    pub total_profit: Decimal,
    /// Mean project cost, rounded to 2 dp (zero for an empty collection).
    pub average_cost: Decimal,
    /// `total_profit / total_cost * 100`, rounded to 2 dp (zero when cost is zero).
    pub profit_margin_percent: Decimal,
}
