//! Report generation service.

use rust_decimal::Decimal;

use super::types::FinancialSummary;
use crate::project::{ProjectRecord, ProjectRow, ProjectStatus};

/// Service for aggregating project records into report figures.
pub struct ReportService;

impl ReportService {
    /// Computes the financial summary of a record collection.
    #[must_use]
    pub fn summarize(records: &[ProjectRecord]) -> FinancialSummary {
        let rows: Vec<ProjectRow> = records.iter().map(ProjectRow::from_record).collect();
        Self::summarize_rows(&rows)
    }

    /// Computes the financial summary from already mapped rows.
    ///
    /// Renderers call this with the rows they print so totals and per-project
    /// figures come from the same derivation.
    #[must_use]
    pub fn summarize_rows(rows: &[ProjectRow]) -> FinancialSummary {
        let mut summary = FinancialSummary {
            project_count: rows.len(),
            ..FinancialSummary::default()
        };

        for row in rows {
            let f = &row.financials;
            summary.total_cost = summary.total_cost.saturating_add(f.cost);
            summary.total_paid = summary.total_paid.saturating_add(f.paid);
            summary.total_remaining = summary.total_remaining.saturating_add(f.remaining);
            summary.total_executor_cost = summary.total_executor_cost.saturating_add(f.executor_cost);
            match row.status {
                ProjectStatus::Completed => summary.completed_count += 1,
                ProjectStatus::InProgress => summary.in_progress_count += 1,
                _ => {}
            }
        }

        summary.total_profit = summary.total_cost.saturating_sub(summary.total_executor_cost);

        // Quotients that do not fit a Decimal report as zero
        summary.average_cost = summary
            .total_cost
            .checked_div(Decimal::from(rows.len()))
            .map(|avg| avg.round_dp(2))
            .unwrap_or_default();

        summary.profit_margin_percent = summary
            .total_profit
            .checked_div(summary.total_cost)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|margin| margin.round_dp(2))
            .unwrap_or_default();

        summary
    }
}
