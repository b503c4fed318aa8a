//! Record-to-row mapping shared by every export format.
//!
//! `remaining` and `profit` are derived here and only here; CSV, text and
//! print renderers as well as the aggregate statistics read them from
//! [`Financials`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use projex_shared::format::format_date;
use projex_shared::types::ProjectId;

use super::record::{ProjectRecord, ProjectStatus};

/// Display text for a missing relation.
pub const NOT_SPECIFIED: &str = "Не указан";

/// Column headers in row order.
pub const COLUMN_HEADERS: [&str; 12] = [
    "ID",
    "Название",
    "Статус",
    "Стоимость",
    "Оплачено",
    "Остаток",
    "Стоимость исполнителя",
    "Прибыль",
    "Исполнитель",
    "Клиент",
    "Дедлайн",
    "Создан",
];

/// Money figures of one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Financials {
    /// Effective project cost.
    pub cost: Decimal,
    /// Paid by the client.
    pub paid: Decimal,
    /// `cost - paid`.
    pub remaining: Decimal,
    /// Owed to the executor.
    pub executor_cost: Decimal,
    /// `cost - executor_cost`.
    pub profit: Decimal,
}

impl Financials {
    /// Derives the figures for a record.
    #[must_use]
    pub fn of(record: &ProjectRecord) -> Self {
        let cost = record.cost();
        let paid = record.paid_total();
        let executor_cost = record.executor_cost();
        Self {
            cost,
            paid,
            remaining: cost.saturating_sub(paid),
            executor_cost,
            profit: cost.saturating_sub(executor_cost),
        }
    }
}

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Numeric value, written unquoted.
    Number(Decimal),
    /// Text value, written quoted.
    Text(String),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Flat display row for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    /// Project ID.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Derived money figures.
    pub financials: Financials,
    /// Executor display name.
    pub executor: Option<String>,
    /// Client display name.
    pub client: Option<String>,
    /// Deadline.
    pub deadline: Option<NaiveDate>,
    /// Creation date.
    pub created_at: Option<NaiveDate>,
    /// Free-text description.
    pub description: String,
}

impl ProjectRow {
    /// Maps a record to its display row. Never fails.
    #[must_use]
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
            status: record.status().clone(),
            financials: Financials::of(record),
            executor: record.assigned_to().map(super::record::PersonRef::display_name),
            client: record.client().map(super::record::PersonRef::display_name),
            deadline: record.deadline(),
            created_at: record.created_at(),
            description: record.description().to_string(),
        }
    }

    /// Executor name, or [`NOT_SPECIFIED`].
    #[must_use]
    pub fn executor_name(&self) -> &str {
        self.executor.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// Client name, or [`NOT_SPECIFIED`].
    #[must_use]
    pub fn client_name(&self) -> &str {
        self.client.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// Cells in [`COLUMN_HEADERS`] order.
    #[must_use]
    pub fn cells(&self) -> [Cell; 12] {
        let f = &self.financials;
        [
            Cell::Number(Decimal::from(self.id.into_inner())),
            Cell::Text(self.name.clone()),
            Cell::Text(self.status.label().to_string()),
            Cell::Number(f.cost),
            Cell::Number(f.paid),
            Cell::Number(f.remaining),
            Cell::Number(f.executor_cost),
            Cell::Number(f.profit),
            Cell::Text(self.executor_name().to_string()),
            Cell::Text(self.client_name().to_string()),
            Cell::Text(self.deadline.map(format_date).unwrap_or_default()),
            Cell::Text(self.created_at.map(format_date).unwrap_or_default()),
        ]
    }
}

impl From<&ProjectRecord> for ProjectRow {
    fn from(record: &ProjectRecord) -> Self {
        Self::from_record(record)
    }
}
