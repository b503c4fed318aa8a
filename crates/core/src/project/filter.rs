//! Record filtering for exports and summaries.

use chrono::NaiveDate;

use projex_shared::types::UserId;

use super::record::{ProjectRecord, ProjectStatus};

/// Predicate over project records. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Accepted statuses; empty accepts all.
    pub statuses: Vec<ProjectStatus>,
    /// Only projects assigned to this executor.
    pub executor: Option<UserId>,
    /// Only projects of this client.
    pub client: Option<UserId>,
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    /// Earliest deadline, inclusive.
    pub deadline_from: Option<NaiveDate>,
    /// Latest deadline, inclusive.
    pub deadline_to: Option<NaiveDate>,
    /// Only open projects whose deadline is before this date.
    pub overdue_as_of: Option<NaiveDate>,
}

impl ProjectFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an accepted status.
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Restricts to one executor.
    #[must_use]
    pub const fn with_executor(mut self, executor: UserId) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Restricts to one client.
    #[must_use]
    pub const fn with_client(mut self, client: UserId) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the inclusive deadline range. Either end may be open.
    #[must_use]
    pub const fn with_deadline_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        self.deadline_from = from;
        self.deadline_to = to;
        self
    }

    /// Keeps only projects overdue as of `date`.
    #[must_use]
    pub const fn overdue_as_of(mut self, date: NaiveDate) -> Self {
        self.overdue_as_of = Some(date);
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if the record passes every configured condition.
    #[must_use]
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(record.status()) {
            return false;
        }
        if let Some(executor) = self.executor {
            if record.assigned_to().and_then(|p| p.id) != Some(executor) {
                return false;
            }
        }
        if let Some(client) = self.client {
            if record.client().and_then(|p| p.id) != Some(client) {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !record.name().to_lowercase().contains(&needle)
                && !record.description().to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.deadline_from.is_some() || self.deadline_to.is_some() {
            let Some(deadline) = record.deadline() else {
                return false;
            };
            if self.deadline_from.is_some_and(|from| deadline < from)
                || self.deadline_to.is_some_and(|to| deadline > to)
            {
                return false;
            }
        }
        if let Some(today) = self.overdue_as_of {
            let overdue = !record.status().is_closed()
                && record.deadline().is_some_and(|deadline| deadline < today);
            if !overdue {
                return false;
            }
        }
        true
    }

    /// Keeps the matching records, preserving order.
    #[must_use]
    pub fn apply(&self, records: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
