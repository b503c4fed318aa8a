//! Project records and their display rows.
//!
//! - `record` - lenient parsing of backend project objects
//! - `row` - the record-to-row mapper and derived financials
//! - `filter` - export/summary filtering

pub mod filter;
pub mod record;
pub mod row;

#[cfg(test)]
mod tests;

pub use filter::ProjectFilter;
pub use record::{MAX_AMOUNT, PersonRef, ProjectRecord, ProjectStatus};
pub use row::{COLUMN_HEADERS, Cell, Financials, NOT_SPECIFIED, ProjectRow};
