//! Project records as returned by the REST backend.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use projex_shared::format::parse_date;
use projex_shared::types::{ProjectId, UserId};
use projex_shared::{ProjexError, ProjexResult};

/// Project lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    /// Newly submitted.
    New,
    /// Under review.
    Review,
    /// Accepted for work.
    Accepted,
    /// Work in progress.
    InProgress,
    /// In testing.
    Testing,
    /// Finished.
    Completed,
    /// Cancelled.
    Cancelled,
    /// Paused.
    OnHold,
    /// Any status the backend sends that is not known here, kept verbatim.
    Unknown(String),
}

impl ProjectStatus {
    /// All known statuses in lifecycle order.
    pub const KNOWN: [Self; 8] = [
        Self::New,
        Self::Review,
        Self::Accepted,
        Self::InProgress,
        Self::Testing,
        Self::Completed,
        Self::Cancelled,
        Self::OnHold,
    ];

    /// Parses a backend status code. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "new" => Self::New,
            "review" => Self::Review,
            "accepted" => Self::Accepted,
            "in_progress" => Self::InProgress,
            "testing" => Self::Testing,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "on_hold" => Self::OnHold,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Returns the backend status code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Review => "review",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Testing => "testing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::OnHold => "on_hold",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns the operator-facing label (Russian).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::New => "Новый",
            Self::Review => "На рассмотрении",
            Self::Accepted => "Принят",
            Self::InProgress => "В работе",
            Self::Testing => "Тестирование",
            Self::Completed => "Завершен",
            Self::Cancelled => "Отменен",
            Self::OnHold => "Приостановлен",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns true when no further work or payment is expected.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProjectStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Reference to a backend user (executor or client).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRef {
    /// User ID.
    pub id: Option<UserId>,
    /// Login name.
    pub username: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl PersonRef {
    /// Parses a relation that is either a nested user object or a bare ID.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                id: map.get("id").and_then(int_value).map(UserId::new),
                username: text(map, "username"),
                first_name: text(map, "first_name"),
                last_name: text(map, "last_name"),
                email: text(map, "email"),
            }),
            Value::Number(_) | Value::String(_) => int_value(value).map(|id| Self {
                id: Some(UserId::new(id)),
                ..Self::default()
            }),
            _ => None,
        }
    }

    /// Returns "First Last", else the username, else the email, else `#id`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .or_else(|| self.id.map(|id| format!("#{id}")))
            .unwrap_or_default()
    }
}

/// A project as returned by the backend.
///
/// The source JSON object is kept verbatim: serializing a record emits exactly
/// what was received, so JSON exports are lossless. Parsed fields are lenient;
/// absent or unparseable amounts read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ProjectRecord {
    id: ProjectId,
    name: String,
    status: ProjectStatus,
    project_cost: Option<Decimal>,
    final_cost: Option<Decimal>,
    estimated_cost: Option<Decimal>,
    executor_cost: Decimal,
    paid_total: Decimal,
    executor_paid_total: Decimal,
    deadline: Option<NaiveDate>,
    assigned_to: Option<PersonRef>,
    client: Option<PersonRef>,
    description: String,
    created_at: Option<NaiveDate>,
    source: Map<String, Value>,
}

impl ProjectRecord {
    /// Parses a record from a backend JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if the value is not a JSON object.
    pub fn from_value(value: Value) -> ProjexResult<Self> {
        let Value::Object(source) = value else {
            return Err(ProjexError::validation(
                "project",
                format!("expected a JSON object, got {}", kind_of(&value)),
            ));
        };

        let name = text(&source, "name")
            .or_else(|| text(&source, "title"))
            .unwrap_or_default();

        Ok(Self {
            id: source
                .get("id")
                .and_then(int_value)
                .map(ProjectId::new)
                .unwrap_or_default(),
            status: text(&source, "status")
                .map_or_else(|| ProjectStatus::Unknown(String::new()), |s| ProjectStatus::parse(&s)),
            project_cost: amount(&source, "project_cost"),
            final_cost: amount(&source, "final_cost"),
            estimated_cost: amount(&source, "estimated_cost"),
            executor_cost: amount(&source, "executor_cost").unwrap_or_default(),
            paid_total: amount(&source, "paid_total").unwrap_or_default(),
            executor_paid_total: amount(&source, "executor_paid_total").unwrap_or_default(),
            deadline: text(&source, "deadline").as_deref().and_then(parse_date),
            assigned_to: source.get("assigned_to").and_then(PersonRef::from_value),
            client: source.get("user").and_then(PersonRef::from_value),
            description: text(&source, "description").unwrap_or_default(),
            created_at: text(&source, "created_at").as_deref().and_then(parse_date),
            name,
            source,
        })
    }

    /// Parses a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if the value is not an array of objects.
    pub fn collection_from_value(value: Value) -> ProjexResult<Vec<Self>> {
        match value {
            Value::Array(items) => items.into_iter().map(Self::from_value).collect(),
            other => Err(ProjexError::validation(
                "projects",
                format!("expected a JSON array, got {}", kind_of(&other)),
            )),
        }
    }

    /// Project ID (zero when absent).
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Project name (falls back to `title`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> &ProjectStatus {
        &self.status
    }

    /// Effective project cost: `project_cost`, else `final_cost`, else
    /// `estimated_cost`, else zero.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.project_cost
            .or(self.final_cost)
            .or(self.estimated_cost)
            .unwrap_or_default()
    }

    /// Amount owed to the executor.
    #[must_use]
    pub const fn executor_cost(&self) -> Decimal {
        self.executor_cost
    }

    /// Amount paid by the client so far.
    #[must_use]
    pub const fn paid_total(&self) -> Decimal {
        self.paid_total
    }

    /// Amount paid to the executor so far.
    #[must_use]
    pub const fn executor_paid_total(&self) -> Decimal {
        self.executor_paid_total
    }

    /// Deadline, when set.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Assigned executor, when set.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&PersonRef> {
        self.assigned_to.as_ref()
    }

    /// Client (the backend's `user` relation), when set.
    #[must_use]
    pub const fn client(&self) -> Option<&PersonRef> {
        self.client.as_ref()
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Creation date, when reported.
    #[must_use]
    pub const fn created_at(&self) -> Option<NaiveDate> {
        self.created_at
    }

    /// The source JSON object as received.
    #[must_use]
    pub const fn source(&self) -> &Map<String, Value> {
        &self.source
    }
}

impl TryFrom<Value> for ProjectRecord {
    type Error = ProjexError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<ProjectRecord> for Value {
    fn from(record: ProjectRecord) -> Self {
        Self::Object(record.source)
    }
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Largest accepted amount magnitude (10^18). Larger values read as zero, so
/// sums and differences of real records stay far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// Reads a money field that may be a JSON number or a decimal string.
fn amount(map: &Map<String, Value>, key: &str) -> Option<Decimal> {
    let raw = match map.get(key)? {
        Value::Null => return None,
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace([' ', '\u{a0}'], "").replace(',', "."),
        other => {
            debug!(field = key, kind = kind_of(other), "ignoring non-numeric amount");
            return None;
        }
    };
    if raw.is_empty() {
        return None;
    }
    let parsed = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok();
    match parsed {
        Some(value) if value.abs() <= MAX_AMOUNT => Some(value),
        Some(_) => {
            warn!(field = key, value = %raw, "out-of-range amount treated as zero");
            None
        }
        None => {
            warn!(field = key, value = %raw, "unparseable amount treated as zero");
            None
        }
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_full_record() {
        let record = ProjectRecord::from_value(json!({
            "id": 12,
            "name": "Landing page",
            "status": "in_progress",
            "project_cost": "15000.00",
            "executor_cost": 9000,
            "paid_total": "5000.50",
            "executor_paid_total": 3000,
            "deadline": "2024-06-30",
            "assigned_to": {"id": 3, "username": "ivan", "first_name": "Иван", "last_name": "Петров"},
            "user": {"id": 9, "username": "client9", "email": "c@example.com"},
            "description": "Redesign",
            "created_at": "2024-04-02T10:15:00Z"
        }))
        .unwrap();

        assert_eq!(record.id(), ProjectId::new(12));
        assert_eq!(record.name(), "Landing page");
        assert_eq!(record.status(), &ProjectStatus::InProgress);
        assert_eq!(record.cost(), dec!(15000.00));
        assert_eq!(record.executor_cost(), dec!(9000));
        assert_eq!(record.paid_total(), dec!(5000.50));
        assert_eq!(record.executor_paid_total(), dec!(3000));
        assert_eq!(record.deadline(), NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(record.assigned_to().unwrap().display_name(), "Иван Петров");
        assert_eq!(record.client().unwrap().display_name(), "client9");
        assert_eq!(record.created_at(), NaiveDate::from_ymd_opt(2024, 4, 2));
    }

    #[test]
    fn test_partial_record_defaults() {
        let record = ProjectRecord::from_value(json!({"title": "Only title"})).unwrap();

        assert_eq!(record.id(), ProjectId::new(0));
        assert_eq!(record.name(), "Only title");
        assert_eq!(record.status(), &ProjectStatus::Unknown(String::new()));
        assert_eq!(record.cost(), Decimal::ZERO);
        assert_eq!(record.paid_total(), Decimal::ZERO);
        assert!(record.deadline().is_none());
        assert!(record.assigned_to().is_none());
        assert!(record.client().is_none());
    }

    #[rstest]
    #[case(json!({"project_cost": 100, "final_cost": 200, "estimated_cost": 300}), dec!(100))]
    #[case(json!({"project_cost": null, "final_cost": 200, "estimated_cost": 300}), dec!(200))]
    #[case(json!({"estimated_cost": "300"}), dec!(300))]
    #[case(json!({"project_cost": "not a number", "estimated_cost": 50}), dec!(50))]
    #[case(json!({"project_cost": "1 250,75"}), dec!(1250.75))]
    #[case(json!({}), dec!(0))]
    fn test_effective_cost(#[case] value: Value, #[case] expected: Decimal) {
        assert_eq!(ProjectRecord::from_value(value).unwrap().cost(), expected);
    }

    #[rstest]
    #[case(json!("70000000000000000000000000000"))]
    #[case(json!("-70000000000000000000000000000"))]
    #[case(json!("1000000000000000001"))]
    #[case(json!("1e29"))]
    fn test_out_of_range_amount_reads_as_zero(#[case] value: Value) {
        let record = ProjectRecord::from_value(json!({
            "project_cost": value.clone(),
            "paid_total": value,
        }))
        .unwrap();
        assert_eq!(record.cost(), Decimal::ZERO);
        assert_eq!(record.paid_total(), Decimal::ZERO);
    }

    #[test]
    fn test_amount_at_limit_is_kept() {
        let record = ProjectRecord::from_value(json!({"project_cost": "-1000000000000000000"})).unwrap();
        assert_eq!(record.cost(), -MAX_AMOUNT);
    }

    #[test]
    fn test_non_object_is_validation_failure() {
        let err = ProjectRecord::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILURE");
    }

    #[test]
    fn test_serialization_emits_source() {
        let value = json!({"id": 1, "name": "A", "extra": {"nested": [1, 2]}, "paid_total": "10.00"});
        let record: ProjectRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_relation_as_bare_id() {
        let record = ProjectRecord::from_value(json!({"assigned_to": 5, "user": null})).unwrap();
        assert_eq!(record.assigned_to().unwrap().display_name(), "#5");
        assert!(record.client().is_none());
    }

    #[rstest]
    #[case("new", ProjectStatus::New, "Новый")]
    #[case("review", ProjectStatus::Review, "На рассмотрении")]
    #[case("accepted", ProjectStatus::Accepted, "Принят")]
    #[case("in_progress", ProjectStatus::InProgress, "В работе")]
    #[case("testing", ProjectStatus::Testing, "Тестирование")]
    #[case("completed", ProjectStatus::Completed, "Завершен")]
    #[case("cancelled", ProjectStatus::Cancelled, "Отменен")]
    #[case("on_hold", ProjectStatus::OnHold, "Приостановлен")]
    #[case("archived", ProjectStatus::Unknown("archived".into()), "archived")]
    fn test_status_labels(#[case] raw: &str, #[case] status: ProjectStatus, #[case] label: &str) {
        let parsed = ProjectStatus::parse(raw);
        assert_eq!(parsed, status);
        assert_eq!(parsed.label(), label);
        assert_eq!(parsed.code(), raw);
    }
}
