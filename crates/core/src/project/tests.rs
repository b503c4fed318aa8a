//! Property-based tests for the project module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use super::record::ProjectRecord;
use super::row::{Cell, Financials, ProjectRow};

proptest! {
    /// remaining = cost - paid and profit = cost - executor_cost for any amounts,
    /// whether the backend sends numbers or decimal strings.
    #[test]
    fn test_derived_financials(
        cost_cents in 0i64..10_000_000_000,
        paid_cents in 0i64..10_000_000_000,
        executor_cents in 0i64..10_000_000_000,
        as_strings in any::<bool>(),
    ) {
        let cost = Decimal::new(cost_cents, 2);
        let paid = Decimal::new(paid_cents, 2);
        let executor = Decimal::new(executor_cents, 2);

        let value = if as_strings {
            json!({
                "project_cost": cost.to_string(),
                "paid_total": paid.to_string(),
                "executor_cost": executor.to_string(),
            })
        } else {
            json!({
                "project_cost": cost_cents,
                "paid_total": paid_cents,
                "executor_cost": executor_cents,
            })
        };
        let (cost, paid, executor) = if as_strings {
            (cost, paid, executor)
        } else {
            (Decimal::from(cost_cents), Decimal::from(paid_cents), Decimal::from(executor_cents))
        };

        let record = ProjectRecord::from_value(value).unwrap();
        let financials = Financials::of(&record);

        prop_assert_eq!(financials.cost, cost);
        prop_assert_eq!(financials.paid, paid);
        prop_assert_eq!(financials.executor_cost, executor);
        prop_assert_eq!(financials.remaining, cost - paid);
        prop_assert_eq!(financials.profit, cost - executor);
    }

    /// The mapper never fails and always yields twelve cells, whatever is missing.
    #[test]
    fn test_mapper_total_over_partial_records(
        has_name in any::<bool>(),
        has_cost in any::<bool>(),
        has_deadline in any::<bool>(),
        has_executor in any::<bool>(),
        name in "[a-zA-Zа-яА-Я ,\"]{0,20}",
    ) {
        let mut object = serde_json::Map::new();
        if has_name {
            object.insert("name".into(), json!(name));
        }
        if has_cost {
            object.insert("project_cost".into(), json!("125.50"));
        }
        if has_deadline {
            object.insert("deadline".into(), json!("2025-01-31"));
        }
        if has_executor {
            object.insert("assigned_to".into(), json!({"username": "exec"}));
        }

        let record = ProjectRecord::from_value(serde_json::Value::Object(object)).unwrap();
        let cells = ProjectRow::from_record(&record).cells();

        prop_assert_eq!(cells.len(), 12);
        let numeric = cells.iter().filter(|c| matches!(c, Cell::Number(_))).count();
        prop_assert_eq!(numeric, 6);
    }
}
