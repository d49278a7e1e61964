//! Property tests for edit-body validation, run without a database.

use proptest::prelude::*;
use serde_json::{Map, Value};
use ticketry_api::routes::generic::update_set;
use ticketry_api::ErrorCode;
use ticketry_core::{Column, ColumnKind, Metric, MetricOption, Project, Ticket, UserAccount};
use ticketry_test_utils::generators::arb_title;

fn sample_value(column: Column, text: &str) -> Value {
    match column.kind() {
        ColumnKind::Integer => Value::from(7),
        ColumnKind::Text => Value::from(text),
    }
}

/// Validate `body` against the table of the named entity.
fn validate(entity: usize, body: &Map<String, Value>) -> Result<usize, ErrorCode> {
    let result = match entity {
        0 => update_set::<UserAccount>(body),
        1 => update_set::<Project>(body),
        2 => update_set::<Ticket>(body),
        3 => update_set::<Metric>(body),
        _ => update_set::<MetricOption>(body),
    };
    result.map(|set| set.len()).map_err(|e| e.code)
}

fn table_of(entity: usize) -> ticketry_core::DataTable {
    use ticketry_api::component::Component;
    match entity {
        0 => UserAccount::TABLE,
        1 => Project::TABLE,
        2 => Ticket::TABLE,
        3 => Metric::TABLE,
        _ => MetricOption::TABLE,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any body naming an immutable column fails with ImmutableField,
    /// whatever else it carries.
    #[test]
    fn prop_immutable_field_always_rejected(
        entity in 0usize..5,
        pick in any::<prop::sample::Index>(),
        text in arb_title(),
        with_mutable in any::<bool>(),
    ) {
        let table = table_of(entity);
        let immutable = table.immutable_columns();
        let column = immutable[pick.index(immutable.len())];

        let mut body = Map::new();
        body.insert(column.as_str().to_string(), sample_value(column, &text));
        if with_mutable {
            let mutable = table.mutable_columns()[0];
            body.insert(mutable.as_str().to_string(), sample_value(mutable, &text));
        }

        prop_assert_eq!(validate(entity, &body), Err(ErrorCode::ImmutableField));
    }

    /// Bodies built only from mutable columns are accepted in full.
    #[test]
    fn prop_mutable_fields_accepted(
        entity in 0usize..5,
        text in arb_title(),
    ) {
        let table = table_of(entity);
        let body = table
            .mutable_columns()
            .iter()
            .map(|c| (c.as_str().to_string(), sample_value(*c, &text)))
            .collect::<Map<_, _>>();

        prop_assert_eq!(validate(entity, &body), Ok(table.mutable_columns().len()));
    }

    /// Field names outside the table are invalid input, never silently dropped.
    #[test]
    fn prop_unknown_field_rejected(
        entity in 0usize..5,
        field in "zz_[a-z]{1,10}",
    ) {
        let mut body = Map::new();
        body.insert(field, Value::from(1));
        prop_assert_eq!(validate(entity, &body), Err(ErrorCode::InvalidInput));
    }
}
