//! Property-Based Tests for Scope Ordering and Field Validation
//!
//! **Property: Dense Ordering**
//!
//! For any set of indices already present in a scope, the next index SHALL
//! be strictly greater than all of them, and appending children one at a
//! time from an empty scope SHALL yield exactly `1..=n`.
//!
//! **Property: Immutable Fields**
//!
//! For any table and any update touching one of its immutable columns, the
//! update SHALL be rejected naming that column.

use proptest::prelude::*;
use serde_json::{Map, Value as JsonValue};
use ticketry_core::{next_index, Column, DataTable, UpdateSet, ValidationError, FIRST_INDEX};

// ============================================================================
// PROPERTY TEST STRATEGIES
// ============================================================================

fn existing_indices_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop_oneof![
        // Empty scope
        Just(Vec::new()),
        // Dense run
        (1..200i32).prop_map(|n| (1..=n).collect()),
        // Sparse after deletions
        prop::collection::vec(1..10_000i32, 1..50),
    ]
}

fn table_strategy() -> impl Strategy<Value = DataTable> {
    prop::sample::select(DataTable::ALL.to_vec())
}

fn text_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9 ]{0,40}",
        // Edge case: empty string is still a string
        Just(String::new()),
    ]
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_next_index_exceeds_existing(existing in existing_indices_strategy()) {
        let next = next_index(existing.iter().copied());
        prop_assert!(next >= FIRST_INDEX);
        for index in &existing {
            prop_assert!(next > *index);
        }
        if let Some(max) = existing.iter().max() {
            prop_assert_eq!(next, max + 1);
        }
    }

    #[test]
    fn prop_sequential_appends_are_dense(count in 1usize..100) {
        let mut scope = Vec::new();
        for _ in 0..count {
            let next = next_index(scope.iter().copied());
            scope.push(next);
        }
        let expected: Vec<i32> = (1..=count as i32).collect();
        prop_assert_eq!(scope, expected);
    }

    #[test]
    fn prop_immutable_field_rejected(
        table in table_strategy(),
        pick in any::<prop::sample::Index>(),
        title in text_value_strategy(),
    ) {
        let immutable = table.immutable_columns();
        let column = immutable[pick.index(immutable.len())];

        let mut fields = Map::new();
        fields.insert(column.as_str().to_string(), JsonValue::from(1));
        // A valid mutable field alongside does not rescue the request.
        let mutable = table.mutable_columns()[0];
        fields.insert(mutable.as_str().to_string(), JsonValue::from(title));

        let result = UpdateSet::from_json(table, &fields);
        prop_assert_eq!(
            result,
            Err(ValidationError::ImmutableField {
                table: table.as_str(),
                field: column.as_str(),
            })
        );
    }

    #[test]
    fn prop_text_update_accepted(table in table_strategy(), value in text_value_strategy()) {
        let column = table
            .mutable_columns()
            .iter()
            .copied()
            .find(|c| *c != Column::OwnerUserId)
            .unwrap_or(Column::Title);

        let mut fields = Map::new();
        fields.insert(column.as_str().to_string(), JsonValue::from(value.clone()));

        let set = UpdateSet::from_json(table, &fields).unwrap();
        prop_assert_eq!(set.text(column), Some(value.as_str()));
        let prefix = format!("UPDATE {} SET", table.as_str());
        prop_assert!(set.statement().starts_with(&prefix));
    }
}
