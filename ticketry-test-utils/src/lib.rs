//! Ticketry Test Utilities
//!
//! Shared test infrastructure for the Ticketry workspace:
//! - Proptest generators for create requests and edit bodies
//! - Fixtures producing collision-free names for database tests
//! - Assertions over sequence indices

pub use ticketry_core::{
    Metric, MetricOption, NewMetric, NewMetricOption, NewProject, NewTicket, NewUserAccount,
    Project, RowId, SequenceIndex, Ticket, TicketAssignee, UserAccount, UserProject,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Ticketry request types.

    use super::*;
    use proptest::prelude::*;

    /// Usernames: lowercase, optionally with digits and separators.
    pub fn arb_username() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_.]{2,15}"
    }

    /// Free-text titles, including unicode and punctuation.
    pub fn arb_title() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Z][a-z ]{3,30}",
            "[a-z]{1,8}-[0-9]{1,4}",
            Just("T".to_string()),
            "\\PC{1,40}",
        ]
    }

    pub fn arb_row_id() -> impl Strategy<Value = RowId> {
        1..i32::MAX
    }

    /// A user creation request whose username ends with `suffix`.
    pub fn arb_new_user(suffix: String) -> impl Strategy<Value = NewUserAccount> {
        (arb_username(), "[a-f0-9]{16}", "[a-f0-9]{64}", "[A-Z][a-z]{2,12}").prop_map(
            move |(username, password_salt, password_hash, name)| NewUserAccount {
                username: format!("{}-{}", username, suffix),
                password_salt,
                password_hash,
                name,
            },
        )
    }

    pub fn arb_new_ticket(
        project_id: RowId,
        created_user_id: RowId,
    ) -> impl Strategy<Value = NewTicket> {
        arb_title().prop_map(move |title| NewTicket {
            project_id,
            created_user_id,
            title,
        })
    }

    pub fn arb_new_metric_option(metric_id: RowId) -> impl Strategy<Value = NewMetricOption> {
        arb_title().prop_map(move |option_string| NewMetricOption {
            metric_id,
            option_string,
        })
    }

    /// Existing index sets with gaps, as left behind by deletes.
    pub fn arb_index_set() -> impl Strategy<Value = Vec<SequenceIndex>> {
        proptest::collection::btree_set(1..10_000i32, 0..50)
            .prop_map(|set| set.into_iter().collect())
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Request fixtures for database-backed tests.
    //!
    //! Tests share one database, so every name carries a process-unique tag.

    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    /// A name no other test run or test case will produce.
    pub fn unique_name(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}-{}", prefix, std::process::id(), nanos, n)
    }

    pub fn new_user(tag: &str) -> NewUserAccount {
        NewUserAccount {
            username: unique_name(tag),
            password_salt: "salt".to_string(),
            password_hash: "hash".to_string(),
            name: format!("Test {}", tag),
        }
    }

    pub fn new_project(owner_user_id: RowId, name: impl Into<String>) -> NewProject {
        NewProject {
            name: name.into(),
            owner_user_id,
        }
    }

    pub fn new_ticket(project_id: RowId, created_user_id: RowId, title: &str) -> NewTicket {
        NewTicket {
            project_id,
            created_user_id,
            title: title.to_string(),
        }
    }

    pub fn new_metric(project_id: RowId, title: impl Into<String>) -> NewMetric {
        NewMetric {
            project_id,
            title: title.into(),
        }
    }

    pub fn new_metric_option(metric_id: RowId, option_string: &str) -> NewMetricOption {
        NewMetricOption {
            metric_id,
            option_string: option_string.to_string(),
        }
    }

    /// Convert a `json!` object literal into an edit body.
    pub fn edit_body(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("edit body must be a JSON object, got {}", other),
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over ordered child collections.

    use super::*;

    /// Assert that `indices`, in creation order, are exactly 1..=n.
    #[track_caller]
    pub fn assert_dense_from_one(indices: &[SequenceIndex]) {
        let expected = (1..=indices.len() as SequenceIndex).collect::<Vec<_>>();
        assert_eq!(indices, expected.as_slice(), "indices are not dense from 1");
    }

    /// Assert that `indices` contain no value twice.
    #[track_caller]
    pub fn assert_no_duplicates(indices: &[SequenceIndex]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), indices.len(), "duplicate indices in {:?}", indices);
    }

    /// Ticket indices in creation (id) order.
    pub fn ticket_indices(tickets: &[Ticket]) -> Vec<SequenceIndex> {
        let mut ordered = tickets.to_vec();
        ordered.sort_by_key(|t| t.id);
        ordered.iter().map(|t| t.index_in_project).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
