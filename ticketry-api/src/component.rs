//! Component traits for generic CRUD operations.
//!
//! Every data table row type implements [`Component`] and every join table
//! row type implements [`Relation`]. The row store in `crate::store` uses
//! these to fetch, update and delete any entity through one set of generic
//! functions.

use serde::Serialize;
use ticketry_core::{
    Column, DataTable, FieldValue, Metric, MetricOption, Project, RelationTable, RowId, Ticket,
    TicketAssignee, UserAccount, UserProject,
};
use tokio_postgres::Row;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// COMPONENT TRAIT
// ============================================================================

/// A row type of one of the `SERIAL id` tables.
pub trait Component: Sized + Send + Sync + Serialize + 'static {
    /// Table holding rows of this type.
    const TABLE: DataTable;

    /// Decode a full `SELECT *` / `RETURNING *` row.
    fn from_row(row: &Row) -> ApiResult<Self>;

    /// Primary key of this row.
    fn row_id(&self) -> RowId;

    /// Create a not-found error for this entity type.
    fn not_found_error(id: RowId) -> ApiError {
        ApiError::entity_not_found(Self::TABLE.entity_name(), id)
    }
}

/// A row of a composite-key join table.
pub trait Relation: Sized + Send + Sync + Serialize + 'static {
    const TABLE: RelationTable;

    fn from_row(row: &Row) -> ApiResult<Self>;

    /// Key values in the order of `TABLE.columns()`.
    fn key(&self) -> (RowId, RowId);
}

// ============================================================================
// SQL PARAMETER TYPE
// ============================================================================

/// Type-erased SQL parameter for generic statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    String(String),
}

impl SqlParam {
    /// Convert this SqlParam to a reference that can be used with tokio_postgres.
    pub fn as_to_sql(&self) -> &(dyn tokio_postgres::types::ToSql + Sync) {
        match self {
            SqlParam::Int(v) => v,
            SqlParam::String(v) => v,
        }
    }
}

impl From<&FieldValue> for SqlParam {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Integer(n) => SqlParam::Int(*n),
            FieldValue::Text(s) => SqlParam::String(s.clone()),
        }
    }
}

/// Borrow a parameter list in the shape tokio_postgres expects.
pub fn param_refs(params: &[SqlParam]) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
    params.iter().map(SqlParam::as_to_sql).collect()
}

/// Column/value pairs for an `INSERT`.
pub type InsertValues = Vec<(Column, SqlParam)>;

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

crate::impl_component!(UserAccount, DataTable::UserAccounts {
    id,
    username,
    password_salt,
    password_hash,
    name,
});

crate::impl_component!(Project, DataTable::Projects {
    id,
    name,
    owner_user_id,
});

crate::impl_component!(Ticket, DataTable::Tickets {
    id,
    project_id,
    created_user_id,
    index_in_project,
    title,
});

crate::impl_component!(Metric, DataTable::Metrics {
    id,
    project_id,
    title,
});

crate::impl_component!(MetricOption, DataTable::MetricOptions {
    id,
    metric_id,
    index_in_metric,
    option_string,
});

crate::impl_relation!(UserProject, RelationTable::UserProjects { user_id, project_id });

crate::impl_relation!(TicketAssignee, RelationTable::TicketAssignees {
    ticket_id,
    assignee_user_id
});
