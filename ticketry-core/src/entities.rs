//! Row types and create requests for every Ticketry table.
//!
//! Field names match the column names of the schema, so the JSON shape of a
//! row is exactly the row as stored.

use serde::{Deserialize, Serialize};

use crate::identity::{RowId, SequenceIndex};

// ============================================================================
// USERS
// ============================================================================

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserAccount {
    pub id: RowId,
    pub username: String,
    pub password_salt: String,
    pub password_hash: String,
    pub name: String,
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewUserAccount {
    pub username: String,
    pub password_salt: String,
    pub password_hash: String,
    pub name: String,
}

// ============================================================================
// PROJECTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Project {
    pub id: RowId,
    pub name: String,
    pub owner_user_id: RowId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewProject {
    pub name: String,
    pub owner_user_id: RowId,
}

/// Result of creating a project: the project and the owner's membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectWithMembership {
    pub project: Project,
    #[serde(rename = "userProject")]
    pub user_project: UserProject,
}

// ============================================================================
// TICKETS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Ticket {
    pub id: RowId,
    pub project_id: RowId,
    pub created_user_id: RowId,
    /// Dense 1-based position inside the project, assigned by the server.
    pub index_in_project: SequenceIndex,
    pub title: String,
}

/// Request body for `POST /tickets`. The index is never client supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewTicket {
    pub project_id: RowId,
    pub created_user_id: RowId,
    pub title: String,
}

// ============================================================================
// METRICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Metric {
    pub id: RowId,
    pub project_id: RowId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewMetric {
    pub project_id: RowId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MetricOption {
    pub id: RowId,
    pub metric_id: RowId,
    pub index_in_metric: SequenceIndex,
    pub option_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewMetricOption {
    pub metric_id: RowId,
    pub option_string: String,
}

// ============================================================================
// RELATIONS
// ============================================================================

/// Membership pair: the user can access the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProject {
    pub user_id: RowId,
    pub project_id: RowId,
}

/// Assignment pair: the user is responsible for the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TicketAssignee {
    pub ticket_id: RowId,
    pub assignee_user_id: RowId,
}
