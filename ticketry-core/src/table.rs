//! Closed whitelist of table and column identifiers.
//!
//! SQL identifiers cannot be bound as query parameters, so every identifier
//! interpolated into a statement comes from one of these enums. Nothing a
//! caller sends is ever spliced into SQL text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// ============================================================================
// COLUMNS
// ============================================================================

/// Storage type of a column, used to coerce JSON update values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Integer,
    Text,
}

/// Every column known to the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    Username,
    PasswordSalt,
    PasswordHash,
    Name,
    OwnerUserId,
    ProjectId,
    CreatedUserId,
    Title,
    IndexInProject,
    MetricId,
    IndexInMetric,
    OptionString,
    UserId,
    TicketId,
    AssigneeUserId,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::Id,
        Column::Username,
        Column::PasswordSalt,
        Column::PasswordHash,
        Column::Name,
        Column::OwnerUserId,
        Column::ProjectId,
        Column::CreatedUserId,
        Column::Title,
        Column::IndexInProject,
        Column::MetricId,
        Column::IndexInMetric,
        Column::OptionString,
        Column::UserId,
        Column::TicketId,
        Column::AssigneeUserId,
    ];

    /// Literal column name as it appears in the schema.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Username => "username",
            Column::PasswordSalt => "password_salt",
            Column::PasswordHash => "password_hash",
            Column::Name => "name",
            Column::OwnerUserId => "owner_user_id",
            Column::ProjectId => "project_id",
            Column::CreatedUserId => "created_user_id",
            Column::Title => "title",
            Column::IndexInProject => "index_in_project",
            Column::MetricId => "metric_id",
            Column::IndexInMetric => "index_in_metric",
            Column::OptionString => "option_string",
            Column::UserId => "user_id",
            Column::TicketId => "ticket_id",
            Column::AssigneeUserId => "assignee_user_id",
        }
    }

    pub const fn kind(&self) -> ColumnKind {
        match self {
            Column::Id
            | Column::OwnerUserId
            | Column::ProjectId
            | Column::CreatedUserId
            | Column::IndexInProject
            | Column::MetricId
            | Column::IndexInMetric
            | Column::UserId
            | Column::TicketId
            | Column::AssigneeUserId => ColumnKind::Integer,
            Column::Username
            | Column::PasswordSalt
            | Column::PasswordHash
            | Column::Name
            | Column::Title
            | Column::OptionString => ColumnKind::Text,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownColumn {
                column: s.to_string(),
            })
    }
}

// ============================================================================
// DATA TABLES
// ============================================================================

/// Tables whose rows carry a `SERIAL id` primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataTable {
    UserAccounts,
    Projects,
    Tickets,
    Metrics,
    MetricOptions,
}

impl DataTable {
    pub const ALL: [DataTable; 5] = [
        DataTable::UserAccounts,
        DataTable::Projects,
        DataTable::Tickets,
        DataTable::Metrics,
        DataTable::MetricOptions,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DataTable::UserAccounts => "user_accounts",
            DataTable::Projects => "projects",
            DataTable::Tickets => "tickets",
            DataTable::Metrics => "metrics",
            DataTable::MetricOptions => "metric_options",
        }
    }

    /// Human readable singular name used in error messages.
    pub const fn entity_name(&self) -> &'static str {
        match self {
            DataTable::UserAccounts => "User",
            DataTable::Projects => "Project",
            DataTable::Tickets => "Ticket",
            DataTable::Metrics => "Metric",
            DataTable::MetricOptions => "Metric option",
        }
    }

    pub const fn columns(&self) -> &'static [Column] {
        match self {
            DataTable::UserAccounts => &[
                Column::Id,
                Column::Username,
                Column::PasswordSalt,
                Column::PasswordHash,
                Column::Name,
            ],
            DataTable::Projects => &[Column::Id, Column::Name, Column::OwnerUserId],
            DataTable::Tickets => &[
                Column::Id,
                Column::ProjectId,
                Column::CreatedUserId,
                Column::IndexInProject,
                Column::Title,
            ],
            DataTable::Metrics => &[Column::Id, Column::ProjectId, Column::Title],
            DataTable::MetricOptions => &[
                Column::Id,
                Column::MetricId,
                Column::IndexInMetric,
                Column::OptionString,
            ],
        }
    }

    /// Columns that can never be edited after the row is created.
    pub const fn immutable_columns(&self) -> &'static [Column] {
        match self {
            DataTable::UserAccounts => {
                &[Column::Id, Column::PasswordSalt, Column::PasswordHash]
            }
            DataTable::Projects => &[Column::Id],
            DataTable::Tickets => &[
                Column::Id,
                Column::ProjectId,
                Column::CreatedUserId,
                Column::IndexInProject,
            ],
            DataTable::Metrics => &[Column::Id, Column::ProjectId],
            DataTable::MetricOptions => &[Column::Id, Column::MetricId, Column::IndexInMetric],
        }
    }

    pub const fn mutable_columns(&self) -> &'static [Column] {
        match self {
            DataTable::UserAccounts => &[Column::Username, Column::Name],
            DataTable::Projects => &[Column::Name, Column::OwnerUserId],
            DataTable::Tickets => &[Column::Title],
            DataTable::Metrics => &[Column::Title],
            DataTable::MetricOptions => &[Column::OptionString],
        }
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns().contains(&column)
    }

    /// Fails with [`ValidationError::ColumnNotInTable`] when `column` is foreign to this table.
    pub fn check_column(&self, column: Column) -> Result<(), ValidationError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(ValidationError::ColumnNotInTable {
                table: self.as_str(),
                column: column.as_str(),
            })
        }
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RELATION TABLES
// ============================================================================

/// Join tables keyed by a composite pair, without an `id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationTable {
    UserProjects,
    TicketAssignees,
}

impl RelationTable {
    pub const ALL: [RelationTable; 2] =
        [RelationTable::UserProjects, RelationTable::TicketAssignees];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RelationTable::UserProjects => "user_projects",
            RelationTable::TicketAssignees => "ticket_assignees",
        }
    }

    pub const fn entity_name(&self) -> &'static str {
        match self {
            RelationTable::UserProjects => "User-project pair",
            RelationTable::TicketAssignees => "Ticket-assignee pair",
        }
    }

    /// The two key columns, in declaration order.
    pub const fn columns(&self) -> [Column; 2] {
        match self {
            RelationTable::UserProjects => [Column::UserId, Column::ProjectId],
            RelationTable::TicketAssignees => [Column::TicketId, Column::AssigneeUserId],
        }
    }

    /// Data tables referenced by each key column, matching [`Self::columns`].
    pub const fn referenced_tables(&self) -> [DataTable; 2] {
        match self {
            RelationTable::UserProjects => [DataTable::UserAccounts, DataTable::Projects],
            RelationTable::TicketAssignees => [DataTable::Tickets, DataTable::UserAccounts],
        }
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns().contains(&column)
    }

    pub fn check_column(&self, column: Column) -> Result<(), ValidationError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(ValidationError::ColumnNotInTable {
                table: self.as_str(),
                column: column.as_str(),
            })
        }
    }
}

impl fmt::Display for RelationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_are_literal() {
        assert_eq!(DataTable::UserAccounts.as_str(), "user_accounts");
        assert_eq!(DataTable::MetricOptions.as_str(), "metric_options");
        assert_eq!(RelationTable::TicketAssignees.as_str(), "ticket_assignees");
    }

    #[test]
    fn test_mutable_and_immutable_sets_partition_columns() {
        for table in DataTable::ALL {
            for column in table.columns() {
                let immutable = table.immutable_columns().contains(column);
                let mutable = table.mutable_columns().contains(column);
                assert!(
                    immutable ^ mutable,
                    "{}.{} must be exactly one of mutable/immutable",
                    table,
                    column
                );
            }
            for column in table
                .immutable_columns()
                .iter()
                .chain(table.mutable_columns())
            {
                assert!(table.has_column(*column));
            }
        }
    }

    #[test]
    fn test_ticket_identity_columns_are_immutable() {
        let immutable = DataTable::Tickets.immutable_columns();
        assert!(immutable.contains(&Column::ProjectId));
        assert!(immutable.contains(&Column::CreatedUserId));
        assert!(immutable.contains(&Column::IndexInProject));
        assert_eq!(DataTable::Tickets.mutable_columns(), &[Column::Title]);
    }

    #[test]
    fn test_column_from_str() {
        assert_eq!("index_in_project".parse::<Column>(), Ok(Column::IndexInProject));
        assert!(matches!(
            "id; DROP TABLE tickets".parse::<Column>(),
            Err(ValidationError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_check_column() {
        assert!(DataTable::Projects.check_column(Column::OwnerUserId).is_ok());
        assert_eq!(
            DataTable::Projects.check_column(Column::Title),
            Err(ValidationError::ColumnNotInTable {
                table: "projects",
                column: "title",
            })
        );
        assert!(RelationTable::UserProjects.check_column(Column::TicketId).is_err());
    }

    #[test]
    fn test_relation_references_line_up() {
        let table = RelationTable::TicketAssignees;
        assert_eq!(table.columns()[0], Column::TicketId);
        assert_eq!(table.referenced_tables()[0], DataTable::Tickets);
        assert_eq!(table.referenced_tables()[1], DataTable::UserAccounts);
    }
}
