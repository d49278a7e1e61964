//! Error types for Ticketry core operations

use thiserror::Error;

/// Validation errors raised before any statement reaches the datastore.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Cannot change {field} of {table}")]
    ImmutableField {
        table: &'static str,
        field: &'static str,
    },

    #[error("{table} has no editable field named '{field}'")]
    UnknownField { table: &'static str, field: String },

    #[error("Unknown column '{column}'")]
    UnknownColumn { column: String },

    #[error("Column {column} does not belong to table {table}")]
    ColumnNotInTable {
        table: &'static str,
        column: &'static str,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("No fields supplied to update {table}")]
    EmptyUpdate { table: &'static str },
}

/// Result type for core validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
