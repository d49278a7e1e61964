//! Partial-field updates over a statically known field set.
//!
//! An [`UpdateSet`] is built from the JSON object a client sends and only
//! ever contains columns from the table's mutable set. Immutable fields are
//! rejected first, so a request touching both an immutable and an unknown
//! field reports the immutable one.

use serde_json::{Map, Value as JsonValue};

use crate::error::{ValidationError, ValidationResult};
use crate::table::{Column, ColumnKind, DataTable};

/// A typed value bound to one column of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i32),
    Text(String),
}

impl FieldValue {
    fn coerce(column: Column, value: &JsonValue) -> ValidationResult<Self> {
        let invalid = |reason: &str| ValidationError::InvalidValue {
            field: column.as_str(),
            reason: reason.to_string(),
        };

        match column.kind() {
            ColumnKind::Text => match value {
                JsonValue::String(s) => Ok(FieldValue::Text(s.clone())),
                _ => Err(invalid("expected a string")),
            },
            ColumnKind::Integer => {
                let raw = match value {
                    JsonValue::Number(n) => n.as_i64(),
                    JsonValue::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                raw.and_then(|n| i32::try_from(n).ok())
                    .map(FieldValue::Integer)
                    .ok_or_else(|| invalid("expected a 32-bit integer"))
            }
        }
    }
}

/// Validated column/value assignments for one `UPDATE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSet {
    table: DataTable,
    assignments: Vec<(Column, FieldValue)>,
}

impl UpdateSet {
    /// Build an update from a client supplied JSON object.
    pub fn from_json(table: DataTable, fields: &Map<String, JsonValue>) -> ValidationResult<Self> {
        if let Some(field) = table
            .immutable_columns()
            .iter()
            .find(|column| fields.contains_key(column.as_str()))
        {
            return Err(ValidationError::ImmutableField {
                table: table.as_str(),
                field: field.as_str(),
            });
        }

        let mut assignments = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            let column = table
                .mutable_columns()
                .iter()
                .copied()
                .find(|column| column.as_str() == key)
                .ok_or_else(|| ValidationError::UnknownField {
                    table: table.as_str(),
                    field: key.clone(),
                })?;
            assignments.push((column, FieldValue::coerce(column, value)?));
        }

        if assignments.is_empty() {
            return Err(ValidationError::EmptyUpdate {
                table: table.as_str(),
            });
        }

        Ok(Self { table, assignments })
    }

    pub fn table(&self) -> DataTable {
        self.table
    }

    pub fn assignments(&self) -> &[(Column, FieldValue)] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn contains(&self, column: Column) -> bool {
        self.assignments.iter().any(|(c, _)| *c == column)
    }

    pub fn text(&self, column: Column) -> Option<&str> {
        self.assignments.iter().find_map(|(c, value)| match value {
            FieldValue::Text(s) if *c == column => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn integer(&self, column: Column) -> Option<i32> {
        self.assignments.iter().find_map(|(c, value)| match value {
            FieldValue::Integer(n) if *c == column => Some(*n),
            _ => None,
        })
    }

    /// Render the parameterized statement.
    ///
    /// Values bind to `$1..$n` in assignment order and the row id binds to
    /// `$n+1`.
    pub fn statement(&self) -> String {
        let set_clause = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column.as_str(), i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING *",
            self.table.as_str(),
            set_clause,
            self.assignments.len() + 1
        )
    }
}
