//! Dense ordering of child rows inside a parent scope.
//!
//! Tickets are numbered per project and metric options per metric. A new
//! child always receives `max(existing) + 1`, or 1 for an empty scope.
//! Indices are never compacted, so deleting a child leaves a gap that is
//! not refilled.

use crate::identity::SequenceIndex;
use crate::table::{Column, DataTable};

/// First index handed out in an empty scope.
pub const FIRST_INDEX: SequenceIndex = 1;

/// An ordered child collection and the columns that describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderedScope {
    /// `tickets.index_in_project`, scoped by `tickets.project_id`.
    TicketsInProject,
    /// `metric_options.index_in_metric`, scoped by `metric_options.metric_id`.
    OptionsInMetric,
}

impl OrderedScope {
    /// Table holding the ordered children.
    pub const fn child_table(&self) -> DataTable {
        match self {
            OrderedScope::TicketsInProject => DataTable::Tickets,
            OrderedScope::OptionsInMetric => DataTable::MetricOptions,
        }
    }

    /// Table holding the row that owns the scope.
    pub const fn parent_table(&self) -> DataTable {
        match self {
            OrderedScope::TicketsInProject => DataTable::Projects,
            OrderedScope::OptionsInMetric => DataTable::Metrics,
        }
    }

    /// Column of the child table referencing the parent.
    pub const fn scope_column(&self) -> Column {
        match self {
            OrderedScope::TicketsInProject => Column::ProjectId,
            OrderedScope::OptionsInMetric => Column::MetricId,
        }
    }

    pub const fn index_column(&self) -> Column {
        match self {
            OrderedScope::TicketsInProject => Column::IndexInProject,
            OrderedScope::OptionsInMetric => Column::IndexInMetric,
        }
    }
}

/// Compute the index for the next child given the indices already present.
///
/// Non-positive values are ignored; they cannot exist under the schema's
/// check constraints.
pub fn next_index<I>(existing: I) -> SequenceIndex
where
    I: IntoIterator<Item = SequenceIndex>,
{
    existing
        .into_iter()
        .filter(|index| *index >= FIRST_INDEX)
        .max()
        .map_or(FIRST_INDEX, |highest| highest.saturating_add(1))
}
