//! Ticketry Core - Data Types
//!
//! Row types, the table/column whitelist, the ordering rule for sequenced
//! children and the validated update builder. Nothing here touches the
//! database; the API crate turns these types into statements.

pub mod entities;
pub mod error;
pub mod identity;
pub mod ordering;
pub mod table;
pub mod update;

pub use entities::{
    Metric, MetricOption, NewMetric, NewMetricOption, NewProject, NewTicket, NewUserAccount,
    Project, ProjectWithMembership, Ticket, TicketAssignee, UserAccount, UserProject,
};
pub use error::{ValidationError, ValidationResult};
pub use identity::{RowId, SequenceIndex};
pub use ordering::{next_index, OrderedScope, FIRST_INDEX};
pub use table::{Column, ColumnKind, DataTable, RelationTable};
pub use update::{FieldValue, UpdateSet};
