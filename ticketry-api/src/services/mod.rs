//! Service Layer
//!
//! Entity operations that need more than one statement: guards, sequence
//! assignment and the insert, run together in one transaction. Plain reads,
//! unguarded edits and deletes go straight through the generic operations
//! on `DbClient`.

pub mod metric_option_service;
pub mod metric_service;
pub mod pair_service;
pub mod project_service;
pub mod ticket_service;
pub mod user_service;
