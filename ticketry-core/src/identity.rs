//! Identity types for Ticketry rows

/// Row identifier. Every data table uses a `SERIAL` primary key.
pub type RowId = i32;

/// Position of a row inside an ordered scope (ticket in project, option in metric).
pub type SequenceIndex = i32;
