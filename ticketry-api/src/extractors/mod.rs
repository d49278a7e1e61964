//! Request extractors that reject with the failure envelope.

mod body;
mod path_id;

pub use body::{ApiJson, ApiQuery};
pub use path_id::PathId;
