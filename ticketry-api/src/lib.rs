//! Ticketry API - REST Layer over PostgreSQL
//!
//! CRUD endpoints for users, projects, tickets, metrics, metric options and
//! the membership and assignment pairs. Tickets and metric options carry a
//! dense 1-based index inside their parent, assigned under a parent row
//! lock in the creating transaction.
//!
//! Every entity response uses the `{isSuccessful, result|error}` envelope.

pub mod macros;

pub mod component;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod guards;
pub mod routes;
pub mod schema;
pub mod sequencing;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod transaction;
pub mod types;

#[cfg(feature = "openapi")]
pub mod openapi;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use schema::ensure_schema;
pub use state::AppState;
pub use types::{Envelope, ListQuery, UserListQuery};
