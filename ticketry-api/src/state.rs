//! Shared application state for Axum routers.

use std::time::Instant;

use crate::db::DbClient;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Pooled database client, created once at startup.
    pub db: DbClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: DbClient) -> Self {
        Self {
            db,
            start_time: Instant::now(),
        }
    }
}

crate::impl_from_ref!(DbClient, db);
crate::impl_from_ref!(Instant, start_time);
