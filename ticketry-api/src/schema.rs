//! Schema Bootstrap
//!
//! DDL for every Ticketry table. Applied at startup when
//! `TICKETRY_DB_BOOTSTRAP_SCHEMA` is set, and by the database test harness.
//! Every statement is idempotent.

use crate::db::DbClient;
use crate::error::ApiResult;
use tokio_postgres::error::SqlState;

/// Table definitions in dependency order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS user_accounts (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_salt TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        owner_user_id INTEGER NOT NULL REFERENCES user_accounts (id) ON DELETE CASCADE,
        UNIQUE (owner_user_id, name)
    )",
    "CREATE TABLE IF NOT EXISTS tickets (
        id SERIAL PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES projects (id) ON DELETE CASCADE,
        created_user_id INTEGER NOT NULL REFERENCES user_accounts (id) ON DELETE CASCADE,
        index_in_project INTEGER NOT NULL CHECK (index_in_project > 0),
        title TEXT NOT NULL,
        UNIQUE (project_id, index_in_project)
    )",
    "CREATE TABLE IF NOT EXISTS metrics (
        id SERIAL PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES projects (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        UNIQUE (project_id, title)
    )",
    "CREATE TABLE IF NOT EXISTS metric_options (
        id SERIAL PRIMARY KEY,
        metric_id INTEGER NOT NULL REFERENCES metrics (id) ON DELETE CASCADE,
        index_in_metric INTEGER NOT NULL CHECK (index_in_metric > 0),
        option_string TEXT NOT NULL,
        UNIQUE (metric_id, index_in_metric)
    )",
    "CREATE TABLE IF NOT EXISTS user_projects (
        user_id INTEGER NOT NULL REFERENCES user_accounts (id) ON DELETE CASCADE,
        project_id INTEGER NOT NULL REFERENCES projects (id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, project_id)
    )",
    "CREATE TABLE IF NOT EXISTS ticket_assignees (
        ticket_id INTEGER NOT NULL REFERENCES tickets (id) ON DELETE CASCADE,
        assignee_user_id INTEGER NOT NULL REFERENCES user_accounts (id) ON DELETE CASCADE,
        PRIMARY KEY (ticket_id, assignee_user_id)
    )",
];

/// Create any missing table.
///
/// Concurrent callers may race on `CREATE TABLE IF NOT EXISTS`; the loser
/// sees a catalog unique violation or a duplicate table, both ignored as
/// "already created".
pub async fn ensure_schema(db: &DbClient) -> ApiResult<()> {
    let conn = db.get_conn().await?;
    for statement in SCHEMA_STATEMENTS {
        if let Err(e) = conn.batch_execute(statement).await {
            let raced = e.code().is_some_and(|code| {
                *code == SqlState::UNIQUE_VIOLATION || *code == SqlState::DUPLICATE_TABLE
            });
            if raced {
                tracing::debug!("Table created concurrently");
                continue;
            }
            return Err(e.into());
        }
    }
    tracing::info!(tables = SCHEMA_STATEMENTS.len(), "Schema ready");
    Ok(())
}
