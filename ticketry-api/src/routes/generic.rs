//! Generic route handler helpers for Component and Relation types.
//!
//! Entity route files keep their own documented handlers and delegate the
//! shared read, edit and delete paths here.
//!
//! ```ignore
//! pub async fn get_metric(
//!     State(db): State<DbClient>,
//!     PathId(id): PathId,
//! ) -> ApiResult<Envelope<Metric>> {
//!     generic::get_handler::<Metric>(&db, id).await
//! }
//! ```

use serde_json::{Map, Value as JsonValue};
use ticketry_core::{RowId, UpdateSet};

use crate::{
    component::{Component, Relation},
    db::DbClient,
    error::ApiResult,
    types::{Envelope, ListQuery},
};

/// JSON object accepted by `PUT /<entity>/:id`.
pub type UpdateBody = Map<String, JsonValue>;

/// Validate an edit body against the component's field sets.
///
/// Runs before any database call: immutable fields, unknown fields, bad
/// value types and empty bodies are rejected here.
pub fn update_set<C: Component>(body: &UpdateBody) -> ApiResult<UpdateSet> {
    Ok(UpdateSet::from_json(C::TABLE, body)?)
}

/// List rows, optionally restricted to `?ids=`.
pub async fn list_handler<C: Component>(
    db: &DbClient,
    query: &ListQuery,
) -> ApiResult<Envelope<Vec<C>>> {
    let ids = query.id_filter()?;
    let rows = db.list::<C>(ids.as_deref()).await?;
    Ok(Envelope::success(rows))
}

pub async fn get_handler<C: Component>(db: &DbClient, id: RowId) -> ApiResult<Envelope<C>> {
    Ok(Envelope::success(db.get::<C>(id).await?))
}

/// Edit for tables whose mutable fields carry no guard.
pub async fn update_handler<C: Component>(
    db: &DbClient,
    id: RowId,
    body: &UpdateBody,
) -> ApiResult<Envelope<C>> {
    let set = update_set::<C>(body)?;
    Ok(Envelope::success(db.update::<C>(id, &set).await?))
}

pub async fn delete_handler<C: Component>(db: &DbClient, id: RowId) -> ApiResult<Envelope<()>> {
    db.delete::<C>(id).await?;
    Ok(Envelope::done())
}

pub async fn list_relations_handler<R: Relation>(db: &DbClient) -> ApiResult<Envelope<Vec<R>>> {
    Ok(Envelope::success(db.list_relations::<R>().await?))
}
