//! Path extractor for integer row ids.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use ticketry_core::RowId;

use crate::error::ApiError;

/// Extractor for the `:id` path parameter.
///
/// Unlike `Path<i32>`, a malformed id is rejected with an `InvalidFormat`
/// failure envelope naming the offending path.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_ticket(
///     State(db): State<DbClient>,
///     PathId(id): PathId,
/// ) -> ApiResult<Envelope<Ticket>> {
///     Ok(Envelope::success(db.get::<Ticket>(id).await?))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub RowId);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<RowId> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::invalid_format(
                    "id",
                    &format!("integer id in path '{}' ({})", parts.uri.path(), e.body_text()),
                )
            })?;

        Ok(PathId(id))
    }
}
