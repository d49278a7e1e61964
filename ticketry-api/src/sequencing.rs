//! Sequencing Engine
//!
//! Assigns the next dense index inside an ordered scope. Must run inside
//! the transaction that inserts the child: the parent row lock taken here
//! serializes concurrent creations in the same scope until that
//! transaction ends.

use deadpool_postgres::GenericClient;
use ticketry_core::{ordering, OrderedScope, RowId, SequenceIndex};

use crate::error::{ApiError, ApiResult};

fn lock_parent_sql(scope: OrderedScope) -> String {
    format!(
        "SELECT id FROM {} WHERE id = $1 FOR UPDATE",
        scope.parent_table().as_str()
    )
}

fn existing_indices_sql(scope: OrderedScope) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        scope.index_column().as_str(),
        scope.child_table().as_str(),
        scope.scope_column().as_str()
    )
}

/// Lock the scope's parent row and compute the index for a new child.
///
/// A missing parent fails with ReferenceNotFound, so callers need no
/// separate existence check for it.
pub async fn next_index<G>(
    client: &G,
    scope: OrderedScope,
    scope_value: RowId,
) -> ApiResult<SequenceIndex>
where
    G: GenericClient,
{
    let parent = client
        .query_opt(lock_parent_sql(scope).as_str(), &[&scope_value])
        .await?;
    if parent.is_none() {
        return Err(ApiError::reference_not_found(
            scope.parent_table().entity_name(),
            scope_value,
        ));
    }

    let rows = client
        .query(existing_indices_sql(scope).as_str(), &[&scope_value])
        .await?;
    let existing = rows
        .iter()
        .map(|row| row.try_get::<_, SequenceIndex>(0))
        .collect::<Result<Vec<_>, _>>()?;

    let next = ordering::next_index(existing);
    tracing::debug!(?scope, scope_value, next, "Assigned sequence index");
    Ok(next)
}
