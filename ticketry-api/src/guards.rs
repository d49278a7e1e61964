//! Uniqueness & Referential Guards
//!
//! Checks run before a mutation so that a violated rule surfaces as a
//! typed error naming the offending value. The schema's own constraints
//! stay in place as a backstop for races between check and write.

use deadpool_postgres::GenericClient;
use ticketry_core::{Column, DataTable, RelationTable, RowId};

use crate::error::{ApiError, ApiResult};
use crate::store;

/// Fail with ReferenceNotFound when `table` has no row `id`.
pub async fn assert_exists<G>(client: &G, table: DataTable, id: RowId) -> ApiResult<()>
where
    G: GenericClient,
{
    if store::exists(client, table, id).await? {
        Ok(())
    } else {
        Err(ApiError::reference_not_found(table.entity_name(), id))
    }
}

/// Fail with a conflict when a sibling sharing `scope_value` already uses
/// `value` in `unique_column`.
///
/// `exclude_id` skips the row being edited so it does not collide with
/// itself.
pub async fn assert_unique_sibling<G>(
    client: &G,
    table: DataTable,
    scope_column: Column,
    scope_value: RowId,
    unique_column: Column,
    value: &str,
    exclude_id: Option<RowId>,
) -> ApiResult<()>
where
    G: GenericClient,
{
    table.check_column(scope_column)?;
    table.check_column(unique_column)?;

    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND {} = $2 \
         AND ($3::INTEGER IS NULL OR id <> $3))",
        table.as_str(),
        scope_column.as_str(),
        unique_column.as_str()
    );
    let row = client
        .query_one(sql.as_str(), &[&scope_value, &value, &exclude_id])
        .await?;

    if row.try_get::<_, bool>(0)? {
        Err(ApiError::conflict(format!(
            "{} with {} '{}' already exists for {} {}",
            table.entity_name(),
            unique_column,
            value,
            scope_column,
            scope_value
        )))
    } else {
        Ok(())
    }
}

/// Fail with a conflict when any row of `table` already uses `value`.
pub async fn assert_unique<G>(
    client: &G,
    table: DataTable,
    column: Column,
    value: &str,
    exclude_id: Option<RowId>,
) -> ApiResult<()>
where
    G: GenericClient,
{
    table.check_column(column)?;

    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND ($2::INTEGER IS NULL OR id <> $2))",
        table.as_str(),
        column.as_str()
    );
    let row = client.query_one(sql.as_str(), &[&value, &exclude_id]).await?;

    if row.try_get::<_, bool>(0)? {
        Err(ApiError::conflict(format!(
            "{} with {} '{}' already exists",
            table.entity_name(),
            column,
            value
        )))
    } else {
        Ok(())
    }
}

/// Fail with a conflict when the exact pair is already present.
pub async fn assert_pair_absent<G>(
    client: &G,
    table: RelationTable,
    first_value: RowId,
    second_value: RowId,
) -> ApiResult<()>
where
    G: GenericClient,
{
    let [first, second] = table.columns();
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND {} = $2)",
        table.as_str(),
        first.as_str(),
        second.as_str()
    );
    let row = client
        .query_one(sql.as_str(), &[&first_value, &second_value])
        .await?;

    if row.try_get::<_, bool>(0)? {
        Err(ApiError::conflict(format!(
            "{} ({} {}, {} {}) already exists",
            table.entity_name(),
            first,
            first_value,
            second,
            second_value
        )))
    } else {
        Ok(())
    }
}

/// Check both referenced rows of a pair, then that the pair is new.
pub async fn assert_pair_insertable<G>(
    client: &G,
    table: RelationTable,
    first_value: RowId,
    second_value: RowId,
) -> ApiResult<()>
where
    G: GenericClient,
{
    let [first_table, second_table] = table.referenced_tables();
    assert_exists(client, first_table, first_value).await?;
    assert_exists(client, second_table, second_value).await?;
    assert_pair_absent(client, table, first_value, second_value).await
}
