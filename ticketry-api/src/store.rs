//! Row Store Access
//!
//! Generic statements over any whitelisted table. Every function takes a
//! `GenericClient`, so the same code runs on a pooled connection or inside
//! a transaction.

use std::collections::BTreeSet;

use deadpool_postgres::GenericClient;
use ticketry_core::{Column, DataTable, RelationTable, RowId, UpdateSet};
use tokio_postgres::Row;

use crate::component::{param_refs, Component, InsertValues, Relation, SqlParam};
use crate::error::{ApiError, ApiResult};

// ============================================================================
// STATEMENT TEXT
// ============================================================================

fn select_sql(table: DataTable) -> String {
    format!("SELECT * FROM {} ORDER BY id", table.as_str())
}

fn select_by_ids_sql(table: DataTable) -> String {
    format!(
        "SELECT * FROM {} WHERE id = ANY($1) ORDER BY id",
        table.as_str()
    )
}

fn select_one_sql(table: DataTable, for_update: bool) -> String {
    format!(
        "SELECT * FROM {} WHERE id = $1{}",
        table.as_str(),
        if for_update { " FOR UPDATE" } else { "" }
    )
}

fn insert_sql(table: &str, columns: &[Column]) -> String {
    let names = columns
        .iter()
        .map(Column::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table, names, placeholders
    )
}

/// Decode the single row a statement must produce.
fn exactly_one<T>(
    rows: Vec<Row>,
    what: &str,
    decode: impl Fn(&Row) -> ApiResult<T>,
) -> ApiResult<T> {
    match rows.as_slice() {
        [row] => decode(row),
        other => Err(ApiError::integrity_violation(format!(
            "{} returned {} rows, expected exactly one",
            what,
            other.len()
        ))),
    }
}

// ============================================================================
// DATA TABLES
// ============================================================================

pub async fn exists<G>(client: &G, table: DataTable, id: RowId) -> ApiResult<bool>
where
    G: GenericClient,
{
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table.as_str());
    let row = client.query_one(sql.as_str(), &[&id]).await?;
    Ok(row.try_get(0)?)
}

/// Fetch rows by id set, ordered by id. `None` fetches the whole table.
///
/// Ids without a row are skipped; the caller compares counts when it cares.
pub async fn fetch_by_ids<C, G>(client: &G, ids: Option<&[RowId]>) -> ApiResult<Vec<C>>
where
    C: Component,
    G: GenericClient,
{
    let rows = match ids {
        None => {
            let sql = select_sql(C::TABLE);
            client.query(sql.as_str(), &[]).await?
        }
        Some(ids) => {
            let sql = select_by_ids_sql(C::TABLE);
            let id_list = ids.to_vec();
            client.query(sql.as_str(), &[&id_list]).await?
        }
    };

    let entities = rows.iter().map(C::from_row).collect::<ApiResult<Vec<C>>>()?;

    if let Some(ids) = ids {
        let requested = ids.iter().collect::<BTreeSet<_>>().len();
        if entities.len() < requested {
            tracing::warn!(
                table = %C::TABLE,
                requested,
                found = entities.len(),
                "Some requested rows do not exist"
            );
        }
    }

    Ok(entities)
}

pub async fn fetch_one<C, G>(client: &G, id: RowId) -> ApiResult<Option<C>>
where
    C: Component,
    G: GenericClient,
{
    let sql = select_one_sql(C::TABLE, false);
    client
        .query_opt(sql.as_str(), &[&id])
        .await?
        .as_ref()
        .map(C::from_row)
        .transpose()
}

/// Fetch one row and hold a row lock on it until the transaction ends.
///
/// Outside a transaction the lock is released as soon as the statement
/// completes.
pub async fn lock_one<C, G>(client: &G, id: RowId) -> ApiResult<Option<C>>
where
    C: Component,
    G: GenericClient,
{
    let sql = select_one_sql(C::TABLE, true);
    client
        .query_opt(sql.as_str(), &[&id])
        .await?
        .as_ref()
        .map(C::from_row)
        .transpose()
}

/// Insert one row and return it as stored.
pub async fn insert_row<C, G>(client: &G, values: InsertValues) -> ApiResult<C>
where
    C: Component,
    G: GenericClient,
{
    let columns = values.iter().map(|(column, _)| *column).collect::<Vec<_>>();
    for column in &columns {
        C::TABLE.check_column(*column)?;
    }

    let sql = insert_sql(C::TABLE.as_str(), &columns);
    let params = values.into_iter().map(|(_, param)| param).collect::<Vec<_>>();
    let rows = client.query(sql.as_str(), &param_refs(&params)).await?;

    let entity = exactly_one(rows, C::TABLE.entity_name(), C::from_row)?;
    tracing::info!(table = %C::TABLE, id = entity.row_id(), "Row created");
    Ok(entity)
}

/// Apply a validated update. Zero affected rows means the id does not exist.
pub async fn update_row<C, G>(client: &G, id: RowId, set: &UpdateSet) -> ApiResult<C>
where
    C: Component,
    G: GenericClient,
{
    if set.table() != C::TABLE {
        return Err(ApiError::internal_error(format!(
            "Update built for {} applied to {}",
            set.table(),
            C::TABLE
        )));
    }

    let params = set
        .assignments()
        .iter()
        .map(|(_, value)| SqlParam::from(value))
        .chain(std::iter::once(SqlParam::Int(id)))
        .collect::<Vec<_>>();

    let sql = set.statement();
    let rows = client.query(sql.as_str(), &param_refs(&params)).await?;
    if rows.is_empty() {
        return Err(C::not_found_error(id));
    }
    exactly_one(rows, C::TABLE.entity_name(), C::from_row)
}

/// Delete by id. Zero affected rows means the id does not exist.
pub async fn delete_row<G>(client: &G, table: DataTable, id: RowId) -> ApiResult<()>
where
    G: GenericClient,
{
    let sql = format!("DELETE FROM {} WHERE id = $1", table.as_str());
    match client.execute(sql.as_str(), &[&id]).await? {
        0 => Err(ApiError::entity_not_found(table.entity_name(), id)),
        1 => {
            tracing::info!(table = %table, id, "Row deleted");
            Ok(())
        }
        n => Err(ApiError::integrity_violation(format!(
            "Deleting {} {} removed {} rows",
            table.entity_name(),
            id,
            n
        ))),
    }
}

// ============================================================================
// RELATION TABLES
// ============================================================================

pub async fn fetch_relations<R, G>(client: &G) -> ApiResult<Vec<R>>
where
    R: Relation,
    G: GenericClient,
{
    let [first, second] = R::TABLE.columns();
    let sql = format!(
        "SELECT * FROM {} ORDER BY {}, {}",
        R::TABLE.as_str(),
        first.as_str(),
        second.as_str()
    );
    let rows = client.query(sql.as_str(), &[]).await?;
    rows.iter().map(R::from_row).collect()
}

/// Rows of a join table with `column = value`.
pub async fn fetch_relations_where<R, G>(
    client: &G,
    column: Column,
    value: RowId,
) -> ApiResult<Vec<R>>
where
    R: Relation,
    G: GenericClient,
{
    R::TABLE.check_column(column)?;
    let sql = format!(
        "SELECT * FROM {} WHERE {} = $1",
        R::TABLE.as_str(),
        column.as_str()
    );
    let rows = client.query(sql.as_str(), &[&value]).await?;
    rows.iter().map(R::from_row).collect()
}

pub async fn insert_pair<R, G>(client: &G, first: RowId, second: RowId) -> ApiResult<R>
where
    R: Relation,
    G: GenericClient,
{
    let table: RelationTable = R::TABLE;
    let sql = insert_sql(table.as_str(), &table.columns());
    let rows = client.query(sql.as_str(), &[&first, &second]).await?;

    let pair = exactly_one(rows, table.entity_name(), R::from_row)?;
    tracing::info!(table = %table, first, second, "Pair created");
    Ok(pair)
}
