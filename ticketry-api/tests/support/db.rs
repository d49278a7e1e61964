use ticketry_api::db::{DbClient, DbConfig};
use ticketry_api::{ensure_schema, ApiResult};

/// Fresh client with the schema in place.
///
/// One client per test: pooled connections are bound to the runtime of the
/// test that opened them.
pub async fn test_db() -> ApiResult<DbClient> {
    let config = DbConfig::from_env();
    let db = DbClient::from_config(&config)?;
    ensure_schema(&db).await?;
    Ok(db)
}
