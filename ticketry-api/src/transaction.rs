//! Transactional Composer
//!
//! Runs a multi-statement operation on one pooled connection between
//! `BEGIN` and `COMMIT`. Any error rolls the whole operation back.

use deadpool_postgres::Transaction;
use futures_util::future::BoxFuture;

use crate::db::DbClient;
use crate::error::ApiResult;

impl DbClient {
    /// Run `body` inside a transaction.
    ///
    /// The body receives the open transaction and returns a boxed future
    /// borrowing it:
    ///
    /// ```ignore
    /// let ticket = db
    ///     .run_transactional(move |tx| {
    ///         Box::pin(async move {
    ///             let scope = OrderedScope::TicketsInProject;
    ///             let index = sequencing::next_index(tx, scope, project_id).await?;
    ///             store::insert_row::<Ticket, _>(tx, values(index)).await
    ///         })
    ///     })
    ///     .await?;
    /// ```
    ///
    /// On success the transaction is committed and the body's value is
    /// returned. On failure it is rolled back and the body's error is
    /// returned; a failing rollback is logged and never replaces that
    /// error. The connection goes back to the pool in every case.
    pub async fn run_transactional<T, F>(&self, body: F) -> ApiResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c Transaction<'_>) -> BoxFuture<'c, ApiResult<T>> + Send,
    {
        let mut conn = self.get_conn().await?;
        let tx = conn.transaction().await?;

        match body(&tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(
                        error = %rollback_err,
                        original = %err,
                        "Transaction rollback failed"
                    );
                } else {
                    tracing::debug!(error = %err, "Transaction rolled back");
                }
                Err(err)
            }
        }
    }
}
