//! Metric Service
//!
//! Metric titles are unique within a project.

use ticketry_core::{Column, DataTable, Metric, NewMetric, RowId, UpdateSet};

use crate::component::{Component, SqlParam};
use crate::db::DbClient;
use crate::error::ApiResult;
use crate::{guards, store};

pub async fn create_metric(db: &DbClient, req: NewMetric) -> ApiResult<Metric> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            guards::assert_exists(tx, DataTable::Projects, req.project_id).await?;
            guards::assert_unique_sibling(
                tx,
                DataTable::Metrics,
                Column::ProjectId,
                req.project_id,
                Column::Title,
                &req.title,
                None,
            )
            .await?;

            store::insert_row::<Metric, _>(
                tx,
                vec![
                    (Column::ProjectId, SqlParam::Int(req.project_id)),
                    (Column::Title, SqlParam::String(req.title)),
                ],
            )
            .await
        })
    })
    .await
}

/// Rename a metric, keeping titles unique within its project.
pub async fn update_metric(db: &DbClient, id: RowId, set: UpdateSet) -> ApiResult<Metric> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            let current = store::lock_one::<Metric, _>(tx, id)
                .await?
                .ok_or_else(|| Metric::not_found_error(id))?;

            if let Some(title) = set.text(Column::Title) {
                if title != current.title {
                    guards::assert_unique_sibling(
                        tx,
                        DataTable::Metrics,
                        Column::ProjectId,
                        current.project_id,
                        Column::Title,
                        title,
                        Some(id),
                    )
                    .await?;
                }
            }

            store::update_row::<Metric, _>(tx, id, &set).await
        })
    })
    .await
}
