//! Metric Option Service

use ticketry_core::{Column, MetricOption, NewMetricOption, OrderedScope};

use crate::component::SqlParam;
use crate::db::DbClient;
use crate::error::ApiResult;
use crate::{sequencing, store};

/// Append an option to its metric. The first option of a metric gets 1.
pub async fn create_metric_option(db: &DbClient, req: NewMetricOption) -> ApiResult<MetricOption> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            let index =
                sequencing::next_index(tx, OrderedScope::OptionsInMetric, req.metric_id).await?;

            store::insert_row::<MetricOption, _>(
                tx,
                vec![
                    (Column::MetricId, SqlParam::Int(req.metric_id)),
                    (Column::IndexInMetric, SqlParam::Int(index)),
                    (Column::OptionString, SqlParam::String(req.option_string)),
                ],
            )
            .await
        })
    })
    .await
}
