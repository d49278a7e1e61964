//! Metric Option REST API Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use ticketry_core::{MetricOption, NewMetricOption};

use super::generic::{self, UpdateBody};
use crate::{
    db::DbClient,
    error::ApiResult,
    extractors::{ApiJson, ApiQuery, PathId},
    services::metric_option_service,
    state::AppState,
    types::{created, Envelope, ListQuery},
};

/// POST /metric-options - Append an option to a metric
///
/// `index_in_metric` is assigned by the server.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/metric-options",
    tag = "Metric Options",
    request_body = NewMetricOption,
    responses(
        (status = 201, description = "Option created", body = MetricOption),
        (status = 422, description = "Metric does not exist"),
    ),
))]
pub async fn create_metric_option(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<NewMetricOption>,
) -> ApiResult<(StatusCode, Envelope<MetricOption>)> {
    let option = metric_option_service::create_metric_option(&db, req).await?;
    Ok(created(option))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/metric-options",
    tag = "Metric Options",
    params(ListQuery),
    responses((status = 200, description = "Options ordered by id", body = [MetricOption])),
))]
pub async fn list_metric_options(
    State(db): State<DbClient>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Envelope<Vec<MetricOption>>> {
    generic::list_handler::<MetricOption>(&db, &query).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/metric-options/{id}",
    tag = "Metric Options",
    params(("id" = i32, Path, description = "Metric option ID")),
    responses(
        (status = 200, description = "Option", body = MetricOption),
        (status = 404, description = "Option not found"),
    ),
))]
pub async fn get_metric_option(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<MetricOption>> {
    generic::get_handler::<MetricOption>(&db, id).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/metric-options/{id}",
    tag = "Metric Options",
    params(("id" = i32, Path, description = "Metric option ID")),
    responses(
        (status = 200, description = "Updated option", body = MetricOption),
        (status = 400, description = "Immutable, unknown or malformed field"),
        (status = 404, description = "Option not found"),
    ),
))]
pub async fn update_metric_option(
    State(db): State<DbClient>,
    PathId(id): PathId,
    ApiJson(body): ApiJson<UpdateBody>,
) -> ApiResult<Envelope<MetricOption>> {
    generic::update_handler::<MetricOption>(&db, id, &body).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/metric-options/{id}",
    tag = "Metric Options",
    params(("id" = i32, Path, description = "Metric option ID")),
    responses(
        (status = 200, description = "Option deleted"),
        (status = 404, description = "Option not found"),
    ),
))]
pub async fn delete_metric_option(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<()>> {
    generic::delete_handler::<MetricOption>(&db, id).await
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_metric_options).post(create_metric_option))
        .route(
            "/:id",
            get(get_metric_option)
                .put(update_metric_option)
                .delete(delete_metric_option),
        )
}
