//! Metric REST API Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use ticketry_core::{Metric, NewMetric};

use super::generic::{self, UpdateBody};
use crate::{
    db::DbClient,
    error::ApiResult,
    extractors::{ApiJson, ApiQuery, PathId},
    services::metric_service,
    state::AppState,
    types::{created, Envelope, ListQuery},
};

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/metrics",
    tag = "Metrics",
    request_body = NewMetric,
    responses(
        (status = 201, description = "Metric created", body = Metric),
        (status = 409, description = "Project already has a metric with this title"),
        (status = 422, description = "Project does not exist"),
    ),
))]
pub async fn create_metric(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<NewMetric>,
) -> ApiResult<(StatusCode, Envelope<Metric>)> {
    let metric = metric_service::create_metric(&db, req).await?;
    Ok(created(metric))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/metrics",
    tag = "Metrics",
    params(ListQuery),
    responses((status = 200, description = "Metrics ordered by id", body = [Metric])),
))]
pub async fn list_metrics(
    State(db): State<DbClient>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Envelope<Vec<Metric>>> {
    generic::list_handler::<Metric>(&db, &query).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/metrics/{id}",
    tag = "Metrics",
    params(("id" = i32, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Metric", body = Metric),
        (status = 404, description = "Metric not found"),
    ),
))]
pub async fn get_metric(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<Metric>> {
    generic::get_handler::<Metric>(&db, id).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/metrics/{id}",
    tag = "Metrics",
    params(("id" = i32, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Updated metric", body = Metric),
        (status = 400, description = "Immutable, unknown or malformed field"),
        (status = 404, description = "Metric not found"),
        (status = 409, description = "Project already has a metric with this title"),
    ),
))]
pub async fn update_metric(
    State(db): State<DbClient>,
    PathId(id): PathId,
    ApiJson(body): ApiJson<UpdateBody>,
) -> ApiResult<Envelope<Metric>> {
    let set = generic::update_set::<Metric>(&body)?;
    let metric = metric_service::update_metric(&db, id, set).await?;
    Ok(Envelope::success(metric))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/metrics/{id}",
    tag = "Metrics",
    params(("id" = i32, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Metric and its options deleted"),
        (status = 404, description = "Metric not found"),
    ),
))]
pub async fn delete_metric(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<()>> {
    generic::delete_handler::<Metric>(&db, id).await
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_metrics).post(create_metric))
        .route(
            "/:id",
            get(get_metric).put(update_metric).delete(delete_metric),
        )
}
