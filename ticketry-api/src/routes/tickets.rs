//! Ticket REST API Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use ticketry_core::{NewTicket, Ticket};

use super::generic::{self, UpdateBody};
use crate::{
    db::DbClient,
    error::ApiResult,
    extractors::{ApiJson, ApiQuery, PathId},
    services::ticket_service,
    state::AppState,
    types::{created, Envelope, ListQuery},
};

/// POST /tickets - Create a ticket at the end of its project
///
/// `index_in_project` is assigned by the server.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/tickets",
    tag = "Tickets",
    request_body = NewTicket,
    responses(
        (status = 201, description = "Ticket created", body = Ticket),
        (status = 422, description = "Project or creator does not exist"),
    ),
))]
pub async fn create_ticket(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<NewTicket>,
) -> ApiResult<(StatusCode, Envelope<Ticket>)> {
    let ticket = ticket_service::create_ticket(&db, req).await?;
    Ok(created(ticket))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/tickets",
    tag = "Tickets",
    params(ListQuery),
    responses((status = 200, description = "Tickets ordered by id", body = [Ticket])),
))]
pub async fn list_tickets(
    State(db): State<DbClient>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Envelope<Vec<Ticket>>> {
    generic::list_handler::<Ticket>(&db, &query).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Ticket not found"),
    ),
))]
pub async fn get_ticket(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<Ticket>> {
    generic::get_handler::<Ticket>(&db, id).await
}

/// PUT /tickets/{id} - Retitle a ticket
///
/// Project, creator and index are fixed at creation.
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Updated ticket", body = Ticket),
        (status = 400, description = "Immutable, unknown or malformed field"),
        (status = 404, description = "Ticket not found"),
    ),
))]
pub async fn update_ticket(
    State(db): State<DbClient>,
    PathId(id): PathId,
    ApiJson(body): ApiJson<UpdateBody>,
) -> ApiResult<Envelope<Ticket>> {
    generic::update_handler::<Ticket>(&db, id, &body).await
}

/// DELETE /tickets/{id} - Sibling indices are left as they are
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/tickets/{id}",
    tag = "Tickets",
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found"),
    ),
))]
pub async fn delete_ticket(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<()>> {
    generic::delete_handler::<Ticket>(&db, id).await
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route(
            "/:id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}
