//! Membership and Assignment REST API Routes
//!
//! Pairs are created and listed only; they have no id of their own.

use axum::{extract::State, http::StatusCode, routing::get, Router};
use ticketry_core::{TicketAssignee, UserProject};

use super::generic;
use crate::{
    db::DbClient,
    error::ApiResult,
    extractors::ApiJson,
    services::pair_service,
    state::AppState,
    types::{created, Envelope},
};

/// POST /user-projects - Grant a user access to a project
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/user-projects",
    tag = "Relations",
    request_body = UserProject,
    responses(
        (status = 201, description = "Membership created", body = UserProject),
        (status = 409, description = "Membership already exists"),
        (status = 422, description = "User or project does not exist"),
    ),
))]
pub async fn create_user_project(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<UserProject>,
) -> ApiResult<(StatusCode, Envelope<UserProject>)> {
    let pair = pair_service::create_user_project(&db, req).await?;
    Ok(created(pair))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/user-projects",
    tag = "Relations",
    responses((status = 200, description = "All memberships", body = [UserProject])),
))]
pub async fn list_user_projects(
    State(db): State<DbClient>,
) -> ApiResult<Envelope<Vec<UserProject>>> {
    generic::list_relations_handler::<UserProject>(&db).await
}

/// POST /ticket-assignees - Assign a user to a ticket
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/ticket-assignees",
    tag = "Relations",
    request_body = TicketAssignee,
    responses(
        (status = 201, description = "Assignment created", body = TicketAssignee),
        (status = 409, description = "Assignment already exists"),
        (status = 422, description = "Ticket or user does not exist"),
    ),
))]
pub async fn create_ticket_assignee(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<TicketAssignee>,
) -> ApiResult<(StatusCode, Envelope<TicketAssignee>)> {
    let pair = pair_service::create_ticket_assignee(&db, req).await?;
    Ok(created(pair))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/ticket-assignees",
    tag = "Relations",
    responses((status = 200, description = "All assignments", body = [TicketAssignee])),
))]
pub async fn list_ticket_assignees(
    State(db): State<DbClient>,
) -> ApiResult<Envelope<Vec<TicketAssignee>>> {
    generic::list_relations_handler::<TicketAssignee>(&db).await
}

pub fn user_projects_router() -> Router<AppState> {
    Router::new().route("/", get(list_user_projects).post(create_user_project))
}

pub fn ticket_assignees_router() -> Router<AppState> {
    Router::new().route("/", get(list_ticket_assignees).post(create_ticket_assignee))
}
