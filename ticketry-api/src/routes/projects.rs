//! Project REST API Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use ticketry_core::{NewProject, Project, ProjectWithMembership};

use super::generic::{self, UpdateBody};
use crate::{
    db::DbClient,
    error::ApiResult,
    extractors::{ApiJson, ApiQuery, PathId},
    services::project_service,
    state::AppState,
    types::{created, Envelope, ListQuery},
};

/// POST /projects - Create a project owned by an existing user
///
/// The owner becomes the first member in the same transaction.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = NewProject,
    responses(
        (status = 201, description = "Project and owner membership", body = ProjectWithMembership),
        (status = 409, description = "Owner already has a project with this name"),
        (status = 422, description = "Owner does not exist"),
    ),
))]
pub async fn create_project(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<NewProject>,
) -> ApiResult<(StatusCode, Envelope<ProjectWithMembership>)> {
    let created_project = project_service::create_project(&db, req).await?;
    Ok(created(created_project))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    params(ListQuery),
    responses((status = 200, description = "Projects ordered by id", body = [Project])),
))]
pub async fn list_projects(
    State(db): State<DbClient>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Envelope<Vec<Project>>> {
    generic::list_handler::<Project>(&db, &query).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Project not found"),
    ),
))]
pub async fn get_project(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<Project>> {
    generic::get_handler::<Project>(&db, id).await
}

/// PUT /projects/{id} - Rename a project or hand it to another owner
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Updated project", body = Project),
        (status = 400, description = "Immutable, unknown or malformed field"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Owner already has a project with this name"),
        (status = 422, description = "New owner does not exist"),
    ),
))]
pub async fn update_project(
    State(db): State<DbClient>,
    PathId(id): PathId,
    ApiJson(body): ApiJson<UpdateBody>,
) -> ApiResult<Envelope<Project>> {
    let set = generic::update_set::<Project>(&body)?;
    let project = project_service::update_project(&db, id, set).await?;
    Ok(Envelope::success(project))
}

/// DELETE /projects/{id} - Delete a project with its tickets, metrics and memberships
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 404, description = "Project not found"),
    ),
))]
pub async fn delete_project(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<()>> {
    generic::delete_handler::<Project>(&db, id).await
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}
