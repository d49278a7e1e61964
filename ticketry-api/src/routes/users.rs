//! User REST API Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use ticketry_core::{NewUserAccount, UserAccount};

use super::generic::{self, UpdateBody};
use crate::{
    db::DbClient,
    error::ApiResult,
    extractors::{ApiJson, ApiQuery, PathId},
    services::user_service,
    state::AppState,
    types::{created, Envelope, ListQuery, UserListQuery},
};

/// POST /users - Register a user
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUserAccount,
    responses(
        (status = 201, description = "User created", body = UserAccount),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Username already taken"),
    ),
))]
pub async fn create_user(
    State(db): State<DbClient>,
    ApiJson(req): ApiJson<NewUserAccount>,
) -> ApiResult<(StatusCode, Envelope<UserAccount>)> {
    let user = user_service::create_user(&db, req).await?;
    Ok(created(user))
}

/// GET /users - List users, optionally only the members of a project
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Users ordered by id", body = [UserAccount]),
        (status = 400, description = "Malformed query"),
    ),
))]
pub async fn list_users(
    State(db): State<DbClient>,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> ApiResult<Envelope<Vec<UserAccount>>> {
    let ids = query.id_filter()?;
    let Some(project_id) = query.project_id else {
        return generic::list_handler::<UserAccount>(&db, &ListQuery { ids: query.ids }).await;
    };

    let mut users = user_service::users_for_project(&db, project_id).await?;
    if let Some(ids) = ids {
        users.retain(|user| ids.contains(&user.id));
    }
    Ok(Envelope::success(users))
}

/// GET /users/{id}
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserAccount),
        (status = 404, description = "User not found"),
    ),
))]
pub async fn get_user(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<UserAccount>> {
    generic::get_handler::<UserAccount>(&db, id).await
}

/// PUT /users/{id} - Edit username or display name
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Updated user", body = UserAccount),
        (status = 400, description = "Immutable, unknown or malformed field"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken"),
    ),
))]
pub async fn update_user(
    State(db): State<DbClient>,
    PathId(id): PathId,
    ApiJson(body): ApiJson<UpdateBody>,
) -> ApiResult<Envelope<UserAccount>> {
    let set = generic::update_set::<UserAccount>(&body)?;
    let user = user_service::update_user(&db, id, set).await?;
    Ok(Envelope::success(user))
}

/// DELETE /users/{id}
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted with everything it owns"),
        (status = 404, description = "User not found"),
    ),
))]
pub async fn delete_user(
    State(db): State<DbClient>,
    PathId(id): PathId,
) -> ApiResult<Envelope<()>> {
    generic::delete_handler::<UserAccount>(&db, id).await
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}
