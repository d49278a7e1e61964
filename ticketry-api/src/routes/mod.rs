//! REST API Routes Module
//!
//! One module per entity plus the relation pairs and health checks. The
//! full router adds CORS and the request tracing middleware.

pub mod generic;
pub mod health;
pub mod metric_options;
pub mod metrics;
pub mod projects;
pub mod relations;
pub mod tickets;
pub mod users;

use std::time::Duration;

use axum::{
    http::{header, Method},
    middleware::from_fn,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::db::DbClient;
use crate::state::AppState;
use crate::telemetry::observability_middleware;

#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins = config
            .cors_origins
            .iter()
            .filter(|origin| !origin.starts_with("*."))
            .filter_map(|origin| origin.parse().ok())
            .collect::<Vec<_>>();
        let has_wildcards = config.cors_origins.iter().any(|o| o.starts_with("*."));

        if has_wildcards {
            let matcher = config.clone();
            cors.allow_origin(tower_http::cors::AllowOrigin::predicate(
                move |origin, _parts| {
                    origin
                        .to_str()
                        .map(|o| matcher.is_origin_allowed(o))
                        .unwrap_or(false)
                },
            ))
        } else {
            cors.allow_origin(origins)
        }
    }
}

/// Entity and health routes bound to their state, without outer layers.
pub fn entity_routes(db: DbClient) -> Router {
    let router = Router::new()
        .nest("/users", users::create_router())
        .nest("/projects", projects::create_router())
        .nest("/tickets", tickets::create_router())
        .nest("/metrics", metrics::create_router())
        .nest("/metric-options", metric_options::create_router())
        .nest("/user-projects", relations::user_projects_router())
        .nest("/ticket-assignees", relations::ticket_assignees_router())
        .nest("/health", health::create_router());

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", axum::routing::get(openapi_json));

    router.with_state(AppState::new(db))
}

/// Create the complete API router.
///
/// - Entity CRUD under `/users`, `/projects`, `/tickets`, `/metrics`,
///   `/metric-options`, `/user-projects`, `/ticket-assignees`
/// - Health checks at `/health/*`
/// - OpenAPI spec at `/openapi.json` (feature `openapi`)
pub fn create_api_router(db: DbClient, api_config: &ApiConfig) -> Router {
    entity_routes(db)
        .layer(from_fn(observability_middleware))
        .layer(build_cors_layer(api_config))
}
