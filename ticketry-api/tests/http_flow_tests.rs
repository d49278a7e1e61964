//! End-to-end requests through the full router against a live database.

#![cfg(feature = "db-tests")]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use ticketry_api::{create_api_router, ApiConfig, ApiResult};
use ticketry_test_utils::fixtures;
use tower::ServiceExt;

#[path = "support/db.rs"]
mod test_db_support;

use test_db_support::test_db;

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("valid request");

    let response = router.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn project_then_tickets_flow() -> ApiResult<()> {
    let db = test_db().await?;
    let router = create_api_router(db, &ApiConfig::default());

    let user = fixtures::new_user("http-owner");
    let (status, body) = call(&router, Method::POST, "/users", Some(json!(user))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isSuccessful"], true);
    let owner_id = body["result"]["id"].as_i64().expect("user id");

    let name = fixtures::unique_name("Alpha");
    let (status, body) = call(
        &router,
        Method::POST,
        "/projects",
        Some(json!({ "name": name, "owner_user_id": owner_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["result"]["project"]["name"], json!(name));
    let project_id = body["result"]["project"]["id"].as_i64().expect("project id");
    assert_eq!(body["result"]["userProject"]["user_id"], json!(owner_id));
    assert_eq!(body["result"]["userProject"]["project_id"], json!(project_id));

    let (_, body) =
        call(&router, Method::GET, &format!("/users?project_id={}", project_id), None).await;
    assert_eq!(body["result"].as_array().map(Vec::len), Some(1));

    let mut indices = Vec::new();
    for title in ["First", "Second"] {
        let (status, body) = call(
            &router,
            Method::POST,
            "/tickets",
            Some(json!({ "project_id": project_id, "created_user_id": owner_id, "title": title })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        indices.push(body["result"]["index_in_project"].clone());
    }
    assert_eq!(indices, vec![json!(1), json!(2)]);

    let (status, body) = call(
        &router,
        Method::POST,
        "/projects",
        Some(json!({ "name": name, "owner_user_id": owner_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["isSuccessful"], false);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn ticket_edit_and_delete_flow() -> ApiResult<()> {
    let db = test_db().await?;
    let router = create_api_router(db, &ApiConfig::default());

    let (_, body) =
        call(&router, Method::POST, "/users", Some(json!(fixtures::new_user("http-edit")))).await;
    let owner_id = body["result"]["id"].clone();
    let (_, body) = call(
        &router,
        Method::POST,
        "/projects",
        Some(json!({ "name": fixtures::unique_name("Edit"), "owner_user_id": owner_id })),
    )
    .await;
    let project_id = body["result"]["project"]["id"].clone();
    let (_, body) = call(
        &router,
        Method::POST,
        "/tickets",
        Some(json!({ "project_id": project_id, "created_user_id": owner_id, "title": "Draft" })),
    )
    .await;
    let ticket_id = body["result"]["id"].as_i64().expect("ticket id");
    let ticket_uri = format!("/tickets/{}", ticket_id);

    let (status, body) =
        call(&router, Method::PUT, &ticket_uri, Some(json!({ "title": "Final" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["title"], "Final");

    let (status, body) =
        call(&router, Method::PUT, &ticket_uri, Some(json!({ "index_in_project": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isSuccessful"], false);

    let (status, body) = call(&router, Method::DELETE, &ticket_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "isSuccessful": true }));

    let (status, body) = call(&router, Method::GET, &ticket_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["isSuccessful"], false);

    let (status, _) = call(
        &router,
        Method::POST,
        "/tickets",
        Some(json!({ "project_id": i32::MAX, "created_user_id": owner_id, "title": "Lost" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn readiness_reports_healthy_database() -> ApiResult<()> {
    let db = test_db().await?;
    let router = create_api_router(db, &ApiConfig::default());

    let (status, body) = call(&router, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "up");
    assert!(body["database_latency_ms"].is_u64());
    Ok(())
}
