//! All-or-nothing behavior of `DbClient::run_transactional`.

#![cfg(feature = "db-tests")]

use ticketry_api::component::SqlParam;
use ticketry_api::{store, ApiError, ApiResult, ErrorCode};
use ticketry_core::{Column, UserAccount};
use ticketry_test_utils::fixtures;

#[path = "support/db.rs"]
mod test_db_support;

use test_db_support::test_db;

fn user_values(username: &str) -> Vec<(Column, SqlParam)> {
    vec![
        (Column::Username, SqlParam::String(username.to_string())),
        (Column::PasswordSalt, SqlParam::String("salt".to_string())),
        (Column::PasswordHash, SqlParam::String("hash".to_string())),
        (Column::Name, SqlParam::String("Tx".to_string())),
    ]
}

async fn username_exists(db: &ticketry_api::DbClient, username: &str) -> ApiResult<bool> {
    Ok(db
        .list::<UserAccount>(None)
        .await?
        .iter()
        .any(|u| u.username == username))
}

#[tokio::test]
async fn failing_body_rolls_back_earlier_writes() -> ApiResult<()> {
    let db = test_db().await?;
    let username = fixtures::unique_name("rollback");

    let values = user_values(&username);
    let result: ApiResult<()> = db
        .run_transactional(move |tx| {
            Box::pin(async move {
                store::insert_row::<UserAccount, _>(tx, values).await?;
                Err(ApiError::integrity_violation("forced failure"))
            })
        })
        .await;

    assert_eq!(result.err().map(|e| e.code), Some(ErrorCode::IntegrityViolation));
    assert!(!username_exists(&db, &username).await?);
    Ok(())
}

#[tokio::test]
async fn successful_body_commits_every_write() -> ApiResult<()> {
    let db = test_db().await?;
    let first = fixtures::unique_name("commit-a");
    let second = fixtures::unique_name("commit-b");

    let (a, b) = (user_values(&first), user_values(&second));
    let ids = db
        .run_transactional(move |tx| {
            Box::pin(async move {
                let a = store::insert_row::<UserAccount, _>(tx, a).await?;
                let b = store::insert_row::<UserAccount, _>(tx, b).await?;
                Ok((a.id, b.id))
            })
        })
        .await?;

    assert!(ids.0 < ids.1);
    assert!(username_exists(&db, &first).await?);
    assert!(username_exists(&db, &second).await?);
    Ok(())
}

#[tokio::test]
async fn constraint_violation_inside_body_maps_to_conflict() -> ApiResult<()> {
    let db = test_db().await?;
    let username = fixtures::unique_name("dup-in-tx");

    let (a, b) = (user_values(&username), user_values(&username));
    let result = db
        .run_transactional(move |tx| {
            Box::pin(async move {
                store::insert_row::<UserAccount, _>(tx, a).await?;
                store::insert_row::<UserAccount, _>(tx, b).await
            })
        })
        .await;

    assert_eq!(result.err().map(|e| e.code), Some(ErrorCode::EntityAlreadyExists));
    assert!(!username_exists(&db, &username).await?);
    Ok(())
}
