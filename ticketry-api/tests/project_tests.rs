//! Project creation, membership seeding and guarded edits.

#![cfg(feature = "db-tests")]

use serde_json::json;
use ticketry_api::routes::generic::update_set;
use ticketry_api::services::{pair_service, project_service, user_service};
use ticketry_api::{ApiResult, ErrorCode};
use ticketry_core::{Project, UserAccount, UserProject};
use ticketry_test_utils::fixtures;

#[path = "support/db.rs"]
mod test_db_support;
#[path = "support/seed.rs"]
mod seed;

use test_db_support::test_db;

#[tokio::test]
async fn project_creation_seeds_owner_membership() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "proj-owner").await?;
    let name = fixtures::unique_name("Alpha");

    let created =
        project_service::create_project(&db, fixtures::new_project(owner.id, name.clone())).await?;
    assert_eq!(created.project.name, name);
    assert_eq!(created.project.owner_user_id, owner.id);
    assert_eq!(
        created.user_project,
        UserProject {
            user_id: owner.id,
            project_id: created.project.id,
        }
    );

    let members = user_service::users_for_project(&db, created.project.id).await?;
    assert_eq!(members.iter().map(|u| u.id).collect::<Vec<_>>(), vec![owner.id]);
    Ok(())
}

#[tokio::test]
async fn duplicate_project_name_per_owner_conflicts() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "proj-dup").await?;
    let other_owner = seed::seed_user(&db, "proj-dup-other").await?;
    let name = fixtures::unique_name("Dup");

    project_service::create_project(&db, fixtures::new_project(owner.id, name.clone())).await?;

    let err = project_service::create_project(&db, fixtures::new_project(owner.id, name.clone()))
        .await
        .expect_err("same owner and name must conflict");
    assert_eq!(err.code, ErrorCode::EntityAlreadyExists);

    // The same name under a different owner is fine.
    project_service::create_project(&db, fixtures::new_project(other_owner.id, name)).await?;
    Ok(())
}

#[tokio::test]
async fn project_with_missing_owner_writes_nothing() -> ApiResult<()> {
    let db = test_db().await?;
    let name = fixtures::unique_name("Orphan");

    let err = project_service::create_project(&db, fixtures::new_project(i32::MAX, name.clone()))
        .await
        .expect_err("missing owner must be rejected");
    assert_eq!(err.code, ErrorCode::ReferenceNotFound);

    let leaked = db
        .list::<Project>(None)
        .await?
        .into_iter()
        .any(|p| p.name == name);
    assert!(!leaked);
    Ok(())
}

#[tokio::test]
async fn project_rename_keeps_owner_names_unique() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "proj-rename").await?;
    let first = seed::seed_project(&db, &owner).await?.project;
    let second = seed::seed_project(&db, &owner).await?.project;

    let set = update_set::<Project>(&fixtures::edit_body(json!({ "name": first.name })))?;
    let err = project_service::update_project(&db, second.id, set)
        .await
        .expect_err("rename onto a sibling name must conflict");
    assert_eq!(err.code, ErrorCode::EntityAlreadyExists);

    // Renaming to its own current name is not a conflict.
    let set = update_set::<Project>(&fixtures::edit_body(json!({ "name": second.name })))?;
    let same = project_service::update_project(&db, second.id, set).await?;
    assert_eq!(same, second);

    let fresh = fixtures::unique_name("Renamed");
    let set = update_set::<Project>(&fixtures::edit_body(json!({ "name": fresh })))?;
    let renamed = project_service::update_project(&db, second.id, set).await?;
    assert_eq!(renamed.name, fresh);
    assert_eq!(renamed.owner_user_id, owner.id);
    Ok(())
}

#[tokio::test]
async fn project_owner_change_requires_existing_user() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "proj-handover").await?;
    let heir: UserAccount = seed::seed_user(&db, "proj-heir").await?;
    let project = seed::seed_project(&db, &owner).await?.project;

    let set = update_set::<Project>(&fixtures::edit_body(json!({ "owner_user_id": i32::MAX })))?;
    let err = project_service::update_project(&db, project.id, set)
        .await
        .expect_err("unknown owner must be rejected");
    assert_eq!(err.code, ErrorCode::ReferenceNotFound);

    let set = update_set::<Project>(&fixtures::edit_body(json!({ "owner_user_id": heir.id })))?;
    let handed = project_service::update_project(&db, project.id, set).await?;
    assert_eq!(handed.owner_user_id, heir.id);
    Ok(())
}

#[tokio::test]
async fn membership_pair_is_unique() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "pair-owner").await?;
    let member = seed::seed_user(&db, "pair-member").await?;
    let project = seed::seed_project(&db, &owner).await?.project;

    let pair = UserProject {
        user_id: member.id,
        project_id: project.id,
    };
    pair_service::create_user_project(&db, pair).await?;

    let err = pair_service::create_user_project(&db, pair)
        .await
        .expect_err("second membership must conflict");
    assert_eq!(err.code, ErrorCode::EntityAlreadyExists);

    let rows = db
        .list_relations::<UserProject>()
        .await?
        .into_iter()
        .filter(|row| *row == pair)
        .count();
    assert_eq!(rows, 1);
    Ok(())
}

#[tokio::test]
async fn owner_membership_cannot_be_added_twice() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "pair-seeded").await?;
    let created = seed::seed_project(&db, &owner).await?;

    let err = pair_service::create_user_project(&db, created.user_project)
        .await
        .expect_err("owner is already a member");
    assert_eq!(err.code, ErrorCode::EntityAlreadyExists);
    Ok(())
}

#[tokio::test]
async fn deleting_a_project_cascades_to_children() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "proj-cascade").await?;
    let created = seed::seed_project(&db, &owner).await?;
    let metric = seed::seed_metric(&db, created.project.id).await?;

    db.delete::<Project>(created.project.id).await?;

    assert!(!db.exists::<ticketry_core::Metric>(metric.id).await?);
    let members = user_service::users_for_project(&db, created.project.id).await?;
    assert!(members.is_empty());

    let err = db
        .delete::<Project>(created.project.id)
        .await
        .expect_err("second delete finds nothing");
    assert_eq!(err.code, ErrorCode::EntityNotFound);
    Ok(())
}

#[tokio::test]
async fn members_are_listed_in_id_order() -> ApiResult<()> {
    let db = test_db().await?;
    let owner = seed::seed_user(&db, "members-owner").await?;
    let late_joiner = seed::seed_user(&db, "members-late").await?;
    let outsider = seed::seed_user(&db, "members-outside").await?;
    let project = seed::seed_project(&db, &owner).await?.project;

    pair_service::create_user_project(
        &db,
        UserProject {
            user_id: late_joiner.id,
            project_id: project.id,
        },
    )
    .await?;

    let members = user_service::users_for_project(&db, project.id).await?;
    let ids = members.iter().map(|u| u.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![owner.id, late_joiner.id]);
    assert!(!ids.contains(&outsider.id));

    assert!(user_service::users_for_project(&db, i32::MAX).await?.is_empty());
    Ok(())
}
