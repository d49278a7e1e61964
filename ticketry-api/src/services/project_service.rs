//! Project Service
//!
//! A project is created together with its owner's membership pair.

use ticketry_core::{
    Column, DataTable, NewProject, Project, ProjectWithMembership, RowId, UpdateSet, UserProject,
};

use crate::component::{Component, SqlParam};
use crate::db::DbClient;
use crate::error::ApiResult;
use crate::{guards, store};

/// Create a project and seed the owner as its first member.
///
/// The owner must exist and must not already own a project with the same
/// name. Both rows are written in one transaction.
pub async fn create_project(db: &DbClient, req: NewProject) -> ApiResult<ProjectWithMembership> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            guards::assert_exists(tx, DataTable::UserAccounts, req.owner_user_id).await?;
            guards::assert_unique_sibling(
                tx,
                DataTable::Projects,
                Column::OwnerUserId,
                req.owner_user_id,
                Column::Name,
                &req.name,
                None,
            )
            .await?;

            let project = store::insert_row::<Project, _>(
                tx,
                vec![
                    (Column::Name, SqlParam::String(req.name.clone())),
                    (Column::OwnerUserId, SqlParam::Int(req.owner_user_id)),
                ],
            )
            .await?;

            let user_project =
                store::insert_pair::<UserProject, _>(tx, req.owner_user_id, project.id).await?;

            Ok(ProjectWithMembership {
                project,
                user_project,
            })
        })
    })
    .await
}

/// Edit a project's name or owner.
///
/// The new owner must exist and the `(owner, name)` pair stays unique.
pub async fn update_project(db: &DbClient, id: RowId, set: UpdateSet) -> ApiResult<Project> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            let current = store::lock_one::<Project, _>(tx, id)
                .await?
                .ok_or_else(|| Project::not_found_error(id))?;

            let owner = set.integer(Column::OwnerUserId).unwrap_or(current.owner_user_id);
            let name = set.text(Column::Name).unwrap_or(current.name.as_str());

            if owner != current.owner_user_id {
                guards::assert_exists(tx, DataTable::UserAccounts, owner).await?;
            }
            if owner != current.owner_user_id || name != current.name {
                guards::assert_unique_sibling(
                    tx,
                    DataTable::Projects,
                    Column::OwnerUserId,
                    owner,
                    Column::Name,
                    name,
                    Some(id),
                )
                .await?;
            }

            store::update_row::<Project, _>(tx, id, &set).await
        })
    })
    .await
}
