//! User Service
//!
//! Account creation, username-checked edits and project membership lookup.

use ticketry_core::{
    Column, DataTable, NewUserAccount, RowId, UpdateSet, UserAccount, UserProject,
};

use crate::component::{Component, Relation, SqlParam};
use crate::db::DbClient;
use crate::error::ApiResult;
use crate::{guards, store};

/// Create a user account. Usernames are unique across all users.
pub async fn create_user(db: &DbClient, req: NewUserAccount) -> ApiResult<UserAccount> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            guards::assert_unique(
                tx,
                DataTable::UserAccounts,
                Column::Username,
                &req.username,
                None,
            )
            .await?;

            store::insert_row::<UserAccount, _>(
                tx,
                vec![
                    (Column::Username, SqlParam::String(req.username)),
                    (Column::PasswordSalt, SqlParam::String(req.password_salt)),
                    (Column::PasswordHash, SqlParam::String(req.password_hash)),
                    (Column::Name, SqlParam::String(req.name)),
                ],
            )
            .await
        })
    })
    .await
}

/// Edit a user. A changed username must still be unique.
pub async fn update_user(db: &DbClient, id: RowId, set: UpdateSet) -> ApiResult<UserAccount> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            let current = store::lock_one::<UserAccount, _>(tx, id)
                .await?
                .ok_or_else(|| UserAccount::not_found_error(id))?;

            if let Some(username) = set.text(Column::Username) {
                if username != current.username {
                    guards::assert_unique(
                        tx,
                        DataTable::UserAccounts,
                        Column::Username,
                        username,
                        Some(id),
                    )
                    .await?;
                }
            }

            store::update_row::<UserAccount, _>(tx, id, &set).await
        })
    })
    .await
}

/// Users holding a membership in `project_id`, ordered by id.
///
/// An unknown project simply has no members.
pub async fn users_for_project(db: &DbClient, project_id: RowId) -> ApiResult<Vec<UserAccount>> {
    let conn = db.get_conn().await?;
    let members =
        store::fetch_relations_where::<UserProject, _>(&conn, Column::ProjectId, project_id).await?;
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids = members.iter().map(|pair| pair.key().0).collect::<Vec<_>>();
    store::fetch_by_ids::<UserAccount, _>(&conn, Some(&user_ids)).await
}
