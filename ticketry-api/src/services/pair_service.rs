//! Pair Service
//!
//! Membership and assignment pairs. Both referenced rows must exist and
//! the pair must be new.

use ticketry_core::{RelationTable, TicketAssignee, UserProject};

use crate::db::DbClient;
use crate::error::ApiResult;
use crate::{guards, store};

/// Grant a user access to a project.
pub async fn create_user_project(db: &DbClient, req: UserProject) -> ApiResult<UserProject> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            guards::assert_pair_insertable(
                tx,
                RelationTable::UserProjects,
                req.user_id,
                req.project_id,
            )
            .await?;
            store::insert_pair::<UserProject, _>(tx, req.user_id, req.project_id).await
        })
    })
    .await
}

/// Make a user responsible for a ticket.
pub async fn create_ticket_assignee(
    db: &DbClient,
    req: TicketAssignee,
) -> ApiResult<TicketAssignee> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            guards::assert_pair_insertable(
                tx,
                RelationTable::TicketAssignees,
                req.ticket_id,
                req.assignee_user_id,
            )
            .await?;
            store::insert_pair::<TicketAssignee, _>(tx, req.ticket_id, req.assignee_user_id).await
        })
    })
    .await
}
