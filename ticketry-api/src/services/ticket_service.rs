//! Ticket Service

use ticketry_core::{Column, DataTable, NewTicket, OrderedScope, Ticket};

use crate::component::SqlParam;
use crate::db::DbClient;
use crate::error::ApiResult;
use crate::{guards, sequencing, store};

/// Create a ticket at the end of its project's sequence.
///
/// The creator must exist. The project is checked and locked while the
/// index is computed, so concurrent creations in one project receive
/// distinct consecutive indices.
pub async fn create_ticket(db: &DbClient, req: NewTicket) -> ApiResult<Ticket> {
    db.run_transactional(move |tx| {
        Box::pin(async move {
            guards::assert_exists(tx, DataTable::UserAccounts, req.created_user_id).await?;

            let index =
                sequencing::next_index(tx, OrderedScope::TicketsInProject, req.project_id).await?;

            store::insert_row::<Ticket, _>(
                tx,
                vec![
                    (Column::ProjectId, SqlParam::Int(req.project_id)),
                    (Column::CreatedUserId, SqlParam::Int(req.created_user_id)),
                    (Column::IndexInProject, SqlParam::Int(index)),
                    (Column::Title, SqlParam::String(req.title)),
                ],
            )
            .await
        })
    })
    .await
}
