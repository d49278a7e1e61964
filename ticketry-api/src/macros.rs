//! Utility macros for reducing boilerplate

/// Macro to implement `FromRef<AppState>` for state extractors.
///
/// # Example
/// ```ignore
/// impl_from_ref!(DbClient, db);
/// // Expands to:
/// impl axum::extract::FromRef<AppState> for DbClient {
///     fn from_ref(state: &AppState) -> Self {
///         state.db.clone()
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_from_ref {
    ($type:ty, $field:ident) => {
        impl axum::extract::FromRef<$crate::state::AppState> for $type {
            fn from_ref(state: &$crate::state::AppState) -> Self {
                state.$field.clone()
            }
        }
    };
}

/// Macro to implement the `Component` trait for a row type.
///
/// Field names double as column names, so the row is decoded by name.
///
/// # Example
/// ```ignore
/// impl_component!(Metric, DataTable::Metrics { id, project_id, title });
/// ```
#[macro_export]
macro_rules! impl_component {
    ($type:ty, $table:path { $($field:ident),+ $(,)? }) => {
        impl $crate::component::Component for $type {
            const TABLE: ticketry_core::DataTable = $table;

            fn from_row(row: &tokio_postgres::Row) -> $crate::error::ApiResult<Self> {
                Ok(Self {
                    $($field: row.try_get(stringify!($field))?,)+
                })
            }

            fn row_id(&self) -> ticketry_core::RowId {
                self.id
            }
        }
    };
}

/// Macro to implement the `Relation` trait for a join table row type.
///
/// # Example
/// ```ignore
/// impl_relation!(UserProject, RelationTable::UserProjects { user_id, project_id });
/// ```
#[macro_export]
macro_rules! impl_relation {
    ($type:ty, $table:path { $first:ident, $second:ident $(,)? }) => {
        impl $crate::component::Relation for $type {
            const TABLE: ticketry_core::RelationTable = $table;

            fn from_row(row: &tokio_postgres::Row) -> $crate::error::ApiResult<Self> {
                Ok(Self {
                    $first: row.try_get(stringify!($first))?,
                    $second: row.try_get(stringify!($second))?,
                })
            }

            fn key(&self) -> (ticketry_core::RowId, ticketry_core::RowId) {
                (self.$first, self.$second)
            }
        }
    };
}
