//! API Request and Response Types
//!
//! Entity rows and create requests live in `ticketry-core`; this module adds
//! the response envelope and the query strings accepted by list endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use ticketry_core::RowId;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// RESPONSE ENVELOPE
// ============================================================================

/// Uniform wrapper returned by every entity endpoint.
///
/// Success: `{"isSuccessful": true, "result": ...}`, with `result` omitted
/// when the operation has nothing to return. Failure:
/// `{"isSuccessful": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_successful: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

impl Envelope<()> {
    /// Success without a result, used by deletes.
    pub fn done() -> Self {
        Self {
            is_successful: true,
            result: None,
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `201 Created` with a success envelope.
pub fn created<T: Serialize>(result: T) -> (StatusCode, Envelope<T>) {
    (StatusCode::CREATED, Envelope::success(result))
}

// ============================================================================
// LIST QUERY
// ============================================================================

/// Query string accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListQuery {
    /// Comma separated row ids, e.g. `ids=1,2,3`. Absent means all rows.
    pub ids: Option<String>,
}

impl ListQuery {
    /// Parse the `ids` filter.
    pub fn id_filter(&self) -> ApiResult<Option<Vec<RowId>>> {
        self.ids.as_deref().map(parse_ids).transpose()
    }
}

/// Query string of `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct UserListQuery {
    /// Comma separated row ids.
    pub ids: Option<String>,
    /// Only members of this project. Combines with `ids`.
    pub project_id: Option<RowId>,
}

impl UserListQuery {
    pub fn id_filter(&self) -> ApiResult<Option<Vec<RowId>>> {
        self.ids.as_deref().map(parse_ids).transpose()
    }
}

fn parse_ids(raw: &str) -> ApiResult<Vec<RowId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<RowId>()
                .map_err(|_| ApiError::invalid_format("ids", "comma separated integers"))
        })
        .collect()
}
