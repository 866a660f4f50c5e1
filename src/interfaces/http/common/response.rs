//! Uniform response envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::PageResponse;

/// Response wrapper shared by every endpoint
///
/// Success: `{"code": 200, "message": "success", "data": {...}}`,
/// failure: `{"code": 400, "message": "invalid page: must be integer"}`.
/// The HTTP status is always 200; `code` carries the outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP-style status of the operation
    pub code: u16,
    /// `success`, or a description of the failure
    pub message: String,
    /// Payload, omitted on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn fail(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == StatusCode::OK.as_u16()
    }
}

impl<T> ApiResponse<PageResponse<T>> {
    /// `success` with a `{list, total, page, page_size}` payload; page and
    /// page size are normalized the same way the query was.
    pub fn success_with_page(list: Vec<T>, total: u64, page: i64, page_size: i64) -> Self {
        Self::success(PageResponse::new(list, total, page, page_size))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
