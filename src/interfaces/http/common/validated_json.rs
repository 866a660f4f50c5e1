//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs the
//! rules of `T`'s field table on the deserialized value. Defaults and query
//! names in the table are not used here; the body supplies every field.
//! Failures become a `Fail` envelope with code 400 (HTTP 200).

use axum::body::Bytes;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::ApiResponse;
use crate::shared::validations::{validate_request, BindError, QueryRequest};

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// #[derive(Debug, Default, Deserialize)]
/// struct CreateDish {
///     name: String,
///     tag: String,
/// }
///
/// describe_request!(CreateDish => [
///     field!(CreateDish, name).rule(Rule::Required).rule(Rule::max(50)),
///     field!(CreateDish, tag).rule(Rule::one_of("staple spicy noodles")),
/// ]);
///
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateDish>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
pub enum ValidatedJsonRejection {
    /// The body could not be read.
    BodyError(String),
    /// The body was empty.
    MissingBody,
    /// JSON parsing failed.
    JsonError(serde_json::Error),
    /// Validation failed.
    ValidationError(BindError),
}

impl ValidatedJsonRejection {
    fn message(&self) -> String {
        match self {
            Self::BodyError(e) => format!("failed to read request body: {}", e),
            Self::MissingBody => "request body is required".to_string(),
            Self::JsonError(e) => format!("invalid JSON format: {}", e),
            Self::ValidationError(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let message = self.message();
        warn!("Rejected JSON body: {}", message);
        ApiResponse::<()>::fail(StatusCode::BAD_REQUEST, message).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + QueryRequest,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidatedJsonRejection::BodyError(e.body_text()))?;

        if body.is_empty() {
            return Err(ValidatedJsonRejection::MissingBody);
        }

        let value: T =
            serde_json::from_slice(&body).map_err(ValidatedJsonRejection::JsonError)?;

        validate_request(&value).map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
