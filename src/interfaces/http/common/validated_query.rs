//! Validated query extractor for Axum
//!
//! `ValidatedQuery<T>` fills `T` from the query string through its field
//! table: declared defaults first, then the supplied parameters, then the
//! declared rules. Failures become a `Fail` envelope (HTTP 200).

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::ApiResponse;
use crate::shared::validations::{parse_query, BindError, QueryParams, QueryRequest};

/// An extractor that binds and validates query parameters.
///
/// # Usage
///
/// ```ignore
/// #[derive(Debug, Default)]
/// struct ListParams {
///     page: i64,
///     name: String,
/// }
///
/// describe_request!(ListParams => [
///     field!(ListParams, page).query("page").default_value("1"),
///     field!(ListParams, name).query("name").rule(Rule::max(64)),
/// ]);
///
/// async fn handler(ValidatedQuery(params): ValidatedQuery<ListParams>) {
///     // `params` passed every declared rule
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

/// Error type for `ValidatedQuery` extraction failures.
pub enum ValidatedQueryRejection {
    /// The query string could not be decoded.
    QueryError(QueryRejection),
    /// Binding or validation failed.
    BindError(BindError),
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        match self {
            Self::QueryError(rejection) => {
                warn!("Failed to decode query: {}", rejection);
                ApiResponse::<()>::fail(
                    StatusCode::BAD_REQUEST,
                    format!("invalid query string: {}", rejection.body_text()),
                )
                .into_response()
            }
            Self::BindError(err) if err.is_client_error() => {
                warn!("Failed to parse query: {}", err);
                ApiResponse::<()>::fail(StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            Self::BindError(err) => {
                error!("Request type is misconfigured: {}", err);
                ApiResponse::<()>::fail(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                    .into_response()
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: QueryRequest,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(ValidatedQueryRejection::QueryError)?;

        parse_query(&QueryParams::new(pairs))
            .map(ValidatedQuery)
            .map_err(ValidatedQueryRejection::BindError)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::shared::validations::Rule;
    use crate::{describe_request, field};

    #[derive(Debug, Default)]
    struct Params {
        size: u32,
        kind: String,
    }

    describe_request!(Params => [
        field!(Params, size).query("size").default_value("10").rule(Rule::max(50)),
        field!(Params, kind).query("kind").rule(Rule::Required).rule(Rule::one_of("hot cold")),
    ]);

    async fn handler(ValidatedQuery(p): ValidatedQuery<Params>) -> Json<Value> {
        Json(serde_json::json!({"size": p.size, "kind": p.kind}))
    }

    fn app() -> Router {
        Router::new().route("/test", get(handler))
    }

    async fn call(uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_query_reaches_handler() {
        let (status, body) = call("/test?kind=hot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"size": 10, "kind": "hot"}));
    }

    #[tokio::test]
    async fn percent_encoded_values_are_decoded() {
        let (_, body) = call("/test?kind=cold&size=%32%30").await;
        assert_eq!(body["size"], 20);
    }

    #[tokio::test]
    async fn malformed_value_returns_fail_envelope() {
        let (status, body) = call("/test?kind=hot&size=-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"code": 400, "message": "invalid size: must be positive integer"})
        );
    }

    #[tokio::test]
    async fn violations_are_aggregated() {
        let (status, body) = call("/test?size=80").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 400);
        assert_eq!(
            body["message"],
            "size must be at most 50; kind is required; kind must be one of hot, cold"
        );
    }
}
