//! `x-request-id` propagation
//!
//! A client-supplied id is kept, otherwise a v4 uuid is generated. The id is
//! stored in the request extensions, attached to the request's tracing span
//! and echoed in the response.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_request(request: &Request) -> Self {
        let id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);
        Self(id)
    }
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = RequestId::from_request(&request);
    let span = tracing::info_span!(
        "request",
        request_id = %id.0,
        method = %request.method(),
        uri = %request.uri(),
    );
    let header = HeaderValue::from_str(&id.0).ok();
    request.extensions_mut().insert(id);

    let mut response = next.run(request).instrument(span).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
