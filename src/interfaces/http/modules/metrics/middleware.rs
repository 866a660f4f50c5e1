//! Per-route request metrics

use std::time::Instant;

use axum::{extract::MatchedPath, extract::Request, middleware::Next, response::Response};

/// Counts requests (`http_requests_total`) and records their latency
/// (`http_request_duration_seconds`), labelled by method and route template.
///
/// API routes always answer 200, so outcome counters live next to the
/// handlers (`dish_list_total`).
pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_owned();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    metrics::counter!("http_requests_total", "method" => method.clone(), "path" => path.clone())
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(elapsed);
    response
}
