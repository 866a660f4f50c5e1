//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::DishRepository;
use crate::interfaces::http::common::ApiResponse;
use crate::shared::PageResponse;

use super::modules::dishes::{self, DishDto, DishState};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState, HealthStatus};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health_check,
        dishes::handlers::list_dishes,
    ),
    components(
        schemas(
            DishDto,
            PageResponse<DishDto>,
            ApiResponse<PageResponse<DishDto>>,
            HealthResponse,
            ComponentHealth,
            HealthStatus,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database reachability."),
        (name = "Dishes", description = "Canteen dishes, filterable by name, canteen and tag."),
    ),
    info(
        title = "CAU Dish API",
        version = "1.0.0",
        description = "Paginated listing of canteen dishes.

## Response format

Every API response is sent with HTTP 200 and wrapped in:
```json
{\"code\": 200, \"message\": \"success\", \"data\": {...}}
```

On failure `code` carries the error class (400 for bad parameters, 500 for
storage errors), `message` describes it and `data` is omitted.

## Pagination

`page` (from 1, default 1) and `page_size` (default 10). Values that are not
positive fall back to the defaults.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repo: Arc<dyn DishRepository>,
    db: DatabaseConnection,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let dish_routes = Router::new()
        .route("/list", get(dishes::list_dishes))
        .with_state(DishState { repo });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/dish", dish_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::NewDish;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::SeaOrmDishRepository;

    async fn app() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repo = SeaOrmDishRepository::new(db.clone());
        let dishes = (1..=23)
            .map(|i| {
                let canteen = if i % 2 == 0 { "East Canteen" } else { "West Canteen" };
                NewDish::from_cells(&format!("Rice Bowl {}", i), canteen, "staple")
            })
            .chain([NewDish::from_cells("Mapo Tofu", "East Canteen,West Canteen", "spicy")])
            .collect();
        repo.insert_many(dishes, 10).await.unwrap();

        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(Arc::new(repo), db, handle)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn list_uses_default_paging() {
        let (status, body) = get_json(app().await, "/api/dish/list").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "success");
        assert_eq!(body["data"]["total"], 24);
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["page_size"], 10);
        assert_eq!(body["data"]["list"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn invalid_paging_is_clamped() {
        let (_, body) = get_json(app().await, "/api/dish/list?page=0&page_size=-5&name=rice").await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["page_size"], 10);
        assert_eq!(body["data"]["total"], 23);
    }

    #[tokio::test]
    async fn last_page_is_partial() {
        let (_, body) = get_json(app().await, "/api/dish/list?page=3&page_size=10").await;
        assert_eq!(body["data"]["list"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"]["page"], 3);
    }

    #[tokio::test]
    async fn canteen_and_tag_filters() {
        let (_, body) =
            get_json(app().await, "/api/dish/list?canteen=West%20Canteen&tag=spicy").await;
        assert_eq!(body["data"]["total"], 1);
        let dish = &body["data"]["list"][0];
        assert_eq!(dish["name"], "Mapo Tofu");
        assert_eq!(dish["canteen"], serde_json::json!(["East Canteen", "West Canteen"]));
    }

    #[tokio::test]
    async fn malformed_page_is_a_fail_envelope() {
        let (status, body) = get_json(app().await, "/api/dish/list?page=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"code": 400, "message": "invalid page: must be integer"})
        );
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (status, body) = get_json(app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app().await.oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "abc-123");
    }

    #[test]
    fn openapi_documents_list_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/dish/list"));
    }
}
