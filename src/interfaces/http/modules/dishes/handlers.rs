//! Dish listing handler

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;

use super::dto::{DishDto, ListDishReq};
use crate::domain::DishRepository;
use crate::interfaces::http::common::{ApiResponse, ValidatedQuery};
use crate::shared::PageResponse;

/// Dish handler state
#[derive(Clone)]
pub struct DishState {
    pub repo: Arc<dyn DishRepository>,
}

/// List dishes
///
/// Filters are combined with AND: `name` and `tag` match substrings,
/// `canteen` must be one of the canteens serving the dish.
/// The HTTP status is always 200; check `code` in the body.
#[utoipa::path(
    get,
    path = "/api/dish/list",
    tag = "Dishes",
    params(ListDishReq),
    responses(
        (status = 200, description = "Page of dishes, or a failure envelope with code 400/500", body = ApiResponse<PageResponse<DishDto>>)
    )
)]
pub async fn list_dishes(
    State(state): State<DishState>,
    ValidatedQuery(req): ValidatedQuery<ListDishReq>,
) -> ApiResponse<PageResponse<DishDto>> {
    let page = req.page_info();

    match state.repo.list(&req.filter(), page).await {
        Ok((dishes, total)) => {
            metrics::counter!("dish_list_total", "outcome" => "ok").increment(1);
            ApiResponse::success_with_page(
                dishes.into_iter().map(DishDto::from).collect(),
                total,
                page.page,
                page.page_size,
            )
        }
        Err(e) => {
            metrics::counter!("dish_list_total", "outcome" => "error").increment(1);
            error!("Failed to list dishes: {}", e);
            ApiResponse::fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
