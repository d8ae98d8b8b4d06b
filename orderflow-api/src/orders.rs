use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use orderflow_core::{OrderId, OrderRequest, OrderResponse};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/order/placeOrder", post(place_order))
        .route("/order/{order_id}", get(get_order_details))
}

/// POST /order/placeOrder
/// Reserve stock, create the order and charge it; answers with the order id
pub async fn place_order(
    State(state): State<AppState>,
    req: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderId>, AppError> {
    let Json(req) = req?;
    let order_id = state.workflow.place_order(&req).await?;
    tracing::info!("Order placed with id {}", order_id);
    Ok(Json(order_id))
}

/// GET /order/:id
pub async fn get_order_details(
    State(state): State<AppState>,
    order_id: Result<Path<OrderId>, PathRejection>,
) -> Result<Json<OrderResponse>, AppError> {
    let Path(order_id) = order_id?;
    let response = state.workflow.get_order_details(order_id).await?;
    Ok(Json(response))
}
