//! Sales and export order routes. Both channels share these handlers; the
//! subtree's channel arrives as an extension set up in [`router`].

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use husktrack_core::OrderId;
use husktrack_orders::{Order, OrderChannel};
use husktrack_store::Collection;

use crate::app::dto;
use crate::app::errors;
use crate::app::state::AppServices;

pub fn router(channel: OrderChannel) -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/complete", post(complete_order))
        .route("/:id/status", post(update_order_status))
        .layer(Extension(channel))
}

fn collection(channel: OrderChannel) -> Collection {
    match channel {
        OrderChannel::Local => Collection::LocalSales,
        OrderChannel::Export => Collection::Exports,
    }
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(channel): Extension<OrderChannel>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let input = match body.into_input() {
        Ok(v) => v,
        Err(fields) => return errors::validation_error(fields),
    };
    match services.ledger().create_order(channel, input) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(channel): Extension<OrderChannel>,
) -> axum::response::Response {
    match services.list_records::<Order>(collection(channel)) {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(channel): Extension<OrderChannel>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };
    match services.get_record::<Order>(collection(channel), &id.to_string()) {
        Ok(Some(order)) => Json(order).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Complete an order: the atomic stock-and-status path. Idempotent for
/// already-completed orders.
pub async fn complete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(channel): Extension<OrderChannel>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };
    match services.ledger().complete_order(channel, id) {
        Ok(completion) => Json(completion).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Plain status update. `completed` is rejected here; only the complete
/// route moves stock.
pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(channel): Extension<OrderChannel>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };
    let status = match body.parse_status() {
        Ok(v) => v,
        Err(fields) => return errors::validation_error(fields),
    };
    match services.ledger().update_order_status(channel, id, status) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
