use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use husktrack_purchasing::Purchase;
use husktrack_store::Collection;

use crate::app::dto;
use crate::app::errors;
use crate::app::state::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(record_purchase).get(list_purchases))
}

/// Record a coconut purchase. One atomic operation behind this: the purchase
/// document, the paired expense entry, and the stock raise land together.
pub async fn record_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePurchaseRequest>,
) -> axum::response::Response {
    let input = match body.into_input() {
        Ok(v) => v,
        Err(fields) => return errors::validation_error(fields),
    };
    match services.ledger().record_purchase(input) {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn list_purchases(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_records::<Purchase>(Collection::CoconutPurchases) {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
