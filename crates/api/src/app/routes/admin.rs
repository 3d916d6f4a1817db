use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::errors;
use crate::app::state::AppServices;

pub fn router() -> Router {
    Router::new().route("/reset", post(reset_all_data))
}

/// Wipe clients, orders, and the financial ledger, and zero all stock.
/// Purchases are kept as an intake history.
pub async fn reset_all_data(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger().reset_all_data() {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
