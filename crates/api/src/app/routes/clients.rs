use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use husktrack_clients::Client;
use husktrack_core::ClientId;
use husktrack_store::Collection;

use crate::app::dto;
use crate::app::errors;
use crate::app::state::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_client).get(list_clients))
        .route("/:id", get(get_client))
}

pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateClientRequest>,
) -> axum::response::Response {
    match services.ledger().register_client(body.into_input()) {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn list_clients(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_records::<Client>(Collection::Clients) {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid client id"),
    };
    match services.get_record::<Client>(Collection::Clients, &id.to_string()) {
        Ok(Some(client)) => Json(client).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "client not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
