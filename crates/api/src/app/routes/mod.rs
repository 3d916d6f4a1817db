use axum::{routing::get, Router};

use husktrack_orders::OrderChannel;

pub mod admin;
pub mod clients;
pub mod dashboard;
pub mod finance;
pub mod orders;
pub mod products;
pub mod purchases;
pub mod reports;
pub mod system;

/// The full route table. Local sales and exports share one handler module;
/// the channel is injected per subtree.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/clients", clients::router())
        .nest("/products", products::router())
        .nest("/sales", orders::router(OrderChannel::Local))
        .nest("/exports", orders::router(OrderChannel::Export))
        .nest("/purchases", purchases::router())
        .nest("/finance", finance::router())
        .nest("/dashboard", dashboard::router())
        .nest("/reports", reports::router())
        .nest("/admin", admin::router())
}
