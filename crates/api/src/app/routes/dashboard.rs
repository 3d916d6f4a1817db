use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use husktrack_clients::Client;
use husktrack_finance::{FinancialTransaction, KpiSummary};
use husktrack_orders::Order;
use husktrack_products::Product;
use husktrack_store::Collection;

use crate::app::errors;
use crate::app::state::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(dashboard))
}

/// The KPI summary, computed from the live collections on every request.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let products = match services.list_records::<Product>(Collection::Products) {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let clients = match services.list_records::<Client>(Collection::Clients) {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let local_sales = match services.list_records::<Order>(Collection::LocalSales) {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let exports = match services.list_records::<Order>(Collection::Exports) {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let transactions =
        match services.list_records::<FinancialTransaction>(Collection::FinancialTransactions) {
            Ok(v) => v,
            Err(e) => return errors::store_error_to_response(e),
        };

    let kpis = KpiSummary::compute(
        &products,
        clients.len(),
        &local_sales,
        &exports,
        &transactions,
    );
    Json(kpis).into_response()
}
