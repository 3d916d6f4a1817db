use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use husktrack_finance::{FinancialTransaction, MonthTotals, MonthlyBreakdown};
use husktrack_store::Collection;

use crate::app::dto;
use crate::app::errors;
use crate::app::state::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/transactions", post(record_transaction).get(list_transactions))
        .route("/monthly", get(monthly_breakdown))
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

pub async fn record_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateTransactionRequest>,
) -> axum::response::Response {
    match services.ledger().record_transaction(body.into_input()) {
        Ok(tx) => (StatusCode::CREATED, Json(tx)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_records::<FinancialTransaction>(Collection::FinancialTransactions) {
        Ok(mut items) => {
            items.sort_by_key(|tx| tx.occurred_at);
            Json(serde_json::json!({ "items": items })).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Twelve months of income/expense totals for the requested year (current
/// year when omitted). Derived freshly from the ledger on each call.
pub async fn monthly_breakdown(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<YearQuery>,
) -> axum::response::Response {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let transactions =
        match services.list_records::<FinancialTransaction>(Collection::FinancialTransactions) {
            Ok(v) => v,
            Err(e) => return errors::store_error_to_response(e),
        };

    let breakdown = MonthlyBreakdown::for_year(&transactions, year);
    let (total_income, total_expenses) = breakdown.totals();
    let months: Vec<MonthTotals> = breakdown.collect();

    Json(serde_json::json!({
        "year": year,
        "months": months,
        "total_income": total_income,
        "total_expenses": total_expenses,
    }))
    .into_response()
}
