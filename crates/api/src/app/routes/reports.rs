use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use husktrack_ai::{self as ai, FinanceSnapshot, MonthSnapshot, NarrativeError, NarrativeRequest};
use husktrack_finance::{FinancialTransaction, MonthlyBreakdown, ReportData, ReportRange};
use husktrack_store::Collection;

use crate::app::dto;
use crate::app::errors;
use crate::app::state::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/rows", get(report_rows))
        .route("/narrative", post(narrative))
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// RFC3339 timestamps, inclusive on both ends.
    pub from: String,
    pub to: String,
}

/// Ledger rows for a date range, shaped for the external PDF renderer.
pub async fn report_rows(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<RangeQuery>,
) -> axum::response::Response {
    let from: DateTime<Utc> = match query.from.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_range", "'from' must be RFC3339")
        }
    };
    let to: DateTime<Utc> = match query.to.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_range", "'to' must be RFC3339")
        }
    };
    if from > to {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_range", "'from' is after 'to'");
    }

    let transactions =
        match services.list_records::<FinancialTransaction>(Collection::FinancialTransactions) {
            Ok(v) => v,
            Err(e) => return errors::store_error_to_response(e),
        };

    let report = ReportData::assemble("Ledger report", ReportRange { from, to }, &transactions);
    Json(report).into_response()
}

/// Narrative analysis of the business figures. The ledger context is built
/// server-side; the caller only supplies the question.
pub async fn narrative(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NarrativeRequestBody>,
) -> axum::response::Response {
    let year = body.year.unwrap_or_else(|| Utc::now().year());
    let transactions =
        match services.list_records::<FinancialTransaction>(Collection::FinancialTransactions) {
            Ok(v) => v,
            Err(e) => return errors::store_error_to_response(e),
        };

    let breakdown = MonthlyBreakdown::for_year(&transactions, year);
    let (total_income, total_expenses) = breakdown.totals();
    let snapshot = FinanceSnapshot {
        total_income,
        total_expenses,
        net: total_income - total_expenses,
        months: breakdown
            .map(|m| MonthSnapshot {
                month: m.month,
                sales: m.sales,
                expenses: m.expenses,
            })
            .collect(),
    };

    let request = NarrativeRequest {
        question: body.question,
    };
    match ai::summarize(services.generator(), &snapshot, &request) {
        Ok(summary) => Json(summary).into_response(),
        Err(NarrativeError::EmptyQuestion) => {
            errors::json_error(StatusCode::BAD_REQUEST, "empty_question", "question cannot be empty")
        }
        Err(e @ NarrativeError::GenerationFailed(_)) => {
            errors::json_error(StatusCode::BAD_GATEWAY, "generation_failed", e.to_string())
        }
    }
}
