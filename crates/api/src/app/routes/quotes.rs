use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use roofline_infra::SubmitQuote;
use roofline_quotes::QuoteOutcome;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `POST /quotes/calculate`. The body is always a quote envelope.
pub async fn calculate(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CalculateQuoteRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable calculate body");
            dto::CalculateQuoteRequest {
                area: None,
                solution_id: None,
                city: None,
            }
        }
    };

    let result = services
        .calculator
        .compute_quote(
            body.area.unwrap_or(f64::NAN),
            body.solution_id.as_deref().unwrap_or(""),
            body.city.as_deref(),
        )
        .await;

    match result {
        Ok(quote) => (StatusCode::OK, Json(QuoteOutcome::succeeded(&quote))).into_response(),
        Err(e) => errors::quote_error_to_response(&e),
    }
}

/// `POST /quotes`: store a quote request with contact details.
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<SubmitQuote>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_body",
                rejection.body_text(),
            );
        }
    };

    match services.submitter.submit(body).await {
        Ok(submitted) => (
            StatusCode::CREATED,
            Json(dto::SubmitQuoteResponse {
                id: submitted.lead.id,
                quote: QuoteOutcome::succeeded(&submitted.quote),
            }),
        )
            .into_response(),
        Err(e) => errors::submit_error_to_response(e),
    }
}
