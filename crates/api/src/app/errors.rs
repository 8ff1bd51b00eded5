use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::{error, warn};

use roofline_catalog::RepositoryError;
use roofline_infra::{QuoteStoreError, SubmitError};
use roofline_quotes::{QuoteError, QuoteOutcome};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn quote_error_status(err: &QuoteError) -> StatusCode {
    match err {
        QuoteError::InvalidArea | QuoteError::InvalidSolutionId => StatusCode::UNPROCESSABLE_ENTITY,
        QuoteError::SolutionNotFound { .. } => StatusCode::NOT_FOUND,
        QuoteError::PricingUnavailable { .. } | QuoteError::UpstreamFailure(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Quote failures keep the envelope shape; only the status code varies.
pub fn quote_error_to_response(err: &QuoteError) -> axum::response::Response {
    match err {
        QuoteError::UpstreamFailure(detail) => warn!(detail = %detail, "quote upstream failure"),
        QuoteError::PricingUnavailable { city } => warn!(city = %city, "quote pricing unavailable"),
        _ => {}
    }

    (quote_error_status(err), axum::Json(QuoteOutcome::failed(err))).into_response()
}

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    error!(error = %err, "catalog lookup failed");
    json_error(
        StatusCode::SERVICE_UNAVAILABLE,
        "catalog_unavailable",
        "catalog is temporarily unavailable",
    )
}

pub fn store_error_to_response(err: QuoteStoreError) -> axum::response::Response {
    error!(error = %err, "quote store failed");
    json_error(
        StatusCode::SERVICE_UNAVAILABLE,
        "store_unavailable",
        "quote requests are temporarily unavailable",
    )
}

pub fn submit_error_to_response(err: SubmitError) -> axum::response::Response {
    match err {
        SubmitError::InvalidLead(e) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_lead", e.to_string())
        }
        SubmitError::Quote(e) => quote_error_to_response(&e),
        SubmitError::Store(e) => store_error_to_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds_are_unprocessable() {
        assert_eq!(
            quote_error_status(&QuoteError::InvalidArea),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            quote_error_status(&QuoteError::InvalidSolutionId),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn pricing_failures_are_unavailable() {
        assert_eq!(
            quote_error_status(&QuoteError::PricingUnavailable { city: "X".into() }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            quote_error_status(&QuoteError::UpstreamFailure("db down".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            quote_error_status(&QuoteError::SolutionNotFound {
                solution_id: "a".into(),
                city: "X".into()
            }),
            StatusCode::NOT_FOUND
        );
    }
}
