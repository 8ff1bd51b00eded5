use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::quote::{Quote, QuoteTotals, UpsellOffer};

/// Caller-facing quote envelope.
///
/// Success:  `{"success":true,"data":{"totalCash":..,"totalInstallments":..},"upsell":{..}|null}`
/// Failure:  `{"success":false,"upsell":null,"error":"solution_not_found","message":".."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<QuoteTotals>,
    #[serde(default)]
    pub upsell: Option<UpsellOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QuoteOutcome {
    pub fn succeeded(quote: &Quote) -> Self {
        Self {
            success: true,
            data: Some(quote.totals),
            upsell: quote.upsell.clone(),
            error: None,
            message: None,
        }
    }

    pub fn failed(err: &QuoteError) -> Self {
        Self {
            success: false,
            data: None,
            upsell: None,
            error: Some(err.kind().to_string()),
            message: Some(err.to_string()),
        }
    }
}

impl From<&Result<Quote, QuoteError>> for QuoteOutcome {
    fn from(result: &Result<Quote, QuoteError>) -> Self {
        match result {
            Ok(quote) => Self::succeeded(quote),
            Err(err) => Self::failed(err),
        }
    }
}

impl From<Result<Quote, QuoteError>> for QuoteOutcome {
    fn from(result: Result<Quote, QuoteError>) -> Self {
        Self::from(&result)
    }
}
