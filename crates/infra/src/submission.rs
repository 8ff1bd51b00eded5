//! Quote submission pipeline.
//!
//! ```text
//! SubmitQuote
//!   ↓
//! 1. Validate contact details
//!   ↓
//! 2. Compute the quote (same path as the calculator endpoint)
//!   ↓
//! 3. Append the lead to the quote store
//!   ↓
//! 4. Publish QuoteSubmitted (failures are logged, not returned)
//! ```
//!
//! A lead is stored before it is published. A failed publish only means no
//! notification goes out; the lead is still visible in the admin listing.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use roofline_catalog::PricingRepository;
use roofline_core::DomainError;
use roofline_events::{EventBus, EventEnvelope};
use roofline_quotes::{LeadContact, Quote, QuoteCalculator, QuoteError, QuoteLead, QuoteSubmitted};

use crate::quote_store::{QuoteStore, QuoteStoreError};

/// Bus message type carried from submission to the notification worker.
pub type QuoteSubmittedEnvelope = EventEnvelope<QuoteSubmitted>;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuote {
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub city: Option<String>,
    pub area: f64,
    pub solution_id: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid contact details: {0}")]
    InvalidLead(DomainError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("failed to store quote request: {0}")]
    Store(#[from] QuoteStoreError),
}

#[derive(Debug, Clone)]
pub struct SubmittedQuote {
    pub lead: QuoteLead,
    pub quote: Quote,
}

pub struct QuoteSubmitter<R, S, B> {
    calculator: Arc<QuoteCalculator<R>>,
    store: S,
    bus: B,
}

impl<R, S, B> QuoteSubmitter<R, S, B>
where
    R: PricingRepository,
    S: QuoteStore,
    B: EventBus<QuoteSubmittedEnvelope>,
{
    pub fn new(calculator: Arc<QuoteCalculator<R>>, store: S, bus: B) -> Self {
        Self {
            calculator,
            store,
            bus,
        }
    }

    #[instrument(skip_all, fields(solution_id = %request.solution_id))]
    pub async fn submit(&self, request: SubmitQuote) -> Result<SubmittedQuote, SubmitError> {
        let contact = LeadContact::new(&request.customer_name, &request.phone)
            .map_err(SubmitError::InvalidLead)?;

        let quote = self
            .calculator
            .compute_quote(request.area, &request.solution_id, request.city.as_deref())
            .await?;

        let lead = QuoteLead::from_quote(contact, &quote, Utc::now());
        self.store.append(&lead).await?;

        info!(
            quote_id = %lead.id,
            city = %lead.city,
            total_cash = lead.total_cash.units(),
            "quote request stored"
        );

        let envelope = EventEnvelope::wrap(QuoteSubmitted { lead: lead.clone() });
        if let Err(e) = self.bus.publish(envelope) {
            warn!(quote_id = %lead.id, error = ?e, "failed to publish QuoteSubmitted");
        }

        Ok(SubmittedQuote { lead, quote })
    }
}
