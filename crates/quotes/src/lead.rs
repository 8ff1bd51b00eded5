//! Quote requests submitted with contact details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roofline_catalog::SolutionId;
use roofline_core::{DomainError, DomainResult, Entity, Money, QuoteId, RoofArea};
use roofline_events::Event;

use crate::quote::Quote;

/// Customer contact details, validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadContact {
    customer_name: String,
    /// Digits only, including area code (and country code when given).
    phone: String,
}

impl LeadContact {
    pub fn new(customer_name: &str, phone: &str) -> DomainResult<Self> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }

        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if !(10..=13).contains(&digits.len()) {
            return Err(DomainError::validation(
                "phone must have 10 to 13 digits including area code",
            ));
        }

        Ok(Self {
            customer_name: customer_name.to_string(),
            phone: digits,
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// A stored quote request: contact + the quote it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLead {
    pub id: QuoteId,
    pub customer_name: String,
    pub phone: String,
    pub city: String,
    pub solution_id: SolutionId,
    pub solution_title: String,
    pub area: RoofArea,
    pub total_cash: Money,
    pub total_installments: Money,
    pub created_at: DateTime<Utc>,
}

impl QuoteLead {
    pub fn from_quote(contact: LeadContact, quote: &Quote, created_at: DateTime<Utc>) -> Self {
        Self {
            id: QuoteId::new(),
            customer_name: contact.customer_name,
            phone: contact.phone,
            city: quote.requested_city.clone(),
            solution_id: quote.solution_id.clone(),
            solution_title: quote.title.clone(),
            area: quote.area,
            total_cash: quote.totals.total_cash,
            total_installments: quote.totals.total_installments,
            created_at,
        }
    }
}

impl Entity for QuoteLead {
    type Id = QuoteId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: a quote request was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSubmitted {
    pub lead: QuoteLead,
}

impl Event for QuoteSubmitted {
    fn event_type(&self) -> &'static str {
        "quotes.quote.submitted"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.lead.created_at
    }
}
