//! Quote calculation & upsell resolution.
//!
//! Given a roof area, a product tier and a city, the calculator fetches the
//! city's pricing (falling back to the home city), applies the rounding rule
//! and the minimum job price, and picks the next tier up as an upsell.
//!
//! Everything except the pricing lookup is pure; see [`price_totals`] and
//! [`find_upsell`].

pub mod calculator;
pub mod error;
pub mod lead;
pub mod outcome;
pub mod quote;

pub use calculator::{
    CalculatorSettings, CityPricing, DEFAULT_CITY, DEFAULT_LOOKUP_TIMEOUT, MIN_PRICE,
    QuoteCalculator, find_upsell, price_totals, quote_from_rows,
};
pub use error::QuoteError;
pub use lead::{LeadContact, QuoteLead, QuoteSubmitted};
pub use outcome::QuoteOutcome;
pub use quote::{Quote, QuoteTotals, UpsellOffer};
