use serde::{Deserialize, Serialize};

use roofline_catalog::SolutionId;
use roofline_core::{Money, RoofArea};

/// Cash and financed totals for one product at one area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    #[serde(rename = "totalCash")]
    pub total_cash: Money,
    #[serde(rename = "totalInstallments")]
    pub total_installments: Money,
}

/// The next tier up, priced for the same area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellOffer {
    #[serde(rename = "totalCash")]
    pub total_cash: Money,
    #[serde(rename = "totalInstallments")]
    pub total_installments: Money,
    pub title: String,
    pub internal_id: SolutionId,
}

/// A computed quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub solution_id: SolutionId,
    pub title: String,
    pub area: RoofArea,
    /// City the caller asked for (default city when none was given).
    pub requested_city: String,
    /// City whose pricing was actually used.
    pub pricing_city: String,
    pub totals: QuoteTotals,
    pub upsell: Option<UpsellOffer>,
}

impl Quote {
    /// Whether the default city's pricing stood in for the requested city.
    pub fn used_fallback(&self) -> bool {
        !roofline_catalog::same_city(&self.requested_city, &self.pricing_city)
    }
}
