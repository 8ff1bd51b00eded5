use serde::{Deserialize, Serialize};

use roofline_catalog::{Category, PricingRecord};
use roofline_core::QuoteId;
use roofline_quotes::{CityPricing, QuoteOutcome};

// -------------------------
// Request DTOs
// -------------------------

/// Missing fields are not rejected by the extractor; they fall through to the
/// calculator so the caller still gets an `invalid_area` or
/// `invalid_solution_id` envelope.
#[derive(Debug, Deserialize)]
pub struct CalculateQuoteRequest {
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub solution_id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    /// `default` when absent, clamped to `1..=max`.
    pub fn resolve(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SubmitQuoteResponse {
    pub id: QuoteId,
    pub quote: QuoteOutcome,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub internal_id: String,
    pub title: String,
    pub category: Category,
    pub price_per_area_cash: f64,
    pub price_per_area_installments: f64,
    pub order_rank: i32,
    pub description: Option<String>,
    pub warranty_years: Option<u32>,
}

impl From<&PricingRecord> for ProductResponse {
    fn from(r: &PricingRecord) -> Self {
        Self {
            internal_id: r.internal_id.as_str().to_string(),
            title: r.title.clone(),
            category: r.category,
            price_per_area_cash: r.price_per_area_cash,
            price_per_area_installments: r.price_per_area_installments,
            order_rank: r.order_rank,
            description: r.description.clone(),
            warranty_years: r.warranty_years,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub city: String,
    pub pricing_city: String,
    pub products: Vec<ProductResponse>,
}

impl From<&CityPricing> for ProductListResponse {
    fn from(p: &CityPricing) -> Self {
        Self {
            city: p.requested_city.clone(),
            pricing_city: p.pricing_city.clone(),
            products: p.rows.iter().map(ProductResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(LimitQuery { limit: None }.resolve(10, 50), 10);
        assert_eq!(LimitQuery { limit: Some(0) }.resolve(10, 50), 1);
        assert_eq!(LimitQuery { limit: Some(500) }.resolve(10, 50), 50);
        assert_eq!(LimitQuery { limit: Some(7) }.resolve(10, 50), 7);
    }
}
