use serde::{Deserialize, Serialize};

use roofline_core::{DomainError, DomainResult, Entity};

/// Stable product identifier (`internal_id`), unique within a city's rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionId(String);

impl SolutionId {
    /// Parse a caller-supplied id; blank ids are rejected.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("solution id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SolutionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roof-surface compatibility tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Concrete slab roofs.
    Concrete,
    /// Metal/fiber-cement sheet roofs.
    Sheet,
    /// Works on either surface.
    Both,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Concrete => "concrete",
            Category::Sheet => "sheet",
            Category::Both => "both",
        }
    }

    /// Whether a product tagged `candidate` may be offered as an upgrade over
    /// a product tagged `self`.
    pub fn accepts_upgrade_to(&self, candidate: Category) -> bool {
        candidate == *self || candidate == Category::Both
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concrete" => Ok(Category::Concrete),
            "sheet" => Ok(Category::Sheet),
            "both" => Ok(Category::Both),
            other => Err(DomainError::validation(format!(
                "category must be one of: concrete, sheet, both (got {other:?})"
            ))),
        }
    }
}

/// One product tier priced for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub internal_id: SolutionId,
    pub title: String,
    pub category: Category,
    /// Currency per m², one-time payment.
    pub price_per_area_cash: f64,
    /// Currency per m², financed payment.
    pub price_per_area_installments: f64,
    /// Ascending tier order within a city (higher = more premium).
    pub order_rank: i32,
    pub city: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub warranty_years: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Entity for PricingRecord {
    type Id = SolutionId;

    fn id(&self) -> &Self::Id {
        &self.internal_id
    }
}

/// City names are matched trimmed and case-insensitively.
pub fn same_city(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
