use std::time::Duration;

use tracing::{debug, instrument, warn};

use roofline_catalog::{PricingRecord, PricingRepository, RepositoryError, SolutionId, same_city};
use roofline_core::{Money, RoofArea, round_half_up};

use crate::error::QuoteError;
use crate::quote::{Quote, QuoteTotals, UpsellOffer};

/// Minimum billable job size. No total is ever quoted below this.
pub const MIN_PRICE: Money = Money::new(5900);

/// The company's home region; its pricing stands in for cities without rows.
pub const DEFAULT_CITY: &str = "Campinas";

/// Upper bound on a single pricing lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorSettings {
    pub default_city: String,
    pub lookup_timeout: Duration,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Pricing rows resolved for a request, after the default-city fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPricing {
    pub requested_city: String,
    pub pricing_city: String,
    /// Ascending by `order_rank`.
    pub rows: Vec<PricingRecord>,
}

#[derive(Debug)]
enum LookupFailure {
    Empty,
    TimedOut,
    Repository(RepositoryError),
}

/// Quote calculator over an injected pricing repository.
///
/// Stateless apart from its settings; one instance serves concurrent requests.
#[derive(Debug, Clone)]
pub struct QuoteCalculator<R> {
    repo: R,
    settings: CalculatorSettings,
}

impl<R> QuoteCalculator<R>
where
    R: PricingRepository,
{
    pub fn new(repo: R) -> Self {
        Self::with_settings(repo, CalculatorSettings::default())
    }

    pub fn with_settings(repo: R, settings: CalculatorSettings) -> Self {
        Self { repo, settings }
    }

    /// Compute a quote for `area` m² of `solution_id` in `city`.
    ///
    /// `city` defaults to the configured default city when absent or blank.
    #[instrument(skip(self))]
    pub async fn compute_quote(
        &self,
        area: f64,
        solution_id: &str,
        city: Option<&str>,
    ) -> Result<Quote, QuoteError> {
        let area = RoofArea::new(area).map_err(|_| QuoteError::InvalidArea)?;
        let solution_id =
            SolutionId::parse(solution_id).map_err(|_| QuoteError::InvalidSolutionId)?;

        let pricing = self.pricing_for(city).await?;
        let quote = quote_from_rows(area, &solution_id, &pricing)?;

        debug!(
            pricing_city = %quote.pricing_city,
            total_cash = quote.totals.total_cash.units(),
            upsell = quote.upsell.as_ref().map(|u| u.internal_id.as_str()),
            "quote computed"
        );
        Ok(quote)
    }

    /// Resolve the pricing rows for `city`, falling back to the default city once.
    pub async fn pricing_for(&self, city: Option<&str>) -> Result<CityPricing, QuoteError> {
        let default_city = self.settings.default_city.as_str();
        let requested = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_city);

        let first_failure = match self.lookup(requested).await {
            Ok(rows) => {
                return Ok(CityPricing {
                    requested_city: requested.to_string(),
                    pricing_city: requested.to_string(),
                    rows,
                });
            }
            Err(failure) => failure,
        };

        if same_city(requested, default_city) {
            return Err(into_quote_error(first_failure, requested));
        }

        warn!(
            city = requested,
            default_city,
            reason = ?first_failure,
            "no usable pricing for city; falling back to default city"
        );

        match self.lookup(default_city).await {
            Ok(rows) => Ok(CityPricing {
                requested_city: requested.to_string(),
                pricing_city: default_city.to_string(),
                rows,
            }),
            Err(failure) => Err(into_quote_error(failure, requested)),
        }
    }

    async fn lookup(&self, city: &str) -> Result<Vec<PricingRecord>, LookupFailure> {
        let fetched = tokio::time::timeout(
            self.settings.lookup_timeout,
            self.repo.pricing_for_city(city),
        )
        .await;

        let mut rows = match fetched {
            Err(_elapsed) => return Err(LookupFailure::TimedOut),
            Ok(Err(e)) => return Err(LookupFailure::Repository(e)),
            Ok(Ok(rows)) if rows.is_empty() => return Err(LookupFailure::Empty),
            Ok(Ok(rows)) => rows,
        };

        // Stable: rows sharing a rank keep the repository's order.
        rows.sort_by_key(|r| r.order_rank);
        if rows.windows(2).any(|w| w[0].order_rank == w[1].order_rank) {
            debug!(city, "pricing rows share an order_rank; tie order is the repository's");
        }

        Ok(rows)
    }
}

fn into_quote_error(failure: LookupFailure, requested: &str) -> QuoteError {
    match failure {
        LookupFailure::Empty | LookupFailure::TimedOut => QuoteError::PricingUnavailable {
            city: requested.to_string(),
        },
        LookupFailure::Repository(e) => QuoteError::UpstreamFailure(e.to_string()),
    }
}

/// Build a quote from already-resolved pricing rows.
pub fn quote_from_rows(
    area: RoofArea,
    solution_id: &SolutionId,
    pricing: &CityPricing,
) -> Result<Quote, QuoteError> {
    let current = pricing
        .rows
        .iter()
        .find(|r| r.internal_id == *solution_id)
        .ok_or_else(|| QuoteError::SolutionNotFound {
            solution_id: solution_id.to_string(),
            city: pricing.pricing_city.clone(),
        })?;

    let totals = price_totals(area, current)?;

    let upsell = match find_upsell(&pricing.rows, current) {
        Some(candidate) => {
            let t = price_totals(area, candidate)?;
            Some(UpsellOffer {
                total_cash: t.total_cash,
                total_installments: t.total_installments,
                title: candidate.title.clone(),
                internal_id: candidate.internal_id.clone(),
            })
        }
        None => None,
    };

    Ok(Quote {
        solution_id: current.internal_id.clone(),
        title: current.title.clone(),
        area,
        requested_city: pricing.requested_city.clone(),
        pricing_city: pricing.pricing_city.clone(),
        totals,
        upsell,
    })
}

/// `max(round_half_up(area * unit_price), MIN_PRICE)` for both payment modes.
///
/// `RoofArea` is capped, so a unit price that cannot produce an amount
/// (negative, NaN, absurdly large) is bad data from the store and surfaces as
/// `UpstreamFailure`.
pub fn price_totals(area: RoofArea, record: &PricingRecord) -> Result<QuoteTotals, QuoteError> {
    let scale = |unit_price: f64| -> Result<Money, QuoteError> {
        round_half_up(area.square_meters() * unit_price)
            .map(|units| Money::new(units).max(MIN_PRICE))
            .ok_or_else(|| {
                QuoteError::UpstreamFailure(format!(
                    "unusable unit price {unit_price} for {}",
                    record.internal_id
                ))
            })
    };

    Ok(QuoteTotals {
        total_cash: scale(record.price_per_area_cash)?,
        total_installments: scale(record.price_per_area_installments)?,
    })
}

/// First row above `current` in rank whose category `current` may upgrade to.
///
/// `rows` must be ascending by `order_rank`. A row with the same rank is never
/// an upsell.
pub fn find_upsell<'a>(
    rows: &'a [PricingRecord],
    current: &PricingRecord,
) -> Option<&'a PricingRecord> {
    rows.iter().find(|r| {
        r.order_rank > current.order_rank && current.category.accepts_upgrade_to(r.category)
    })
}
