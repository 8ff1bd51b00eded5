use thiserror::Error;

/// Why a quote could not be computed.
///
/// Every kind survives to the caller; none is collapsed into another.
/// `Display` strings are safe to show to end users; repository detail stays in
/// the `UpstreamFailure` payload and is only logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Area was zero, negative, NaN, infinite or above `RoofArea::MAX_SQUARE_METERS`.
    #[error("area must be a finite number greater than zero and at most 1000000 m²")]
    InvalidArea,

    /// Solution id was missing or blank.
    #[error("solution id must not be empty")]
    InvalidSolutionId,

    /// Neither the requested city nor the default city has pricing rows.
    #[error("no pricing available for {city}")]
    PricingUnavailable { city: String },

    /// The solution is not among the fetched rows.
    #[error("solution {solution_id} not found in pricing for {city}")]
    SolutionNotFound { solution_id: String, city: String },

    /// The repository failed on the last lookup attempt, or returned a row the
    /// calculator cannot price.
    #[error("pricing service failed")]
    UpstreamFailure(String),
}

impl QuoteError {
    /// Stable machine-readable code carried in the `error` field of the envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::InvalidArea => "invalid_area",
            QuoteError::InvalidSolutionId => "invalid_solution_id",
            QuoteError::PricingUnavailable { .. } => "pricing_unavailable",
            QuoteError::SolutionNotFound { .. } => "solution_not_found",
            QuoteError::UpstreamFailure(_) => "upstream_failure",
        }
    }
}
