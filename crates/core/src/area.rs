//! Measured roof area in square meters.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A validated roof area: finite, strictly positive and at most
/// [`RoofArea::MAX_SQUARE_METERS`].
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RoofArea(f64);

impl RoofArea {
    /// One square kilometer. Keeps `area * unit_price` well inside `u64` cents.
    pub const MAX_SQUARE_METERS: f64 = 1_000_000.0;

    pub fn new(square_meters: f64) -> DomainResult<Self> {
        if !square_meters.is_finite() {
            return Err(DomainError::validation("area must be a finite number"));
        }
        if square_meters <= 0.0 {
            return Err(DomainError::validation("area must be greater than zero"));
        }
        if square_meters > Self::MAX_SQUARE_METERS {
            return Err(DomainError::validation("area exceeds the maximum quotable size"));
        }
        Ok(Self(square_meters))
    }

    pub fn square_meters(&self) -> f64 {
        self.0
    }

    /// Area with at most two decimals and no trailing zeros (`120`, `35.5`).
    pub fn to_short_string(&self) -> String {
        let fixed = format!("{:.2}", self.0);
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

impl ValueObject for RoofArea {}

impl<'de> Deserialize<'de> for RoofArea {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        RoofArea::new(raw).map_err(serde::de::Error::custom)
    }
}

impl core::fmt::Display for RoofArea {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} m²", self.to_short_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_areas() {
        assert_eq!(RoofArea::new(120.0).unwrap().square_meters(), 120.0);
        assert!(RoofArea::new(0.01).is_ok());
    }

    #[test]
    fn rejects_zero_negative_and_non_finite() {
        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match RoofArea::new(bad) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn caps_area_at_one_square_kilometer() {
        assert!(RoofArea::new(RoofArea::MAX_SQUARE_METERS).is_ok());
        for bad in [RoofArea::MAX_SQUARE_METERS + 0.5, 1.8e17, 1e18, f64::MAX] {
            match RoofArea::new(bad) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for {bad}, got {other:?}"),
            }
        }
        assert!(serde_json::from_str::<RoofArea>("1e18").is_err());
    }

    #[test]
    fn short_string_trims_trailing_zeros() {
        assert_eq!(RoofArea::new(120.0).unwrap().to_short_string(), "120");
        assert_eq!(RoofArea::new(35.5).unwrap().to_short_string(), "35.5");
        assert_eq!(RoofArea::new(12.346).unwrap().to_short_string(), "12.35");
        assert_eq!(RoofArea::new(80.0).unwrap().to_string(), "80 m²");
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<RoofArea>("42.5").is_ok());
        assert!(serde_json::from_str::<RoofArea>("0").is_err());
        assert!(serde_json::from_str::<RoofArea>("-1").is_err());
    }
}
