//! Money in whole currency units and the rounding rule used to get there.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Decimal places kept before rounding a scaled price.
///
/// `area * unit_price` is computed in binary floating point, so an exact
/// half such as `100.5` can come out as `100.49999999999999`. Snapping the
/// product to this many decimals first makes the half-up rule see the value
/// a person would compute on paper.
const SNAP_SCALE: f64 = 1e9;

/// Round a non-negative amount to whole units, half-up.
///
/// The value is first snapped to 9 decimal places, then rounded with
/// `f64::round` (half away from zero, which is half-up for non-negative
/// input): `100.5 -> 101`, `100.49 -> 100`.
///
/// Returns `None` for NaN, infinities, negative values, or values that do not
/// fit in `u64`.
pub fn round_half_up(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let snapped = (value * SNAP_SCALE).round() / SNAP_SCALE;
    let rounded = snapped.round();
    if rounded >= u64::MAX as f64 {
        return None;
    }

    Some(rounded as u64)
}

/// An amount in whole currency units (single currency, BRL).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Format in the Brazilian convention: `R$ 10.000,00`.
    pub fn format_brl(&self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        format!("R$ {grouped},00")
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_brl())
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
