//! Exclusive upper limit for prime counting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SieveError;

/// 2^64 as a float; every finite value below it converts to `u64` losslessly
/// once it is known to be integral.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Exclusive upper bound `N`: primes are counted in `[2, N)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Bound(u64);

impl Bound {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Number of odd integers strictly below the bound, i.e. `floor(N / 2)`.
    ///
    /// This is the length of the mark array: index `i` stands for `2i + 1`,
    /// and the largest index `floor(N / 2) - 1` maps to the largest odd
    /// integer below `N` whatever the parity of `N`.
    ///
    /// # Errors
    /// Returns [`SieveError::Overflow`] when the length does not fit in `usize`.
    pub fn odd_slots(self) -> Result<usize, SieveError> {
        usize::try_from(self.0 >> 1).map_err(|_| SieveError::overflow(self.0))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for Bound {
    type Error = SieveError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| SieveError::invalid_bound(value))
    }
}

impl TryFrom<f64> for Bound {
    type Error = SieveError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= TWO_POW_64 {
            return Err(SieveError::invalid_bound(value));
        }
        // Integral and within [0, 2^64): the cast is exact.
        Ok(Self(value as u64))
    }
}

impl FromStr for Bound {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // u64::from_str accepts a leading '+', which is not a plain integer literal.
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SieveError::invalid_bound(s));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| SieveError::invalid_bound(s))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn odd_slots_is_floor_half() {
        assert_eq!(Bound::new(0).odd_slots().unwrap(), 0);
        assert_eq!(Bound::new(1).odd_slots().unwrap(), 0);
        assert_eq!(Bound::new(2).odd_slots().unwrap(), 1);
        assert_eq!(Bound::new(7).odd_slots().unwrap(), 3);
        assert_eq!(Bound::new(8).odd_slots().unwrap(), 4);
    }

    #[test]
    fn negative_integer_is_rejected() {
        let err = Bound::try_from(-1_i64).unwrap_err();
        assert!(matches!(err, SieveError::InvalidBound { .. }));
        assert_eq!(Bound::try_from(42_i64).unwrap(), Bound::new(42));
    }

    #[test]
    fn float_must_be_non_negative_integral_and_finite() {
        assert_eq!(Bound::try_from(1000.0).unwrap(), Bound::new(1000));
        assert_eq!(Bound::try_from(-0.0).unwrap(), Bound::new(0));
        for bad in [-1.0, 2.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e20] {
            assert!(Bound::try_from(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn parse_accepts_plain_decimal_only() {
        assert_eq!(" 100 ".parse::<Bound>().unwrap(), Bound::new(100));
        assert_eq!("0".parse::<Bound>().unwrap(), Bound::new(0));
        for bad in ["", "  ", "-5", "+5", "1.5", "1e6", "ten", "18446744073709551616"] {
            assert!(bad.parse::<Bound>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn serde_is_transparent() {
        let bound: Bound = serde_json::from_str("1000000").unwrap();
        assert_eq!(bound.get(), 1_000_000);
        assert_eq!(serde_json::to_string(&bound).unwrap(), "1000000");
    }
}
