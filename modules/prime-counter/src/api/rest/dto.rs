use prime_sieve::Bound;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::domain::DomainError;

/// Request body for `POST /api/sync` and `POST /api/async`.
///
/// `max` is kept as raw JSON so that a missing or non-numeric value can be
/// reported as an invalid bound rather than a generic body error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountPrimesRequest {
    #[serde(default)]
    pub max: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountPrimesResponse {
    pub count: u64,
}

impl CountPrimesRequest {
    /// Validate `max` into a [`Bound`].
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidBound`] if `max` is missing, not a number,
    /// negative, or not integral, and [`DomainError::BoundOutOfRange`] if it is
    /// integral but beyond `u64`.
    pub fn bound(&self) -> Result<Bound, DomainError> {
        match &self.max {
            Some(Value::Number(n)) => bound_from_number(n),
            _ => Err(DomainError::invalid_bound(
                "Must provide a numeric `max` field",
            )),
        }
    }
}

fn bound_from_number(n: &Number) -> Result<Bound, DomainError> {
    if let Some(value) = n.as_u64() {
        return Ok(Bound::new(value));
    }
    let parsed = match (n.as_i64(), n.as_f64()) {
        (Some(value), _) => Bound::try_from(value),
        (None, Some(value)) => {
            // Integral and positive but not a u64: too large, not malformed.
            if value.is_finite() && value > 0.0 && value.fract() == 0.0 {
                return Bound::try_from(value)
                    .map_err(|_| DomainError::bound_out_of_range(n));
            }
            Bound::try_from(value)
        }
        (None, None) => Err(prime_sieve::SieveError::invalid_bound(n)),
    };
    parsed.map_err(DomainError::from)
}
