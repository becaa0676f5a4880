//! Error types for the prime sieve.

use thiserror::Error;

/// Errors surfaced by the sieve. None of them are retryable: the computation
/// is a pure function of the bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    #[error("invalid bound '{input}': expected a non-negative integer")]
    InvalidBound { input: String },

    #[error("bound {bound} exceeds the addressable range of this platform")]
    Overflow { bound: u64 },

    #[error("failed to allocate a mark array of {slots} slots")]
    Allocation { slots: usize },

    #[error("background sieve task failed: {0}")]
    Task(String),
}

impl SieveError {
    #[must_use]
    pub fn invalid_bound(input: impl ToString) -> Self {
        Self::InvalidBound {
            input: input.to_string(),
        }
    }

    #[must_use]
    pub fn overflow(bound: u64) -> Self {
        Self::Overflow { bound }
    }
}
