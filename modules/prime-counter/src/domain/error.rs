use prime_sieve::SieveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid bound: {message}")]
    InvalidBound { message: String },

    #[error("Bound {bound} exceeds the configured maximum of {limit}")]
    BoundTooLarge { bound: u64, limit: u64 },

    #[error("Bound {input} is beyond the largest representable bound")]
    BoundOutOfRange { input: String },

    #[error("Bound {bound} is too large for this platform")]
    Overflow { bound: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    #[must_use]
    pub fn invalid_bound(message: impl Into<String>) -> Self {
        Self::InvalidBound {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bound_out_of_range(input: impl ToString) -> Self {
        Self::BoundOutOfRange {
            input: input.to_string(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<SieveError> for DomainError {
    fn from(e: SieveError) -> Self {
        match e {
            SieveError::InvalidBound { .. } => Self::invalid_bound(e.to_string()),
            SieveError::Overflow { bound } => Self::Overflow { bound },
            SieveError::Allocation { .. } | SieveError::Task(_) => Self::internal(e.to_string()),
        }
    }
}
