//! Domain service for prime counting
//!
//! Guards the bound against the configured limits and delegates the actual
//! counting to `prime_sieve`.

use prime_sieve::Bound;
use tracing::{debug, instrument, warn};

use crate::config::PrimeCounterConfig;
use crate::domain::error::DomainError;

/// Configuration for the prime counter service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_bound: Bound,
    /// Tighter limit for [`Service::count_primes`], which cannot be timed out.
    pub sync_max_bound: Bound,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        PrimeCounterConfig::default().into()
    }
}

impl From<PrimeCounterConfig> for ServiceConfig {
    fn from(cfg: PrimeCounterConfig) -> Self {
        Self {
            max_bound: cfg.max_bound,
            sync_max_bound: cfg.sync_max_bound,
        }
    }
}

/// Stateless prime counting service. Each call owns its own sieve.
#[derive(Debug, Clone, Default)]
pub struct Service {
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn max_bound(&self) -> Bound {
        self.config.max_bound
    }

    /// Limit applied to the inline form: the smaller of both limits.
    #[must_use]
    pub fn sync_max_bound(&self) -> Bound {
        self.config.sync_max_bound.min(self.config.max_bound)
    }

    /// Count primes below `bound` on the calling task.
    ///
    /// # Errors
    /// Returns [`DomainError::BoundTooLarge`] above [`Service::sync_max_bound`],
    /// or the mapped sieve error.
    #[instrument(skip(self), fields(bound = %bound))]
    pub fn count_primes(&self, bound: Bound) -> Result<u64, DomainError> {
        check_limit(bound, self.sync_max_bound())?;
        let count = prime_sieve::count_primes(bound.get())?;
        debug!(count, "counted primes");
        Ok(count)
    }

    /// Count primes below `bound` on the blocking pool.
    ///
    /// # Errors
    /// Returns [`DomainError::BoundTooLarge`] above [`Service::max_bound`], or
    /// the mapped sieve error.
    #[instrument(skip(self), fields(bound = %bound))]
    pub async fn count_primes_deferred(&self, bound: Bound) -> Result<u64, DomainError> {
        check_limit(bound, self.config.max_bound)?;
        let count = prime_sieve::count_primes_async(bound.get()).await?;
        debug!(count, "counted primes");
        Ok(count)
    }
}

fn check_limit(bound: Bound, limit: Bound) -> Result<(), DomainError> {
    if bound > limit {
        warn!(limit = %limit, "rejecting bound above configured maximum");
        return Err(DomainError::BoundTooLarge {
            bound: bound.get(),
            limit: limit.get(),
        });
    }
    Ok(())
}
