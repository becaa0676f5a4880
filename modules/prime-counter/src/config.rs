use prime_sieve::Bound;
use serde::{Deserialize, Serialize};

/// Configuration for the `prime_counter` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimeCounterConfig {
    /// Largest accepted bound. Requests above it are rejected before any
    /// memory is allocated for the sieve (about `max_bound / 16` bytes).
    #[serde(default = "default_max_bound")]
    pub max_bound: Bound,

    /// Largest bound served by `POST /api/sync`. That endpoint sieves on the
    /// request task, which the request timeout cannot interrupt, so it is kept
    /// to bounds that finish well within it.
    #[serde(default = "default_sync_max_bound")]
    pub sync_max_bound: Bound,
}

impl Default for PrimeCounterConfig {
    fn default() -> Self {
        Self {
            max_bound: default_max_bound(),
            sync_max_bound: default_sync_max_bound(),
        }
    }
}

fn default_max_bound() -> Bound {
    Bound::new(1_000_000_000)
}

fn default_sync_max_bound() -> Bound {
    Bound::new(10_000_000)
}
