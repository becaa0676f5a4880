//! Prime Sieve
//!
//! Counts the primes strictly below a bound with an odd-only Sieve of
//! Eratosthenes over a bit-packed mark array.
//!
//! ## Architecture
//!
//! - `bound.rs` - validated exclusive upper limit
//! - `marks.rs` - flag storage (`BitMarks`, `ByteMarks`)
//! - `sieve.rs` - sieve builder and counter
//! - `reference.rs` - known prime counts for sanity checks
//!
//! Every call allocates its own mark array and drops it before returning, so
//! calls are independent and may run concurrently.
//!
//! ## Usage
//!
//! ```
//! assert_eq!(prime_sieve::count_primes(100)?, 25);
//! # Ok::<(), prime_sieve::SieveError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bound;
pub mod error;
pub mod marks;
pub mod reference;
pub mod sieve;

pub use bound::Bound;
pub use error::SieveError;
pub use marks::{BitMarks, ByteMarks, MarkStore};
pub use sieve::{MarkArray, build, build_with, count};

/// Number of primes in `[2, max)`.
///
/// # Errors
/// Returns [`SieveError::Overflow`] or [`SieveError::Allocation`] when the
/// mark array for `max` cannot be represented or allocated.
pub fn count_primes(max: u64) -> Result<u64, SieveError> {
    count_primes_with::<BitMarks>(Bound::new(max))
}

/// [`count_primes`] over an explicit storage layout.
///
/// # Errors
/// Same as [`count_primes`].
pub fn count_primes_with<M: MarkStore>(bound: Bound) -> Result<u64, SieveError> {
    build_with::<M>(bound).map(|marks| count(&marks))
}

/// Deferred form of [`count_primes`]: the sieve runs on Tokio's blocking
/// pool and the caller's task is free until the result is ready.
///
/// Must be awaited inside a Tokio runtime.
///
/// # Errors
/// Same as [`count_primes`], plus [`SieveError::Task`] if the blocking task
/// panicked or was cancelled.
pub async fn count_primes_async(max: u64) -> Result<u64, SieveError> {
    tokio::task::spawn_blocking(move || count_primes(max))
        .await
        .map_err(|e| SieveError::Task(e.to_string()))?
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn composed_api_matches_build_then_count() {
        for max in [0, 5, 97, 1000] {
            let marks = build(Bound::new(max)).unwrap();
            assert_eq!(count_primes(max).unwrap(), count(&marks));
        }
    }

    #[test]
    fn byte_layout_gives_the_same_counts() {
        assert_eq!(count_primes_with::<ByteMarks>(Bound::new(1000)).unwrap(), 168);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn largest_bound_fails_to_allocate() {
        // 2^63 - 1 slots need 2^60 bytes of bit-packed words.
        let err = count_primes(u64::MAX).unwrap_err();
        assert!(
            matches!(err, SieveError::Allocation { slots } if slots == usize::MAX >> 1),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn async_form_delivers_result() {
        assert_eq!(count_primes_async(100).await.unwrap(), 25);
    }
}
