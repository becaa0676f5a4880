//! Odd-only Sieve of Eratosthenes.
//!
//! Only odd integers are represented: slot `i` stands for `2i + 1`, so slot 0
//! is the integer 1 and is cleared up front. The even prime 2 has no slot and
//! is added back by [`count`].

use tracing::debug;

use crate::bound::Bound;
use crate::error::SieveError;
use crate::marks::{BitMarks, MarkStore};

/// Primality flags over the odd integers below a bound.
///
/// Once built, `is_odd_prime(i)` is true iff `2i + 1` is prime.
#[derive(Debug, Clone)]
pub struct MarkArray<M = BitMarks> {
    bound: Bound,
    flags: M,
}

impl<M: MarkStore> MarkArray<M> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether the odd integer `2 * index + 1` is prime.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn is_odd_prime(&self, index: usize) -> bool {
        self.flags.get(index)
    }
}

/// Build the mark array for `bound` using bit-packed storage.
///
/// # Errors
/// See [`build_with`].
pub fn build(bound: Bound) -> Result<MarkArray, SieveError> {
    build_with(bound)
}

/// Build the mark array for `bound` into the storage layout `M`.
///
/// # Errors
/// Returns [`SieveError::Overflow`] if the array length does not fit in
/// `usize`, or [`SieveError::Allocation`] if the buffer cannot be allocated.
pub fn build_with<M: MarkStore>(bound: Bound) -> Result<MarkArray<M>, SieveError> {
    let max = bound.get();
    let len = bound.odd_slots()?;
    let mut flags = M::with_len(len)?;

    if len > 0 {
        flags.clear(0); // 1 is not prime
    }

    for i in 1..len {
        if !flags.get(i) {
            continue;
        }

        // i < len <= max / 2, so 2i + 1 < max and cannot overflow.
        let p = 2 * i as u64 + 1;
        let Some(pp) = p.checked_mul(p) else {
            break;
        };
        if pp >= max {
            break;
        }

        // pp < max, hence pp / 2 < len and p < len: both fit in usize.
        let start = usize::try_from(pp >> 1).map_err(|_| SieveError::overflow(max))?;
        let stride = usize::try_from(p).map_err(|_| SieveError::overflow(max))?;
        flags.clear_stride(start, stride);
    }

    debug!(bound = max, slots = len, "sieve built");
    Ok(MarkArray { bound, flags })
}

/// Number of primes in `[2, N)` recorded by `marks`.
///
/// Sums the set flags (odd primes) and adds one for the prime 2 when `N > 2`.
#[must_use]
pub fn count<M: MarkStore>(marks: &MarkArray<M>) -> u64 {
    let odd_primes = marks.flags.count_set();
    odd_primes + u64::from(marks.bound.get() > 2)
}
