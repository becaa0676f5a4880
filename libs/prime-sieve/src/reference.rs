//! Known values of the prime-counting function, used to sanity-check results.

use crate::bound::Bound;

/// `PRIME_COUNTS_BELOW_POWERS_OF_TEN[k]` is the number of primes below `10^k`.
pub const PRIME_COUNTS_BELOW_POWERS_OF_TEN: [u64; 20] = [
    0,
    4,
    25,
    168,
    1_229,
    9_592,
    78_498,
    664_579,
    5_761_455,
    50_847_534,
    455_052_511,
    4_118_054_813,
    37_607_912_018,
    346_065_536_839,
    3_204_941_750_802,
    29_844_570_422_669,
    279_238_341_033_925,
    2_623_557_157_654_233,
    24_739_954_287_740_860,
    234_057_667_276_344_607,
];

/// Expected prime count for `bound` if it is a power of ten.
#[must_use]
pub fn expected_count(bound: Bound) -> Option<u64> {
    let mut power = 1_u64;
    for expected in PRIME_COUNTS_BELOW_POWERS_OF_TEN {
        if power == bound.get() {
            return Some(expected);
        }
        power = power.checked_mul(10)?;
    }
    None
}
