#![no_main]

use libfuzzer_sys::fuzz_target;
use prime_sieve::marks::{BitMarks, ByteMarks};
use prime_sieve::{Bound, count_primes_with};

fn trial_division(max: u64) -> u64 {
    (2..max)
        .filter(|&n| (2..).take_while(|d| d * d <= n).all(|d| n % d != 0))
        .map(|_| 1)
        .sum()
}

fuzz_target!(|data: [u8; 2]| {
    // Keep bounds small so trial division stays cheap
    let max = u64::from(u16::from_le_bytes(data) % 20_000);
    let bound = Bound::new(max);

    let packed = count_primes_with::<BitMarks>(bound).unwrap();
    let flags = count_primes_with::<ByteMarks>(bound).unwrap();
    assert_eq!(packed, flags, "layouts disagree for {max}");
    assert_eq!(packed, trial_division(max), "wrong count for {max}");
});
