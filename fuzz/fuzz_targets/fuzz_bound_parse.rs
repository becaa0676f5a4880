#![no_main]

use libfuzzer_sys::fuzz_target;
use prime_sieve::Bound;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that parses must print back to the same digits
        if let Ok(bound) = s.parse::<Bound>() {
            assert_eq!(bound.to_string().parse::<Bound>().unwrap(), bound);
        }
    }
});
