//! Flag storage for the mark array.
//!
//! The sieve only needs a fixed-length sequence of booleans that starts fully
//! set and is cleared at arithmetic strides. [`BitMarks`] packs 64 flags per
//! word and is the default; [`ByteMarks`] keeps one `bool` per slot and exists
//! so the two layouts can be benchmarked and cross-checked against each other.

use crate::error::SieveError;

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-size flag buffer used by the sieve builder.
///
/// Implementations allocate exactly once in [`MarkStore::with_len`] and never
/// resize afterwards.
pub trait MarkStore: Sized {
    /// Allocate `len` flags, all set.
    ///
    /// # Errors
    /// Returns [`SieveError::Allocation`] if the buffer cannot be reserved.
    fn with_len(len: usize) -> Result<Self, SieveError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Panics
    /// Panics if `index >= self.len()`.
    fn get(&self, index: usize) -> bool;

    /// # Panics
    /// Panics if `index >= self.len()`.
    fn clear(&mut self, index: usize);

    /// Clear every flag at `from, from + stride, from + 2 * stride, ...` below `len`.
    fn clear_stride(&mut self, from: usize, stride: usize) {
        debug_assert!(stride > 0, "stride must be positive");
        let len = self.len();
        let mut index = from;
        while index < len {
            self.clear(index);
            index += stride;
        }
    }

    /// Number of flags still set.
    fn count_set(&self) -> u64;
}

/// Bit-packed flags, 64 per `u64` word.
///
/// Bits past `len` in the last word are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMarks {
    words: Vec<u64>,
    len: usize,
}

impl MarkStore for BitMarks {
    fn with_len(len: usize) -> Result<Self, SieveError> {
        let word_count = len.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        words
            .try_reserve_exact(word_count)
            .map_err(|_| SieveError::Allocation { slots: len })?;
        words.resize(word_count, u64::MAX);

        let tail = len % WORD_BITS;
        if tail != 0
            && let Some(last) = words.last_mut()
        {
            *last = (1_u64 << tail) - 1;
        }

        Ok(Self { words, len })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "mark index {index} out of range {}", self.len);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    fn clear(&mut self, index: usize) {
        assert!(index < self.len, "mark index {index} out of range {}", self.len);
        self.words[index / WORD_BITS] &= !(1_u64 << (index % WORD_BITS));
    }

    fn count_set(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }
}

/// One `bool` per flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteMarks {
    flags: Vec<bool>,
}

impl MarkStore for ByteMarks {
    fn with_len(len: usize) -> Result<Self, SieveError> {
        let mut flags = Vec::new();
        flags
            .try_reserve_exact(len)
            .map_err(|_| SieveError::Allocation { slots: len })?;
        flags.resize(len, true);
        Ok(Self { flags })
    }

    fn len(&self) -> usize {
        self.flags.len()
    }

    fn get(&self, index: usize) -> bool {
        self.flags[index]
    }

    fn clear(&mut self, index: usize) {
        self.flags[index] = false;
    }

    fn clear_stride(&mut self, from: usize, stride: usize) {
        if let Some(tail) = self.flags.get_mut(from..) {
            for flag in tail.iter_mut().step_by(stride) {
                *flag = false;
            }
        }
    }

    fn count_set(&self) -> u64 {
        self.flags.iter().map(|&f| u64::from(f)).sum()
    }
}
