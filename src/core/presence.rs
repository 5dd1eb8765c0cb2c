//! Presence table over the universe of 4^k k-mers.
//!
//! A single bit per k-mer value, shared for write across background workers
//! via a per-word atomic or-set, and read without synchronization once the
//! background phase's happens-before barrier has passed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::core::ksize::KSize;

/// Bitset of `4^k` bits plus the `poly_TU` sentinel flag.
pub struct PresenceTable {
    k: KSize,
    bits: Vec<AtomicU64>,
    poly_tu: AtomicBool,
}

impl PresenceTable {
    /// `init(k)`: allocate `N = 4^k` bits, all zero.
    pub fn init(k: KSize) -> Self {
        let n = k.universe();
        let words = ((n + 63) / 64) as usize;
        let mut bits = Vec::with_capacity(words);
        bits.resize_with(words, || AtomicU64::new(0));
        PresenceTable {
            k,
            bits,
            poly_tu: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn ksize(&self) -> KSize {
        self.k
    }

    /// `mark(v)`: set bit `v`. Thread-safe for concurrent callers — uses a
    /// per-word atomic `fetch_or` rather than a single global write mutex.
    #[inline]
    pub fn mark(&self, v: u64) {
        let (word, bit) = (v / 64, v % 64);
        self.bits[word as usize].fetch_or(1u64 << bit, Ordering::Relaxed);
        if v == self.k.poly_tu_value() {
            self.poly_tu.store(true, Ordering::Relaxed);
        }
    }

    /// `test(v)`: read bit `v`. Lock-free; valid once the background phase
    /// has completed and its happens-before barrier has passed.
    #[inline]
    pub fn test(&self, v: u64) -> bool {
        let (word, bit) = (v / 64, v % 64);
        self.bits[word as usize].load(Ordering::Relaxed) & (1u64 << bit) != 0
    }

    /// `any_of(mask_set)`: true iff any of `values` has its bit set.
    #[inline]
    pub fn any_of(&self, values: &[u64]) -> bool {
        values.iter().any(|&v| self.test(v))
    }

    /// The `poly_TU` flag: whether the all-T/U sentinel k-mer itself was
    /// ever marked. `test(N-1)` already agrees with this by construction
    /// of [`mark`].
    #[inline]
    pub fn poly_tu(&self) -> bool {
        self.poly_tu.load(Ordering::Relaxed)
    }

    /// `release()`: drop the backing storage.
    pub fn release(self) {
        drop(self);
    }
}
