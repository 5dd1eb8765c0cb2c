//! Mutation search: the smallest Hamming distance `h` from a query k-mer to
//! some present k-mer, `0 <= h <= m_max`.
//!
//! A single enumerator parameterized over `h`, rather than one hand-written
//! function per level: a combinatorial walk over position subsets of size
//! `h` (Gosper's hack, next-same-popcount-value) times a radix-3 odometer
//! over the substitution choice at each chosen position.

use smallvec::SmallVec;

use crate::core::presence::PresenceTable;

/// Smallest `h` in `0..=m_max` such that some Hamming-`h` neighbour of
/// `query` is present in `table`, or `None` if no such neighbour exists
/// within `m_max`.
///
/// `h = 0` is the direct presence test: `search(q) = Some(0)` iff `T[q] =
/// 1`. This also covers the all-T/U sentinel uniformly, since
/// [`PresenceTable::mark`] always sets the sentinel's own bit in the
/// array regardless of the `poly_TU` flag.
pub fn search(query: u64, k: usize, m_max: u32, table: &PresenceTable) -> Option<u32> {
    if table.test(query) {
        return Some(0);
    }
    for h in 1..=m_max {
        if level_has_hit(query, k, h as usize, table) {
            return Some(h);
        }
    }
    None
}

/// Visit all `C(k, h) * 3^h` candidates at Hamming distance exactly `h` from
/// `query`, returning as soon as a present one is found. Every candidate at
/// this level is visited before concluding "no hit" — there is no early
/// truncation across levels, only a short-circuit once a hit is found
/// within the level.
fn level_has_hit(query: u64, k: usize, h: usize, table: &PresenceTable) -> bool {
    if h == 0 {
        return table.test(query);
    }
    let total_combos = binomial(k, h);
    let mut combo = (1u64 << h) - 1;

    for _ in 0..total_combos {
        let positions = positions_from_mask(combo, h);
        if substitutions_have_hit(query, &positions, table) {
            return true;
        }
        combo = next_same_popcount(combo);
    }
    false
}

/// Radix-3 odometer over the `3^h` substitutions of the chosen positions:
/// each position independently steps through the 3 bases that differ from
/// the query's own base there. The whole batch is collected up front and
/// tested in one [`PresenceTable::any_of`] call, per spec.md §4.3's stated
/// C3/C4 relationship, rather than one `test` per candidate.
fn substitutions_have_hit(query: u64, positions: &[usize], table: &PresenceTable) -> bool {
    let h = positions.len();
    let origs: SmallVec<[u8; 8]> = positions
        .iter()
        .map(|&p| ((query >> (2 * p)) & 0b11) as u8)
        .collect();
    let mut digits: SmallVec<[u8; 8]> = SmallVec::from_elem(0u8, h);
    let total_subs = 3u64.pow(h as u32);

    let mut candidates: SmallVec<[u64; 16]> = SmallVec::with_capacity(total_subs as usize);
    for _ in 0..total_subs {
        let mut candidate = query;
        for (i, &p) in positions.iter().enumerate() {
            let new_base = (origs[i] + 1 + digits[i]) & 0b11;
            candidate &= !(0b11u64 << (2 * p));
            candidate |= (new_base as u64) << (2 * p);
        }
        candidates.push(candidate);
        // Increment the base-3 odometer.
        for d in digits.iter_mut() {
            *d += 1;
            if *d == 3 {
                *d = 0;
            } else {
                break;
            }
        }
    }
    table.any_of(&candidates)
}

/// Extract the `h` set bit positions of `mask`, lowest first.
fn positions_from_mask(mask: u64, h: usize) -> SmallVec<[usize; 8]> {
    let mut out = SmallVec::with_capacity(h);
    let mut v = mask;
    while v != 0 {
        out.push(v.trailing_zeros() as usize);
        v &= v - 1;
    }
    out
}

/// Gosper's hack: the next unsigned value with the same popcount as `v`.
fn next_same_popcount(v: u64) -> u64 {
    let c = v & v.wrapping_neg();
    let r = v.wrapping_add(c);
    (((r ^ v) >> 2) / c) | r
}

/// `C(n, k)`, computed iteratively to avoid overflow for the small `n`
/// (`<= 16`) this module is ever called with.
fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ksize::KSize;

    #[test]
    fn h0_is_direct_presence() {
        let t = PresenceTable::init(KSize::K8);
        t.mark(0b00011011); // "acgt"
        assert_eq!(search(0b00011011, 8, 4, &t), Some(0));
    }

    #[test]
    fn finds_single_substitution_neighbour() {
        let t = PresenceTable::init(KSize::K8);
        // ACGTACGT
        let q = 0b00_01_10_11_00_01_10_11u64;
        t.mark(q);
        // ACGTACGA differs from ACGTACGT only in the last base (T->A).
        let neighbour = (q & !0b11) | 0b00;
        assert_eq!(search(neighbour, 8, 4, &t), Some(1));
    }

    #[test]
    fn returns_none_when_nothing_within_m_max() {
        let t = PresenceTable::init(KSize::K8);
        t.mark(0); // AAAAAAAA
        let all_t = KSize::K8.poly_tu_value(); // TTTTTTTT, Hamming distance 8
        assert_eq!(search(all_t, 8, 4, &t), None);
    }

    #[test]
    fn monotonicity_no_smaller_h_hits_when_h_is_returned() {
        let t = PresenceTable::init(KSize::K8);
        let q = 0b00_01_10_11_00_01_10_11u64;
        // Present neighbour at Hamming distance exactly 2 (first two bases flipped).
        let two_away = q ^ 0b11_11_00_00_00_00_00_00;
        t.mark(two_away);
        let h = search(q, 8, 4, &t).unwrap();
        assert_eq!(h, 2);
    }

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(binomial(8, 0), 1);
        assert_eq!(binomial(8, 1), 8);
        assert_eq!(binomial(8, 4), 70);
        assert_eq!(binomial(16, 8), 12870);
    }

    #[test]
    fn k16_finds_a_distant_neighbour_below_m_max() {
        let t = PresenceTable::init(KSize::K16);
        let q: u64 = 0xABCD_1234;
        // Flip 3 two-bit positions out of 16; present, so h must resolve to 3.
        let neighbour = q ^ 0b11 ^ (0b11 << 4) ^ (0b11 << 10);
        t.mark(neighbour);
        assert_eq!(search(q, 16, 8, &t), Some(3));
    }
}
