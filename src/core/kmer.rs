//! Sliding-window k-mer builder.
//!
//! Produces the rolling, 2-bit-packed k-mer for each window along a
//! sequence, handling circular topology, reverse complementation, the
//! gap/poly-N rejection guards, and the two ambiguity policies (expand for
//! background, collapse for foreground).

use crate::core::alphabet::{
    collapse_ambiguity, complement_byte, encode_base, expand_ambiguity, is_gap,
};
use crate::core::error::SequenceErrorKind;
use smallvec::SmallVec;

/// Lower-case a raw sequence and apply the two rejection guards: a gap
/// error if any byte is `-`, a poly-N error if there is a run of `n` of
/// length `>= k`. Applied to the **raw** input, before circularization or
/// ambiguity collapse.
pub fn lower_and_guard(raw: &[u8], k: usize) -> Result<Vec<u8>, SequenceErrorKind> {
    let lower: Vec<u8> = raw.iter().map(|b| b.to_ascii_lowercase()).collect();

    if lower.iter().any(|&b| is_gap(b)) {
        return Err(SequenceErrorKind::Gap);
    }

    let mut run = 0usize;
    for &b in &lower {
        if b == b'n' {
            run += 1;
            if run >= k {
                return Err(SequenceErrorKind::PolyN);
            }
        } else {
            run = 0;
        }
    }

    Ok(lower)
}

/// Conceptually append the first `k-1` bases to the end, modelling circular
/// topology so the last `k-1` window starts wrap around the origin.
pub fn circularize(bases: &[u8], k: usize) -> Vec<u8> {
    if bases.len() < k.saturating_sub(1) || k <= 1 {
        let mut out = bases.to_vec();
        out.extend_from_slice(&bases[..bases.len().min(k.saturating_sub(1))]);
        return out;
    }
    let mut out = Vec::with_capacity(bases.len() + k - 1);
    out.extend_from_slice(bases);
    out.extend_from_slice(&bases[..k - 1]);
    out
}

/// Reverse complement of a lower-cased sequence. `A<->T, C<->G`; anything
/// else (ambiguity codes) becomes `n` in the output, with no attempt to
/// preserve the original ambiguity.
pub fn reverse_complement(bases: &[u8]) -> Vec<u8> {
    bases.iter().rev().map(|&b| complement_byte(b)).collect()
}

/// Does this sequence contain any IUPAC ambiguity code?
pub fn contains_ambiguity(bases: &[u8]) -> bool {
    bases.iter().any(|&b| expand_ambiguity(b).is_some())
}

/// Collapse every ambiguity code in `bases` to its fixed canonical base.
/// Concrete bases pass through unchanged.
/// Callers must have already rejected gaps via [`lower_and_guard`].
pub fn collapse_foreground(bases: &[u8]) -> Vec<u8> {
    bases
        .iter()
        .map(|&b| match collapse_ambiguity(b) {
            Some(code) => crate::core::alphabet::decode_base(code),
            None => b,
        })
        .collect()
}

/// Roll the 2-bit-packed k-mer across every window of a sequence that is
/// known to contain only concrete bases (`a/c/g/t/u`) — i.e. after
/// foreground collapse, or for a background sequence with no ambiguity at
/// all. Each successive value is `code' = ((code << 2) & MASK_k) |
/// code(next base)`.
///
/// Returns one `(position, value)` pair per window, positions `0..=L-k`.
pub fn roll_kmers(bases: &[u8], k: usize) -> Vec<(usize, u64)> {
    let len = bases.len();
    if len < k {
        return Vec::new();
    }
    let mask = if k * 2 >= 64 {
        u64::MAX
    } else {
        (1u64 << (2 * k)) - 1
    };

    let mut out = Vec::with_capacity(len - k + 1);
    let mut code: u64 = 0;
    for &b in &bases[..k] {
        code = (code << 2) | encode_base(b).expect("concrete base expected") as u64;
    }
    out.push((0usize, code));

    for (p, &b) in bases.iter().enumerate().skip(k) {
        code = ((code << 2) & mask) | encode_base(b).expect("concrete base expected") as u64;
        out.push((p - k + 1, code));
    }
    out
}

/// Does the window `bases[start..start+k]` contain an ambiguity code?
#[inline]
pub fn window_has_ambiguity(bases: &[u8], start: usize, k: usize) -> bool {
    bases[start..start + k]
        .iter()
        .any(|&b| expand_ambiguity(b).is_some())
}

/// Enumerate every concrete k-mer value consistent with an ambiguous
/// window, via the Cartesian product of each position's expansion set.
/// Builds values incrementally (shift-and-or) rather than materializing
/// intermediate strings.
pub fn expand_window(bases: &[u8], start: usize, k: usize) -> SmallVec<[u64; 8]> {
    let mut values: SmallVec<[u64; 8]> = SmallVec::new();
    values.push(0u64);

    for &b in &bases[start..start + k] {
        let candidates: SmallVec<[u8; 4]> = match encode_base(b) {
            Some(code) => SmallVec::from_slice(&[code]),
            None => expand_ambiguity(b)
                .map(SmallVec::from_slice)
                .unwrap_or_default(),
        };

        let mut next: SmallVec<[u64; 8]> = SmallVec::with_capacity(values.len() * candidates.len());
        for &v in &values {
            for &c in &candidates {
                next.push((v << 2) | c as u64);
            }
        }
        values = next;
    }

    values
}
