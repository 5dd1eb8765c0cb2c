//! Background loader: marks every k-mer a background sequence observes —
//! including every IUPAC ambiguity expansion — into the presence table.

use crate::core::error::SequenceError;
use crate::core::kmer::{
    circularize, contains_ambiguity, expand_window, lower_and_guard, reverse_complement,
    roll_kmers,
};
use crate::core::ksize::KSize;
use crate::core::presence::PresenceTable;

/// Load one background sequence into `table`.
///
/// 1. Reject on gap / poly-N.
/// 2. Reject on ambiguity if `allow_unknowns` is false.
/// 3. Circularize if the catalog says so.
/// 4. Mark every window's k-mer(s); if `bidirectional`, repeat on the
///    reverse complement.
pub fn load_background(
    accession: &str,
    raw: &[u8],
    circular: bool,
    ksize: KSize,
    allow_unknowns: bool,
    bidirectional: bool,
    table: &PresenceTable,
) -> Result<(), SequenceError> {
    let k = ksize.k();
    let lower = lower_and_guard(raw, k).map_err(|kind| match kind {
        crate::core::error::SequenceErrorKind::Gap => SequenceError::gap(accession),
        crate::core::error::SequenceErrorKind::PolyN => SequenceError::poly_n(accession, k),
        _ => unreachable!("lower_and_guard only returns Gap or PolyN"),
    })?;

    if !allow_unknowns && contains_ambiguity(&lower) {
        return Err(SequenceError::ambig_disallowed(accession));
    }

    let bases = if circular {
        circularize(&lower, k)
    } else {
        lower
    };

    mark_all_windows(&bases, k, table);

    if bidirectional {
        let rc = reverse_complement(&bases);
        mark_all_windows(&rc, k, table);
    }

    Ok(())
}

/// Mark every window's k-mer(s) along `bases` (one strand).
///
/// Windows with no ambiguity go through the rolling builder directly
/// (one `mark` per window); windows that contain ambiguity codes are
/// expanded into their full Cartesian product of concrete k-mers first,
/// each built by nested shift-and-or rather than by materializing
/// intermediate strings.
fn mark_all_windows(bases: &[u8], k: usize, table: &PresenceTable) {
    if bases.len() < k {
        return;
    }

    if !contains_ambiguity(bases) {
        for (_, v) in roll_kmers(bases, k) {
            table.mark(v);
        }
        return;
    }

    for start in 0..=bases.len() - k {
        // `expand_window` returns a single value for a window with no
        // ambiguity codes, so one path covers both cases.
        for v in expand_window(bases, start, k) {
            table.mark(v);
        }
    }
}
