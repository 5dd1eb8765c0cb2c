//! Foreground scanner: per-sequence mutation-digit strings and aggregate
//! scores against a built background presence table.

use crate::core::error::SequenceError;
use crate::core::kmer::{
    circularize, collapse_foreground, contains_ambiguity, lower_and_guard, reverse_complement,
    roll_kmers,
};
use crate::core::ksize::KSize;
use crate::core::mutation::search;
use crate::core::presence::PresenceTable;

/// Per-sequence output record: digit strings and scores for each strand
/// scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct ForegroundRecord {
    pub accession: String,
    pub length: usize,
    pub forward_digits: String,
    pub forward_total: u32,
    pub forward_score: f64,
    pub reverse_digits: Option<String>,
    pub reverse_total: Option<u32>,
    pub reverse_score: Option<f64>,
}

/// Scan one foreground sequence against `table`, producing its output
/// record.
pub fn scan_foreground(
    accession: &str,
    raw: &[u8],
    circular: bool,
    ksize: KSize,
    allow_unknowns: bool,
    bidirectional: bool,
    table: &PresenceTable,
) -> Result<ForegroundRecord, SequenceError> {
    let k = ksize.k();
    let m_max = ksize.m_max();

    let lower = lower_and_guard(raw, k).map_err(|kind| match kind {
        crate::core::error::SequenceErrorKind::Gap => SequenceError::gap(accession),
        crate::core::error::SequenceErrorKind::PolyN => SequenceError::poly_n(accession, k),
        _ => unreachable!("lower_and_guard only returns Gap or PolyN"),
    })?;

    if !allow_unknowns && contains_ambiguity(&lower) {
        return Err(SequenceError::ambig_disallowed(accession));
    }

    let collapsed = collapse_foreground(&lower);
    let bases = if circular {
        circularize(&collapsed, k)
    } else {
        collapsed
    };

    let (forward_digits, forward_total) = scan_strand(accession, &bases, k, m_max, table)?;
    let forward_score = score(forward_total, forward_digits.len());

    let (reverse_digits, reverse_total, reverse_score) = if bidirectional {
        let rc = reverse_complement(&bases);
        let (digits, total) = scan_strand(accession, &rc, k, m_max, table)?;
        let sc = score(total, digits.len());
        (Some(digits), Some(total), Some(sc))
    } else {
        (None, None, None)
    };

    Ok(ForegroundRecord {
        accession: accession.to_string(),
        length: forward_digits.len(),
        forward_digits,
        forward_total,
        forward_score,
        reverse_digits,
        reverse_total,
        reverse_score,
    })
}

fn score(total: u32, window_count: usize) -> f64 {
    if window_count == 0 {
        0.0
    } else {
        total as f64 / window_count as f64
    }
}

/// Produce the digit string and running total for one strand, failing the
/// whole sequence on the first window whose distance exceeds `m_max` (the
/// partial digit string is discarded, not returned).
fn scan_strand(
    accession: &str,
    bases: &[u8],
    k: usize,
    m_max: u32,
    table: &PresenceTable,
) -> Result<(String, u32), SequenceError> {
    let windows = roll_kmers(bases, k);
    let mut digits = String::with_capacity(windows.len());
    let mut total: u32 = 0;

    for (idx, value) in windows {
        match search(value, k, m_max, table) {
            Some(h) => {
                digits.push((b'0' + h as u8) as char);
                total += h;
            }
            None => return Err(SequenceError::exceeded(accession, idx)),
        }
    }

    Ok((digits, total))
}
