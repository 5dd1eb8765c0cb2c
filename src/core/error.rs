//! Closed error-kind set for per-sequence failures.
//!
//! Per-sequence failures never abort the run: the driver collects one
//! `SequenceError` per failed input and keeps going.

use thiserror::Error;

/// One of the seven closed error kinds a single sequence can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceErrorKind {
    Gap,
    PolyN,
    AmbigDisallowed,
    Exceeded,
    NoAccession,
    CatalogMiss,
    Io,
}

/// A classified, per-sequence failure carrying the accession (when known)
/// and a human-readable detail message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind:?} ({accession}): {detail}")]
pub struct SequenceError {
    pub kind: SequenceErrorKind,
    pub accession: String,
    pub detail: String,
}

impl SequenceError {
    pub fn new(kind: SequenceErrorKind, accession: impl Into<String>, detail: impl Into<String>) -> Self {
        SequenceError {
            kind,
            accession: accession.into(),
            detail: detail.into(),
        }
    }

    pub fn gap(accession: impl Into<String>) -> Self {
        Self::new(
            SequenceErrorKind::Gap,
            accession,
            "sequence contains a gap of indeterminate length ('-')",
        )
    }

    pub fn poly_n(accession: impl Into<String>, k: usize) -> Self {
        Self::new(
            SequenceErrorKind::PolyN,
            accession,
            format!("sequence contains a run of 'n' of length >= {k}"),
        )
    }

    pub fn ambig_disallowed(accession: impl Into<String>) -> Self {
        Self::new(
            SequenceErrorKind::AmbigDisallowed,
            accession,
            "sequence contains an IUPAC ambiguity code and unknowns are not allowed on this side",
        )
    }

    pub fn exceeded(accession: impl Into<String>, window_index: usize) -> Self {
        Self::new(
            SequenceErrorKind::Exceeded,
            accession,
            format!("window {window_index}: no background neighbour found within m_max"),
        )
    }

    pub fn no_accession(accession: impl Into<String>) -> Self {
        Self::new(
            SequenceErrorKind::NoAccession,
            accession,
            "no accession could be determined for this input",
        )
    }

    pub fn catalog_miss(accession: impl Into<String>) -> Self {
        let acc = accession.into();
        Self::new(
            SequenceErrorKind::CatalogMiss,
            acc.clone(),
            format!("catalog has no entry for accession {acc}"),
        )
    }

    pub fn io(accession: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(SequenceErrorKind::Io, accession, detail)
    }
}
