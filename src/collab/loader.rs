//! Sequence loader capability: given an input identifier, returns
//! `{accession, bases}`. A full input file format layer is out of scope
//! here — this is a minimal single-record FASTA adapter so the crate is
//! runnable end-to-end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fxhash::FxHashMap;

/// One loaded sequence: its accession and raw (not yet lower-cased) bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSequence {
    pub accession: String,
    pub bases: Vec<u8>,
}

/// Given an input identifier, load one sequence. Bases are case-insensitive
/// ASCII over the IUPAC alphabet plus `-`; this trait does not normalise
/// case, that's `core::kmer`'s job.
pub trait SequenceLoader: Send + Sync {
    fn load(&self, input_id: &str) -> Result<LoadedSequence>;
}

/// Loads one FASTA record per file. `input_id` is resolved to a path via
/// the directory passed to [`FastaLoader::new`], falling back to treating
/// `input_id` itself as a path when no directory is configured.
///
/// The accession is the first whitespace-delimited token of the `>` header
/// line; everything after it is ignored.
pub struct FastaLoader {
    root: Option<PathBuf>,
}

impl FastaLoader {
    pub fn new(root: Option<PathBuf>) -> Self {
        FastaLoader { root }
    }

    fn resolve(&self, input_id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(input_id),
            None => PathBuf::from(input_id),
        }
    }
}

impl SequenceLoader for FastaLoader {
    fn load(&self, input_id: &str) -> Result<LoadedSequence> {
        let path = self.resolve(input_id);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading FASTA input {:?}", path))?;
        parse_single_fasta_record(&text)
            .with_context(|| format!("parsing FASTA input {:?}", path))
    }
}

fn parse_single_fasta_record(text: &str) -> Result<LoadedSequence> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .context("empty FASTA input")?
        .strip_prefix('>')
        .context("FASTA input missing '>' header line")?;
    let accession = header
        .split_whitespace()
        .next()
        .context("FASTA header has no accession token")?
        .to_string();

    let mut bases = Vec::new();
    for line in lines {
        bases.extend_from_slice(line.trim().as_bytes());
    }

    Ok(LoadedSequence { accession, bases })
}

/// An in-memory loader keyed by input identifier, used by tests and by
/// callers that have already decoded their sequences into memory.
#[derive(Debug, Default)]
pub struct MapLoader {
    entries: FxHashMap<String, LoadedSequence>,
}

impl MapLoader {
    pub fn new() -> Self {
        MapLoader::default()
    }

    pub fn insert(&mut self, input_id: impl Into<String>, accession: impl Into<String>, bases: &[u8]) {
        self.entries.insert(
            input_id.into(),
            LoadedSequence {
                accession: accession.into(),
                bases: bases.to_vec(),
            },
        );
    }
}

impl SequenceLoader for MapLoader {
    fn load(&self, input_id: &str) -> Result<LoadedSequence> {
        self.entries
            .get(input_id)
            .cloned()
            .with_context(|| format!("no sequence registered for input id {:?}", input_id))
    }
}
