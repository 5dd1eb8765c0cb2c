//! Catalog lookup capability: a read-only `accession -> record` lookup the
//! core consumes but does not own. A full catalog subsystem (flat-file
//! indexing service, accession registry) is out of scope here — this is a
//! minimal TSV-backed reference adapter so the crate is runnable
//! end-to-end.

use std::path::Path;

use anyhow::{Context, Result};
use fxhash::FxHashMap;

/// Sequence topology, as consumed by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Linear,
    Circular,
}

/// The fields of a catalog record the core actually reads: exactly
/// `{length, topology}`.
#[derive(Debug, Clone, Copy)]
pub struct CatalogRecord {
    pub length: usize,
    pub topology: Topology,
}

/// Read-only accession -> record lookup.
pub trait CatalogLookup: Send + Sync {
    fn lookup(&self, accession: &str) -> Option<CatalogRecord>;
}

/// Minimal TSV-backed catalog: one `accession\tlength\ttopology` row per
/// line, `topology` one of `linear`/`circular` (defaults to `linear` when
/// omitted or unrecognised).
#[derive(Debug, Default)]
pub struct TsvCatalog {
    records: FxHashMap<String, CatalogRecord>,
}

impl TsvCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog file {:?}", path))?;
        Self::parse(&text).with_context(|| format!("parsing catalog file {:?}", path))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut records = FxHashMap::default();
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let accession = fields
                .next()
                .with_context(|| format!("line {}: missing accession", lineno + 1))?;
            let length: usize = fields
                .next()
                .with_context(|| format!("line {}: missing length", lineno + 1))?
                .parse()
                .with_context(|| format!("line {}: invalid length", lineno + 1))?;
            let topology = match fields.next() {
                Some("circular") => Topology::Circular,
                _ => Topology::Linear,
            };
            records.insert(accession.to_string(), CatalogRecord { length, topology });
        }
        Ok(TsvCatalog { records })
    }

    pub fn insert(&mut self, accession: impl Into<String>, record: CatalogRecord) {
        self.records.insert(accession.into(), record);
    }
}

impl CatalogLookup for TsvCatalog {
    fn lookup(&self, accession: &str) -> Option<CatalogRecord> {
        self.records.get(accession).copied()
    }
}
