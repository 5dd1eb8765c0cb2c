//! Parallel driver: fans per-sequence work for both phases out across a
//! fixed rayon worker pool, aggregates per-sequence output records, and
//! collects per-position errors without aborting the run.

use std::sync::Mutex;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::collab::{CatalogLookup, SequenceLoader, Topology};
use crate::core::background::load_background;
use crate::core::error::SequenceError;
use crate::core::foreground::{scan_foreground, ForegroundRecord};
use crate::core::ksize::KSize;
use crate::core::presence::PresenceTable;

/// How often progress is emitted: every 10,000 items.
const PROGRESS_STRIDE: u64 = 10_000;

/// The run-wide knobs `analyze` threads through to both phases.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    pub k: KSize,
    pub bidirectional_bg: bool,
    pub bidirectional_fg: bool,
    pub allow_unknowns_bg: bool,
    pub allow_unknowns_fg: bool,
    pub n_workers: usize,
}

/// `analyze`'s full result: the per-sequence output records plus a
/// parallel error list for each phase, indexed by input position.
#[derive(Debug, Default)]
pub struct AnalysisOutput {
    pub records: Vec<ForegroundRecord>,
    pub background_errors: Vec<(usize, SequenceError)>,
    pub foreground_errors: Vec<(usize, SequenceError)>,
}

/// Run one full analysis: background phase, then (after a happens-before
/// barrier) the foreground phase, over a fixed worker pool sized by
/// `config.n_workers`.
pub fn analyze(
    background_inputs: &[String],
    foreground_inputs: &[String],
    loader: &dyn SequenceLoader,
    catalog: &dyn CatalogLookup,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_workers)
        .build()
        .context("building rayon thread pool")?;

    pool.install(|| run_phases(background_inputs, foreground_inputs, loader, catalog, config))
}

fn run_phases(
    background_inputs: &[String],
    foreground_inputs: &[String],
    loader: &dyn SequenceLoader,
    catalog: &dyn CatalogLookup,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput> {
    let table = PresenceTable::init(config.k);

    println!("Start: Loading background ({} inputs)", background_inputs.len());
    let pb = new_progress_bar(background_inputs.len() as u64);
    let background_errors: Mutex<Vec<(usize, SequenceError)>> = Mutex::new(Vec::new());

    background_inputs
        .par_iter()
        .enumerate()
        .for_each(|(idx, input_id)| {
            if let Err(e) = process_one_background(input_id, loader, catalog, config, &table) {
                background_errors.lock().unwrap().push((idx, e));
            }
            tick(&pb, idx as u64);
        });
    pb.finish_with_message("| background loaded");

    // Happens-before barrier: `par_iter().for_each` above has already joined
    // every worker, so every `mark` is visible before any `search` below.

    println!("Start: Scanning foreground ({} inputs)", foreground_inputs.len());
    let pb = new_progress_bar(foreground_inputs.len() as u64);
    let foreground_errors: Mutex<Vec<(usize, SequenceError)>> = Mutex::new(Vec::new());

    let records: Vec<ForegroundRecord> = foreground_inputs
        .par_iter()
        .enumerate()
        .filter_map(|(idx, input_id)| {
            let result = process_one_foreground(input_id, loader, catalog, config, &table);
            tick(&pb, idx as u64);
            match result {
                Ok(rec) => Some(rec),
                Err(e) => {
                    foreground_errors.lock().unwrap().push((idx, e));
                    None
                }
            }
        })
        .collect();
    pb.finish_with_message("| foreground scanned");

    table.release();

    Ok(AnalysisOutput {
        records,
        background_errors: background_errors.into_inner().unwrap(),
        foreground_errors: foreground_errors.into_inner().unwrap(),
    })
}

fn process_one_background(
    input_id: &str,
    loader: &dyn SequenceLoader,
    catalog: &dyn CatalogLookup,
    config: &AnalysisConfig,
    table: &PresenceTable,
) -> Result<(), SequenceError> {
    let loaded = loader
        .load(input_id)
        .map_err(|e| SequenceError::io(input_id, e.to_string()))?;
    if loaded.accession.is_empty() {
        return Err(SequenceError::no_accession(input_id));
    }
    let record = catalog
        .lookup(&loaded.accession)
        .ok_or_else(|| SequenceError::catalog_miss(loaded.accession.clone()))?;
    let circular = matches!(record.topology, Topology::Circular);

    load_background(
        &loaded.accession,
        &loaded.bases,
        circular,
        config.k,
        config.allow_unknowns_bg,
        config.bidirectional_bg,
        table,
    )
}

fn process_one_foreground(
    input_id: &str,
    loader: &dyn SequenceLoader,
    catalog: &dyn CatalogLookup,
    config: &AnalysisConfig,
    table: &PresenceTable,
) -> Result<ForegroundRecord, SequenceError> {
    let loaded = loader
        .load(input_id)
        .map_err(|e| SequenceError::io(input_id, e.to_string()))?;
    if loaded.accession.is_empty() {
        return Err(SequenceError::no_accession(input_id));
    }
    let record = catalog
        .lookup(&loaded.accession)
        .ok_or_else(|| SequenceError::catalog_miss(loaded.accession.clone()))?;
    let circular = matches!(record.topology, Topology::Circular);

    scan_foreground(
        &loaded.accession,
        &loaded.bases,
        circular,
        config.k,
        config.allow_unknowns_fg,
        config.bidirectional_fg,
        table,
    )
}

fn new_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("       {bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb
}

/// Serialised progress emission, every [`PROGRESS_STRIDE`] items; the
/// progress bar's own internal draw lock serialises the console writes.
fn tick(pb: &ProgressBar, idx: u64) {
    if (idx + 1) % PROGRESS_STRIDE == 0 {
        pb.set_position(idx + 1);
    }
}
