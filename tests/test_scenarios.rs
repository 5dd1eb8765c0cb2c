//! Black-box scenarios, run through the public `fdist::analyze` entry
//! point with real temp-file FASTA/catalog inputs, exercising the public
//! API end-to-end rather than internal helpers.

use std::io::Write;
use std::path::PathBuf;

use fdist::collab::{CatalogRecord, FastaLoader, Topology, TsvCatalog};
use fdist::core::AnalysisConfig;
use fdist::{analyze, KSize};
use tempfile::TempDir;

fn write_fasta(dir: &TempDir, filename: &str, accession: &str, bases: &str) -> PathBuf {
    let path = dir.path().join(filename);
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, ">{accession}").unwrap();
    writeln!(f, "{bases}").unwrap();
    path
}

fn config(k: KSize, bidi_bg: bool, bidi_fg: bool, allow_bg: bool, allow_fg: bool) -> AnalysisConfig {
    AnalysisConfig {
        k,
        bidirectional_bg: bidi_bg,
        bidirectional_fg: bidi_fg,
        allow_unknowns_bg: allow_bg,
        allow_unknowns_fg: allow_fg,
        n_workers: 2,
    }
}

#[test]
fn s1_exact_match_yields_digit_zero() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "ACGTACGT");
    let fg = write_fasta(&dir, "fg.fa", "fg1", "ACGTACGT");

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 8, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Linear });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, false, false, false, false),
    )
    .unwrap();

    assert!(out.background_errors.is_empty());
    assert!(out.foreground_errors.is_empty());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].forward_digits, "0");
    assert_eq!(out.records[0].forward_total, 0);
    assert_eq!(out.records[0].forward_score, 0.0);
}

#[test]
fn s2_single_substitution_yields_digit_one() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "ACGTACGT");
    let fg = write_fasta(&dir, "fg.fa", "fg1", "ACGTACGA");

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 8, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Linear });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, false, false, false, false),
    )
    .unwrap();

    assert_eq!(out.records[0].forward_digits, "1");
    assert_eq!(out.records[0].forward_total, 1);
    assert_eq!(out.records[0].forward_score, 1.0);
}

#[test]
fn s3_exceeded_fails_the_sequence_not_the_run() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "AAAAAAAA");
    let fg = write_fasta(&dir, "fg.fa", "fg1", "TTTTTTTT");

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 8, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Linear });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, false, false, false, false),
    )
    .unwrap();

    assert!(out.records.is_empty());
    assert_eq!(out.foreground_errors.len(), 1);
    assert_eq!(
        out.foreground_errors[0].1.kind,
        fdist::core::error::SequenceErrorKind::Exceeded
    );
}

#[test]
fn s4_bidirectional_background_covers_both_strands() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "ACGTACGTACGTACGT");
    let fg = write_fasta(&dir, "fg.fa", "fg1", "ACGTACGT");

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 16, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Linear });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, true, true, false, false),
    )
    .unwrap();

    let rec = &out.records[0];
    assert_eq!(rec.forward_digits, "0");
    assert_eq!(rec.forward_score, 0.0);
    assert_eq!(rec.reverse_digits.as_deref(), Some("0"));
    assert_eq!(rec.reverse_score, Some(0.0));
}

#[test]
fn s5_ambiguous_background_then_concrete_foreground_hit() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "ACGTACGN");
    let fg = write_fasta(&dir, "fg.fa", "fg1", "ACGTACGC");

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 8, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Linear });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, false, false, true, false),
    )
    .unwrap();

    assert_eq!(out.records[0].forward_digits, "0");
}

#[test]
fn s6_gap_produces_no_output_record() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "ACGTACGT");
    let fg_path = dir.path().join("fg.fa");
    let mut f = std::fs::File::create(&fg_path).unwrap();
    writeln!(f, ">fg1").unwrap();
    writeln!(f, "ACGT-CGT").unwrap();

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 8, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Linear });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg_path.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, false, false, false, false),
    )
    .unwrap();

    assert!(out.records.is_empty());
    assert_eq!(out.foreground_errors.len(), 1);
    assert_eq!(
        out.foreground_errors[0].1.kind,
        fdist::core::error::SequenceErrorKind::Gap
    );
}

#[test]
fn circular_topology_wraps_window_count_to_sequence_length() {
    let dir = TempDir::new().unwrap();
    let bg = write_fasta(&dir, "bg.fa", "bg1", "ACGTACGTACGTACGT");
    let fg = write_fasta(&dir, "fg.fa", "fg1", "ACGTACGT");

    let mut catalog = TsvCatalog::default();
    catalog.insert("bg1", CatalogRecord { length: 16, topology: Topology::Linear });
    catalog.insert("fg1", CatalogRecord { length: 8, topology: Topology::Circular });
    let loader = FastaLoader::new(None);

    let out = analyze(
        &[bg.to_string_lossy().to_string()],
        &[fg.to_string_lossy().to_string()],
        &loader,
        &catalog,
        &config(KSize::K8, false, false, false, false),
    )
    .unwrap();

    // Circular: digit-count == L, not L-k+1.
    assert_eq!(out.records[0].length, 8);
    assert_eq!(out.records[0].forward_digits.len(), 8);
}
