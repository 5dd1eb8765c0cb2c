use anyhow::{Context, Result};
use clap::Parser;
use fdist::collab::{FastaLoader, TsvCatalog};
use fdist::core::AnalysisConfig;
use fdist::{analyze, KSize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

/// Command-line options for the Fofanov distance engine.
#[derive(Parser)]
#[command(
    name = "fdist",
    about = "Compute Fofanov distance of foreground sequences against a background set",
    version = "0.1.0"
)]
struct Cli {
    /// Background FASTA files (one sequence per file) [path...]
    #[clap(short = 'b', long, value_parser, num_args = 1.., required = true, help_heading = "Core")]
    pub background: Vec<PathBuf>,

    /// Foreground FASTA files (one sequence per file) [path...]
    #[clap(short = 'f', long, value_parser, num_args = 1.., required = true, help_heading = "Core")]
    pub foreground: Vec<PathBuf>,

    /// Catalog TSV: `accession\tlength\ttopology` rows [path]
    #[clap(short = 'c', long, value_parser, required = true, help_heading = "Core")]
    pub catalog: PathBuf,

    /// Output table path [path]
    #[clap(short = 'o', long, value_parser, required = true, help_heading = "Core")]
    pub output: PathBuf,

    /// K-mer size: 8 or 16 [integer]
    #[clap(short = 'k', long, default_value = "8", value_parser = parse_ksize, help_heading = "Core")]
    pub k: u8,

    /// Number of worker threads [integer]
    #[clap(short = 't', long, default_value = "1", help_heading = "Core")]
    pub n_threads: usize,

    /// Process both strands of background sequences [flag]
    #[clap(long, help_heading = "Strand")]
    pub bidirectional_bg: bool,

    /// Process both strands of foreground sequences [flag]
    #[clap(long, help_heading = "Strand")]
    pub bidirectional_fg: bool,

    /// Allow IUPAC ambiguity codes in background sequences (expanded) [flag]
    #[clap(long, help_heading = "Ambiguity")]
    pub allow_unknowns_bg: bool,

    /// Allow IUPAC ambiguity codes in foreground sequences (collapsed) [flag]
    #[clap(long, help_heading = "Ambiguity")]
    pub allow_unknowns_fg: bool,
}

/// Rejects any `k` outside the spec's closed universe `{8, 16}` at the
/// argument-parsing boundary, rather than deep inside `run()`.
fn parse_ksize(s: &str) -> Result<u8, String> {
    match s {
        "8" => Ok(8),
        "16" => Ok(16),
        other => Err(format!("invalid k-mer size '{other}': must be 8 or 16")),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn run() -> Result<()> {
    let start_time = Instant::now();
    let opt = Cli::parse();

    let k = KSize::from_k(opt.k as usize).expect("parse_ksize only accepts 8 or 16");

    let config = AnalysisConfig {
        k,
        bidirectional_bg: opt.bidirectional_bg,
        bidirectional_fg: opt.bidirectional_fg,
        allow_unknowns_bg: opt.allow_unknowns_bg,
        allow_unknowns_fg: opt.allow_unknowns_fg,
        n_workers: opt.n_threads,
    };

    println!("Start: Loading catalog");
    let catalog = TsvCatalog::load(&opt.catalog).context("loading catalog")?;
    let loader = FastaLoader::new(None);

    let background_inputs: Vec<String> = opt
        .background
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    let foreground_inputs: Vec<String> = opt
        .foreground
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();

    let output = analyze(
        &background_inputs,
        &foreground_inputs,
        &loader,
        &catalog,
        &config,
    )?;

    println!("Start: Writing output table");
    write_table(&opt.output, &output)?;

    if !output.background_errors.is_empty() || !output.foreground_errors.is_empty() {
        eprintln!(
            "Completed with {} background and {} foreground failures:",
            output.background_errors.len(),
            output.foreground_errors.len()
        );
        for (idx, err) in &output.background_errors {
            eprintln!("  background[{idx}]: {err}");
        }
        for (idx, err) in &output.foreground_errors {
            eprintln!("  foreground[{idx}]: {err}");
        }
    }

    let elapsed = start_time.elapsed();
    println!("Elapsed time: {:.2?}", elapsed);
    Ok(())
}

/// Write the per-sequence output table, tilde-separated:
/// `accession~length~forward_total~forward_score~reverse_total~reverse_score`.
/// Reverse fields are empty when the run was unidirectional.
fn write_table(path: &PathBuf, output: &fdist::AnalysisOutput) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path).context("creating output table")?);
    for rec in &output.records {
        writeln!(
            writer,
            "{}~{}~{}~{}~{}~{}",
            rec.accession,
            rec.length,
            rec.forward_total,
            rec.forward_score,
            rec.reverse_total.map(|t| t.to_string()).unwrap_or_default(),
            rec.reverse_score.map(|s| s.to_string()).unwrap_or_default(),
        )
        .context("writing output row")?;
    }
    Ok(())
}
