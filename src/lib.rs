//! Fofanov distance engine: the k-mer presence table and mutation-search
//! algorithm, plus the minimal collaborator adapters and CLI needed to run
//! it end-to-end.

pub mod collab;
pub mod core;

pub use crate::core::{analyze, AnalysisConfig, AnalysisOutput, ForegroundRecord, KSize};
