//! Minimal concrete implementations of the two external capabilities the
//! core consumes: catalog lookup and sequence loading. These are reference
//! adapters, not a full catalog/tabulation subsystem — they exist only so
//! the crate is runnable end-to-end and testable.

pub mod catalog;
pub mod loader;

pub use catalog::{CatalogLookup, CatalogRecord, Topology, TsvCatalog};
pub use loader::{FastaLoader, LoadedSequence, MapLoader, SequenceLoader};
