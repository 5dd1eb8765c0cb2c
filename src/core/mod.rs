//! The Fofanov distance engine.
//!
//! One file per concern: `alphabet` (base codes, IUPAC tables), `kmer`
//! (sliding-window builder), `presence` (the shared bitset), `mutation`
//! (the combinatorial distance search), `background` (presence-table
//! loading), `foreground` (digit-string scanning), `driver` (the parallel
//! orchestration of both phases).

pub mod alphabet;
pub mod background;
pub mod driver;
pub mod error;
pub mod foreground;
pub mod ksize;
pub mod kmer;
pub mod mutation;
pub mod presence;

pub use driver::{analyze, AnalysisConfig, AnalysisOutput};
pub use error::{SequenceError, SequenceErrorKind};
pub use foreground::ForegroundRecord;
pub use ksize::KSize;
pub use presence::PresenceTable;
