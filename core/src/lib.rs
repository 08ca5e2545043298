//! Vector-space link recommendation for a static content site.
//!
//! Two batch phases share nothing but a persisted snapshot: `build_index`
//! turns a corpus of pages into per-document TF-IDF vectors plus global term
//! statistics, and `suggest` scores a new, unindexed draft against that
//! snapshot, one candidate concept term at a time.

pub mod extract;
pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;
pub mod vector;

pub use index::{build_index, DocEntry, IndexSnapshot, RawDocument};
pub use query::{suggest, Suggestion};
pub use vector::{TermCounts, TermVector};
