//! De Bruijn graph assembly of short reads and local alignment of a query
//! against the assembled contigs.
//!
//! Reads are grouped by scaffold, each group is turned into a k-mer
//! multigraph and every zero-indegree node seeds one greedy contig walk. A
//! query can then be aligned against each contig with a Smith-Waterman style
//! score matrix and traceback.

pub mod align;
pub mod error;
pub mod graph;
pub mod io;
pub mod pipeline;
pub mod stats;

pub use error::{GeneQuestError, Result};
